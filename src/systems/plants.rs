use bevy_ecs::system::{Res, ResMut};
use rand::Rng;
use tracing::trace;

use crate::constants::world::GRASS_GROWTH_PERIOD;
use crate::systems::components::{DeltaTime, SimRng};
use crate::things::{Kind, Stack, Thing};
use crate::world::WorldMap;

/// About once per growth period, sprouts a blade of grass on a random bare cell.
pub fn plant_growth_system(delta_time: Res<DeltaTime>, mut map: ResMut<WorldMap>, mut rng: ResMut<SimRng>) {
    let rng = &mut rng.0;
    if rng.random_range(0..GRASS_GROWTH_PERIOD) >= delta_time.millis {
        return;
    }
    let p = map.random_cell(rng);
    if map.things_at(p).is_none() && map.set_things_at(p, Some(Stack::one(Thing::loose(Kind::Grass)))).is_ok() {
        trace!(at = ?p, "Grass grew");
    }
}
