use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    crafting::{catalysts_around, craft, CraftingState},
    error::GameError,
    events::{GameCommand, GameEvent},
    inventory::Inventory,
    systems::components::{PlayerControlled, Position},
    world::WorldMap,
};

/// Opens and closes the crafting screen, keeps its catalysts current, and builds on request.
pub fn crafting_system(
    mut events: EventReader<GameEvent>,
    mut crafting: ResMut<CraftingState>,
    map: Res<WorldMap>,
    mut players: Query<(&Position, &mut Inventory), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let Ok((position, mut inventory)) = players.single_mut() else {
        return;
    };

    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::ToggleCrafting) => {
                crafting.toggle();
                debug!(open = crafting.open, "Crafting screen toggled");
            }
            GameEvent::Command(GameCommand::Craft) if crafting.open => {
                match craft(&mut inventory, &crafting.matrix, &crafting.catalysts) {
                    Ok(products) => {
                        let made = products.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                        info!(products = %made, "Crafted");
                    }
                    Err(e) => {
                        errors.write(e.into());
                    }
                }
            }
            _ => {}
        }
    }

    if crafting.open {
        let catalysts = catalysts_around(&map, position.0);
        if catalysts != crafting.catalysts {
            debug!(?catalysts, "Catalysts changed");
            crafting.catalysts = catalysts;
            crafting.refresh();
        }
    }
}
