//! Grazing herbivores, hunting carnivores, and their metabolism.

use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    component::Component,
    entity::Entity,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::debug;

use crate::color::{darken, Hsv};
use crate::constants::creature::*;
use crate::map::direction::Direction;
use crate::map::grid::manhattan;
use crate::systems::components::{DeltaTime, PlayerControlled, Position, SimRng};
use crate::world::generation::SpawnKind;
use crate::world::WorldMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diet {
    Herbivore,
    Carnivore,
}

impl Diet {
    fn margin(self) -> u32 {
        match self {
            Diet::Herbivore => HERBIVORE_MARGIN,
            Diet::Carnivore => CARNIVORE_MARGIN,
        }
    }

    pub fn color(self) -> Hsv {
        match self {
            Diet::Herbivore => Hsv::new(90, 100, 50),
            Diet::Carnivore => Hsv::new(30, 75, 75),
        }
    }
}

impl From<SpawnKind> for Diet {
    fn from(kind: SpawnKind) -> Self {
        match kind {
            SpawnKind::Herbivore => Diet::Herbivore,
            SpawnKind::Carnivore => Diet::Carnivore,
        }
    }
}

/// A wandering animal. Energy counts milliseconds of life left.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Creature {
    pub diet: Diet,
    /// Cells per millisecond.
    pub speed: f32,
    pub energy: u32,
    pub age: u32,
    pub walk_timeout: i32,
    /// The last step taken, possibly zero or diagonal at birth.
    pub heading: IVec2,
    pub reproduction_threshold: u32,
}

impl Creature {
    /// A creature born with `energy` (or the bare minimum) plus its diet's safety margin.
    pub fn new(diet: Diet, speed: f32, energy: Option<u32>, heading: IVec2) -> Self {
        let energy = energy.unwrap_or(MIN_VIABLE_ENERGY) + diet.margin();
        Self {
            diet,
            speed,
            energy,
            age: 0,
            walk_timeout: 0,
            heading,
            reproduction_threshold: energy * 2,
        }
    }

    /// A fresh creature with a random walking speed and heading.
    pub fn random(diet: Diet, rng: &mut impl Rng) -> Self {
        let mut speed = rng.random_range(SPEED_RANGE) / 1000.0;
        if diet == Diet::Carnivore {
            speed *= CARNIVORE_SPEED_FACTOR;
        }
        let heading = IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1));
        Self::new(diet, speed, None, heading)
    }

    pub fn is_alive(&self) -> bool {
        self.energy >= MIN_VIABLE_ENERGY
    }

    pub fn color(&self) -> sdl2::pixels::Color {
        let color = self.diet.color().to_rgb();
        if self.is_alive() {
            color
        } else {
            darken(color, 4)
        }
    }

    /// What a carnivore may eat: any herbivore, or a carnivore that has already died.
    pub fn is_edible_to_carnivores(&self) -> bool {
        self.diet == Diet::Herbivore || !self.is_alive()
    }
}

/// The targets within `radius` that are closest to `from`; all of them when several tie.
pub fn nearest_targets(from: IVec2, targets: impl IntoIterator<Item = IVec2>, radius: i32) -> SmallVec<[IVec2; 8]> {
    let mut nearest: SmallVec<[IVec2; 8]> = SmallVec::new();
    let mut best = i32::MAX;
    for target in targets {
        let distance = manhattan(from, target);
        if distance > radius || distance > best {
            continue;
        }
        if distance < best {
            best = distance;
            nearest.clear();
        }
        nearest.push(target);
    }
    nearest
}

/// Keeps the candidates whose total distance to `targets` is the largest (`flee`) or smallest.
pub fn best_by_distance(candidates: &[IVec2], targets: &[IVec2], flee: bool) -> SmallVec<[IVec2; 5]> {
    let score = |p: &IVec2| -> i32 {
        let total: i32 = targets.iter().map(|t| manhattan(*p, *t)).sum();
        if flee {
            -total
        } else {
            total
        }
    };
    let Some(best) = candidates.iter().map(score).min() else {
        return SmallVec::new();
    };
    candidates.iter().copied().filter(|p| score(p) == best).collect()
}

/// Usually keeps going the same way; sometimes, or when that way is not offered, picks any candidate.
pub fn pick_walk(pos: IVec2, heading: IVec2, candidates: &[IVec2], rng: &mut impl Rng) -> IVec2 {
    let ahead = pos + heading;
    if candidates.contains(&ahead) && rng.random_range(0..TURN_CHANCE) != 0 {
        return ahead;
    }
    match candidates.len() {
        0 => pos,
        n => candidates[rng.random_range(0..n)],
    }
}

/// Where each creature stands this frame.
type Occupancy = HashMap<IVec2, SmallVec<[Entity; 2]>>;

fn vacate(occupancy: &mut Occupancy, at: IVec2, entity: Entity) {
    if let Some(here) = occupancy.get_mut(&at) {
        here.retain(|e| *e != entity);
        if here.is_empty() {
            occupancy.remove(&at);
        }
    }
}

/// Advances every living creature: graze or hunt, walk, burn energy, and perhaps breed.
#[allow(clippy::type_complexity)]
pub fn creature_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut map: ResMut<WorldMap>,
    mut rng: ResMut<SimRng>,
    mut creatures: Query<(Entity, &mut Position, &mut Creature)>,
    player: Query<&Position, (With<PlayerControlled>, Without<Creature>)>,
) {
    let dt = delta_time.millis;
    let player_pos = player.single().ok().map(|p| p.0);
    let rng = &mut rng.0;

    let mut occupancy: Occupancy = HashMap::new();
    let mut order = Vec::new();
    for (entity, position, _) in creatures.iter() {
        occupancy.entry(position.0).or_default().push(entity);
        order.push(entity);
    }
    let mut eaten: HashSet<Entity> = HashSet::new();

    for entity in order {
        if eaten.contains(&entity) {
            continue;
        }
        let Ok((_, position, creature)) = creatures.get(entity) else {
            continue;
        };
        if !creature.is_alive() {
            continue;
        }
        let (mut pos, mut c) = (position.0, creature.clone());

        c.walk_timeout = (c.walk_timeout - dt as i32).max(0);
        if c.walk_timeout == 0 {
            // Eat whatever is underfoot first.
            match c.diet {
                Diet::Herbivore => {
                    let edible = map
                        .things_at(pos)
                        .and_then(|s| s.thing.material())
                        .is_some_and(|k| k.is_edible());
                    if edible && map.set_things_at(pos, None).is_ok() {
                        c.energy += PLANT_ENERGY;
                    }
                }
                Diet::Carnivore => {
                    let prey = occupancy.get(&pos).and_then(|here| {
                        here.iter().copied().find(|other| {
                            *other != entity
                                && creatures
                                    .get(*other)
                                    .is_ok_and(|(_, _, o)| o.is_edible_to_carnivores())
                        })
                    });
                    if let Some(prey) = prey {
                        if let Ok((_, _, meal)) = creatures.get(prey) {
                            let gained = meal.energy / DIGESTION_INEFFICIENCY;
                            debug!(at = ?pos, alive = meal.is_alive(), diet = ?meal.diet, gained, "Creature eaten");
                            c.energy += gained;
                        }
                        eaten.insert(prey);
                        vacate(&mut occupancy, pos, prey);
                        commands.entity(prey).despawn();
                    }
                }
            }

            let mut candidates: SmallVec<[IVec2; 5]> = SmallVec::new();
            candidates.push(pos);
            candidates.extend(
                Direction::DIRECTIONS
                    .iter()
                    .map(|d| pos + d.as_ivec2())
                    .filter(|p| map.can_occupy(*p)),
            );

            // Herbivores watch for any carnivore, dead or alive, and carnivores for anything edible; both notice the player.
            let others = occupancy.iter().filter(|(at, _)| manhattan(pos, **at) <= SENSE_RADIUS).filter_map(|(at, here)| {
                let relevant = here.iter().any(|other| {
                    *other != entity
                        && creatures.get(*other).is_ok_and(|(_, _, o)| match c.diet {
                            Diet::Herbivore => o.diet == Diet::Carnivore,
                            Diet::Carnivore => o.is_edible_to_carnivores(),
                        })
                });
                relevant.then_some(*at)
            });
            let nearest = nearest_targets(pos, player_pos.into_iter().chain(others), SENSE_RADIUS);
            if !nearest.is_empty() {
                candidates = best_by_distance(&candidates, &nearest, c.diet == Diet::Herbivore);
            }

            let next = pick_walk(pos, c.heading, &candidates, rng);
            c.heading = next - pos;
            if next != pos {
                vacate(&mut occupancy, pos, entity);
                occupancy.entry(next).or_default().push(entity);
                pos = next;
            }
            c.walk_timeout += (1.0 / c.speed) as i32;
        }

        c.energy = c.energy.saturating_sub(dt * ENERGY_EXPENDITURE);
        c.age += dt;
        if !c.is_alive() {
            debug!(diet = ?c.diet, at = ?pos, age_seconds = c.age / 1000, energy = c.energy, "Creature died");
        } else if c.energy >= c.reproduction_threshold {
            let endowment = c.reproduction_threshold / 2;
            c.energy -= endowment;
            let child = Creature::new(c.diet, c.speed, Some(endowment), c.heading);
            debug!(diet = ?c.diet, at = ?pos, energy = child.energy, "Creature born");
            commands.spawn((Position(pos), child));
        }

        if let Ok((_, mut position, mut creature)) = creatures.get_mut(entity) {
            if position.0 != pos {
                position.0 = pos;
            }
            *creature = c;
        }
    }
}

/// Creates a creature entity at each spawn point.
pub fn spawn_creatures(
    world: &mut bevy_ecs::world::World,
    spawns: &[(IVec2, SpawnKind)],
    rng: &mut impl Rng,
) -> usize {
    for (pos, kind) in spawns {
        let creature = Creature::random(Diet::from(*kind), rng);
        world.spawn((Position(*pos), creature));
    }
    spawns.len()
}
