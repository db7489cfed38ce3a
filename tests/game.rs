use bevy_ecs::{event::Events, world::World};
use glam::IVec2;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;
use squareworldcraft::{
    config::Options,
    constants::player::{DM_STEP_TIME, STEP_TIME},
    error::{GameError, WorldError},
    events::{GameCommand, GameEvent},
    game::{Game, DM_KIT},
    map::grid::CellRect,
    systems::{Creature, DebugState, Settings, Walker},
    things::{Kind, Stack, Terrain, Thing},
    ui::Viewport,
    world::{
        generation::{Generated, SpawnKind},
        WorldMap,
    },
};

mod common;

fn generated(map: WorldMap) -> Generated {
    Generated {
        map,
        spawns: vec![
            (IVec2::new(3, 3), SpawnKind::Herbivore),
            (IVec2::new(30, 30), SpawnKind::Carnivore),
        ],
    }
}

fn populate(options: &Options, map: WorldMap) -> Result<World, GameError> {
    let mut world = World::new();
    Game::populate(
        &mut world,
        options,
        generated(map),
        SmallRng::seed_from_u64(common::SEED),
        Viewport::new(800, 600),
    )?;
    Ok(world)
}

fn walker(world: &mut World) -> Walker {
    let mut query = world.query::<&Walker>();
    query.single(world).expect("Player should exist").clone()
}

#[test]
fn test_populate_places_player_and_creatures() {
    let mut world = populate(&Options::default(), WorldMap::new(50, 50)).unwrap();

    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(10, 10));
    assert_that(&common::player_inventory(&mut world).is_empty()).is_true();
    assert_that(&walker(&mut world).step_time).is_equal_to(STEP_TIME);

    let mut creatures = world.query::<&Creature>();
    assert_that(&creatures.iter(&world).count()).is_equal_to(2);
}

#[test]
fn test_dungeon_master_kit() {
    let options = Options {
        dm: true,
        debug: true,
        overclock: 4,
        ..Options::default()
    };
    let mut world = populate(&options, WorldMap::new(50, 50)).unwrap();

    let inventory = common::player_inventory(&mut world);
    let held: Vec<Stack> = inventory.slots().iter().flatten().copied().collect();
    assert_that(&held).is_equal_to(DM_KIT.to_vec());
    assert_that(&walker(&mut world).step_time).is_equal_to(DM_STEP_TIME);
    assert_that(&world.resource::<DebugState>().enabled).is_true();
    assert_that(&world.resource::<Settings>().overclock).is_equal_to(4);
}

#[test]
fn test_player_avoids_blocked_start() {
    let mut map = WorldMap::new(50, 50);
    let rock = Stack::one(Thing::in_situ(Kind::Stone));
    map.fill_things(&CellRect::new(9, 9, 3, 3), Some(rock));

    let mut world = populate(&Options::default(), map).unwrap();

    let at = common::player_position(&mut world);
    assert_that(&(at - IVec2::new(10, 10)).abs().max_element()).is_equal_to(2);
}

#[test]
fn test_populate_fails_without_dry_land() {
    let mut map = WorldMap::new(50, 50);
    let bounds = map.bounds();
    map.fill_terrain(&bounds, Terrain::Water);

    let result = populate(&Options::default(), map);

    assert_that(&matches!(result, Err(GameError::World(WorldError::NoEmptySpot { .. })))).is_true();
}

#[test]
fn test_update_events_expires_old_events() {
    let mut world = populate(&Options::default(), WorldMap::new(50, 50)).unwrap();
    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Census));

    Game::update_events(&mut world);
    assert_that(&world.resource::<Events<GameEvent>>().len()).is_equal_to(1);

    Game::update_events(&mut world);
    assert_that(&world.resource::<Events<GameEvent>>().is_empty()).is_true();
}
