use bevy_ecs::{event::Events, system::RunSystemOnce};
use glam::IVec2;
use speculoos::prelude::*;
use squareworldcraft::{
    crafting::CraftingState,
    events::{GameCommand, GameEvent},
    inventory::Inventory,
    map::direction::Direction,
    systems::{
        player::{place_material, swing_tool},
        player_control_system, player_walk_system, player_wield_system, DebugState, GlobalState, Walker, WieldMode,
        Wielding,
    },
    things::{Kind, Stack, Thing, ToolKind},
    ui::Viewport,
    world::WorldMap,
};

mod common;

use common::loose;

const START: IVec2 = IVec2::new(5, 5);

fn run_control(world: &mut bevy_ecs::world::World, command: GameCommand) {
    common::send_game_event(world, GameEvent::Command(command));
    world
        .run_system_once(player_control_system)
        .expect("System should run successfully");
    world.resource_mut::<Events<GameEvent>>().clear();
}

fn walker(world: &mut bevy_ecs::world::World) -> Walker {
    let mut query = world.query::<&Walker>();
    query.single(world).expect("Player should exist").clone()
}

fn wielding(world: &mut bevy_ecs::world::World) -> Wielding {
    let mut query = world.query::<&Wielding>();
    *query.single(world).expect("Player should exist")
}

#[test]
fn test_exit_command() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    run_control(&mut world, GameCommand::Exit);

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_toggle_debug() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    run_control(&mut world, GameCommand::ToggleDebug);
    assert_that(&world.resource::<DebugState>().enabled).is_true();

    run_control(&mut world, GameCommand::ToggleDebug);
    assert_that(&world.resource::<DebugState>().enabled).is_false();
}

#[test]
fn test_walk_keys_stack_newest_first() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    run_control(&mut world, GameCommand::WalkBegin(Direction::Up));
    run_control(&mut world, GameCommand::WalkBegin(Direction::Left));
    assert_that(&walker(&mut world).queue.as_slice()).is_equal_to(&[Direction::Left, Direction::Up][..]);

    run_control(&mut world, GameCommand::WalkEnd(Direction::Left));
    assert_that(&walker(&mut world).queue.as_slice()).is_equal_to(&[Direction::Up][..]);
}

#[test]
fn test_crafting_screen_blocks_world_input() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);
    run_control(&mut world, GameCommand::WalkBegin(Direction::Up));
    world.resource_mut::<CraftingState>().toggle();

    run_control(&mut world, GameCommand::WalkBegin(Direction::Down));
    run_control(
        &mut world,
        GameCommand::UseBegin {
            mode: WieldMode::Tool,
            target: START + IVec2::X,
        },
    );
    assert_that(&walker(&mut world).queue.as_slice()).is_equal_to(&[Direction::Up][..]);
    assert_that(&wielding(&mut world).mode).is_none();

    // Releases still get through.
    run_control(&mut world, GameCommand::WalkEnd(Direction::Up));
    assert_that(&walker(&mut world).queue.is_empty()).is_true();
}

#[test]
fn test_hotbar_and_zoom_commands() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    run_control(&mut world, GameCommand::SelectSlot(4));
    run_control(&mut world, GameCommand::SelectAdjacent(-1));
    assert_that(&common::player_inventory(&mut world).selection()).is_equal_to(3);

    let zoom = world.resource::<Viewport>().zoom();
    run_control(&mut world, GameCommand::Zoom(1));
    assert_that(&world.resource::<Viewport>().zoom()).is_equal_to(zoom + 1);
}

#[test]
fn test_resize_updates_viewport() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    common::send_game_event(
        &mut world,
        GameEvent::Resized {
            width: 1024,
            height: 768,
        },
    );
    world.run_system_once(player_control_system).unwrap();

    let viewport = world.resource::<Viewport>();
    assert_that(&viewport.width()).is_equal_to(1024);
    assert_that(&viewport.height()).is_equal_to(768);
}

#[test]
fn test_act_keys_target_the_neighbour() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);

    run_control(&mut world, GameCommand::ActBegin(Direction::Right));
    assert_that(&wielding(&mut world)).is_equal_to(Wielding {
        mode: Some(WieldMode::Tool),
        target: Some(IVec2::new(6, 5)),
    });

    run_control(&mut world, GameCommand::ActEnd);
    assert_that(&wielding(&mut world)).is_equal_to(Wielding::default());
}

#[test]
fn test_walking_is_rate_limited() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);
    run_control(&mut world, GameCommand::WalkBegin(Direction::Right));

    world.run_system_once(player_walk_system).unwrap();
    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(6, 5));

    // 100 ms later the 166 ms step timeout has not run out.
    world.run_system_once(player_walk_system).unwrap();
    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(6, 5));

    world.run_system_once(player_walk_system).unwrap();
    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(7, 5));
}

#[test]
fn test_walking_falls_back_to_an_older_key() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);
    world
        .resource_mut::<WorldMap>()
        .set_things_at(IVec2::new(6, 5), Some(Stack::one(Thing::in_situ(Kind::Stone))))
        .unwrap();
    run_control(&mut world, GameCommand::WalkBegin(Direction::Down));
    run_control(&mut world, GameCommand::WalkBegin(Direction::Right));

    world.run_system_once(player_walk_system).unwrap();

    assert_that(&common::player_position(&mut world)).is_equal_to(IVec2::new(5, 6));
}

#[test]
fn test_swing_accumulates_then_harvests() {
    let mut map = WorldMap::new(10, 10);
    let target = IVec2::new(6, 5);
    map.set_things_at(target, Some(loose(3, Kind::Stone))).unwrap();
    let mut inventory = Inventory::default();

    let first = swing_tool(&mut map, START, target, &mut inventory, 50).unwrap();
    assert_that(&first).is_none();
    assert_that(&map.progress_at(target)).is_equal_to(5);

    let second = swing_tool(&mut map, START, target, &mut inventory, 50).unwrap();
    assert_that(&second).is_none();

    let third = swing_tool(&mut map, START, target, &mut inventory, 50).unwrap();
    assert_that(&third).is_equal_to(Some(loose(3, Kind::Stone)));
    assert_that(&map.things_at(target)).is_none();
    assert_that(&map.progress_at(target)).is_equal_to(0);
    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(3);
}

#[test]
fn test_swing_needs_the_right_tool_and_reach() {
    let mut map = WorldMap::new(10, 10);
    let rock = IVec2::new(6, 6);
    map.set_things_at(rock, Some(Stack::one(Thing::in_situ(Kind::Stone)))).unwrap();
    let mut inventory = Inventory::default();

    assert_that(&swing_tool(&mut map, START, rock, &mut inventory, 1000).unwrap()).is_none();
    assert_that(&map.progress_at(rock)).is_equal_to(0);

    inventory.add(Stack::one(Thing::tool(ToolKind::Pickaxe, Kind::Stone))).unwrap();
    swing_tool(&mut map, START, rock, &mut inventory, 1000).unwrap();
    assert_that(&map.progress_at(rock)).is_equal_to(240);

    let far = IVec2::new(8, 5);
    map.set_things_at(far, Some(loose(1, Kind::Wood))).unwrap();
    swing_tool(&mut map, START, far, &mut inventory, 1000).unwrap();
    assert_that(&map.progress_at(far)).is_equal_to(0);
}

#[test]
fn test_swing_into_a_full_inventory_fails() {
    let mut map = WorldMap::new(10, 10);
    let target = IVec2::new(5, 6);
    map.set_things_at(target, Some(loose(1, Kind::Wood))).unwrap();
    map.add_progress(target, 10);
    let mut inventory = Inventory::new(1);
    inventory.add(loose(1, Kind::Stone)).unwrap();

    assert_that(&swing_tool(&mut map, START, target, &mut inventory, 16)).is_err();
    assert_that(&map.things_at(target)).is_equal_to(Some(loose(1, Kind::Wood)));
}

#[test]
fn test_place_material_next_to_the_player() {
    let mut map = WorldMap::new(10, 10);
    let mut inventory = common::inventory_with(&[loose(2, Kind::Stone)]);

    let placed = place_material(&mut map, START, IVec2::new(4, 4), &mut inventory).unwrap();

    assert_that(&placed).is_equal_to(Some(Thing::loose(Kind::Stone)));
    assert_that(&map.things_at(IVec2::new(4, 4))).is_equal_to(Some(loose(1, Kind::Stone)));
    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(1);

    // Occupied, too far, and under the player are all refused.
    assert_that(&place_material(&mut map, START, IVec2::new(4, 4), &mut inventory).unwrap()).is_none();
    assert_that(&place_material(&mut map, START, IVec2::new(7, 5), &mut inventory).unwrap()).is_none();
    assert_that(&place_material(&mut map, START, START, &mut inventory).unwrap()).is_none();
    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(1);
}

#[test]
fn test_grass_cannot_be_placed() {
    let mut map = WorldMap::new(10, 10);
    let mut inventory = common::inventory_with(&[loose(1, Kind::Grass)]);

    let placed = place_material(&mut map, START, IVec2::new(5, 4), &mut inventory).unwrap();

    assert_that(&placed).is_none();
    assert_that(&inventory.count(&Thing::loose(Kind::Grass))).is_equal_to(1);
}

#[test]
fn test_wield_system_harvests_over_frames() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, START);
    let target = IVec2::new(5, 4);
    world
        .resource_mut::<WorldMap>()
        .set_things_at(target, Some(loose(2, Kind::Vine)))
        .unwrap();
    run_control(
        &mut world,
        GameCommand::UseBegin {
            mode: WieldMode::Tool,
            target,
        },
    );

    // Bare hands put 10 of each 100 ms towards the 10 a loose thing needs.
    world.run_system_once(player_wield_system).unwrap();
    assert_that(&world.resource::<WorldMap>().things_at(target)).is_some();

    world.run_system_once(player_wield_system).unwrap();
    assert_that(&world.resource::<WorldMap>().things_at(target)).is_none();
    assert_that(&common::player_inventory(&mut world).count(&Thing::loose(Kind::Vine))).is_equal_to(2);
}

#[test]
fn test_wield_system_stops_on_error() {
    let mut world = common::create_test_world();
    let mut inventory = Inventory::new(1);
    inventory.add(loose(1, Kind::Stone)).unwrap();
    common::spawn_player_with(&mut world, START, inventory);
    let target = IVec2::new(5, 4);
    world
        .resource_mut::<WorldMap>()
        .set_things_at(target, Some(loose(1, Kind::Wood)))
        .unwrap();
    world.resource_mut::<WorldMap>().add_progress(target, 10);
    run_control(
        &mut world,
        GameCommand::UseBegin {
            mode: WieldMode::Tool,
            target,
        },
    );

    world.run_system_once(player_wield_system).unwrap();

    assert_that(&common::error_count(&world)).is_equal_to(1);
    assert_that(&wielding(&mut world)).is_equal_to(Wielding::default());
}
