#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::IVec2;
use rand::{rngs::SmallRng, SeedableRng};
use squareworldcraft::{
    crafting::CraftingState,
    error::GameError,
    events::{GameEvent, PointerEvent},
    inventory::Inventory,
    systems::{
        Bindings, DebugState, DeltaTime, GlobalState, PlayerBundle, PlayerControlled, PointerState, Position, Settings,
        SimRng, SystemTimings, Timing, Walker, WindowFocus, Wielding,
    },
    things::{Kind, Stack, Thing},
    ui::Viewport,
    world::WorldMap,
};

pub const WORLD_SIZE: u32 = 20;
pub const SEED: u64 = 0x5eed;

/// A headless world with every resource the gameplay systems read, on a bare 20×20 plain.
///
/// Each frame is 100 simulated milliseconds.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<PointerEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(WorldMap::new(WORLD_SIZE, WORLD_SIZE));
    world.insert_resource(Viewport::new(800, 600));
    world.insert_resource(DeltaTime::from_seconds(0.1));
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(DebugState::default());
    world.insert_resource(CraftingState::default());
    world.insert_resource(PointerState::default());
    world.insert_resource(Settings { overclock: 1 });
    world.insert_resource(SimRng(SmallRng::seed_from_u64(SEED)));
    world.insert_resource(SystemTimings::default());
    world.insert_resource(Timing::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(WindowFocus::default());

    world
}

/// Spawns a controllable player with an empty inventory on `at`.
pub fn spawn_test_player(world: &mut World, at: IVec2) -> Entity {
    spawn_player_with(world, at, Inventory::default())
}

pub fn spawn_player_with(world: &mut World, at: IVec2, inventory: Inventory) -> Entity {
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(at),
            walker: Walker::default(),
            wielding: Wielding::default(),
            inventory,
        })
        .id()
}

/// An inventory holding `stacks`, in order.
pub fn inventory_with(stacks: &[Stack]) -> Inventory {
    let mut inventory = Inventory::default();
    for stack in stacks {
        inventory.add(*stack).expect("Test inventory should have room");
    }
    inventory
}

pub fn loose(count: u32, kind: Kind) -> Stack {
    Stack::new(count, Thing::loose(kind))
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.resource_mut::<Events<GameEvent>>().send(event);
}

pub fn send_pointer_event(world: &mut World, event: PointerEvent) {
    world.resource_mut::<Events<PointerEvent>>().send(event);
}

/// Every game event currently buffered, oldest first.
pub fn game_events(world: &World) -> Vec<GameEvent> {
    let events = world.resource::<Events<GameEvent>>();
    events.get_cursor().read(events).copied().collect()
}

pub fn error_count(world: &World) -> usize {
    world.resource::<Events<GameError>>().len()
}

pub fn player_inventory(world: &mut World) -> Inventory {
    let mut query = world.query::<(&Inventory, &PlayerControlled)>();
    query.single(world).expect("Player should exist").0.clone()
}

pub fn player_position(world: &mut World) -> IVec2 {
    let mut query = world.query::<(&Position, &PlayerControlled)>();
    query.single(world).expect("Player should exist").0 .0
}
