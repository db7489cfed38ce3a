use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use tracing::{debug, trace};

use crate::{
    crafting::CraftingState,
    error::GameError,
    events::{GameCommand, GameEvent},
    inventory::Inventory,
    map::grid::chebyshev,
    systems::{
        components::{DeltaTime, GlobalState, PlayerControlled, Position, Walker, WieldMode, Wielding},
        debug::DebugState,
    },
    things::{Stack, Thing},
    ui::Viewport,
    world::WorldMap,
};

/// Applies player commands to the walker, the wielded action, the hotbar selection and the view.
///
/// While the crafting screen is open, commands that start something in the world are dropped;
/// commands that stop something always go through so nothing is left held down.
#[allow(clippy::too_many_arguments)]
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut debug_state: ResMut<DebugState>,
    mut viewport: ResMut<Viewport>,
    crafting: Res<CraftingState>,
    mut players: Query<(&Position, &mut Walker, &mut Wielding, &mut Inventory), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (position, mut walker, mut wielding, mut inventory) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {}",
                e
            )));
            return;
        }
    };
    let allow_world_input = !crafting.open;

    for event in events.read() {
        let command = match event {
            GameEvent::Command(command) => *command,
            GameEvent::Resized { width, height } => {
                viewport.resize(*width, *height);
                debug!(width, height, "Viewport resized");
                continue;
            }
        };
        match command {
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::WalkBegin(direction) if allow_world_input => walker.begin(direction),
            GameCommand::WalkEnd(direction) => walker.end(direction),
            GameCommand::UseBegin { mode, target } if allow_world_input => wielding.begin(mode, target),
            GameCommand::ActBegin(direction) if allow_world_input => {
                wielding.begin(WieldMode::Tool, position.0 + direction.as_ivec2());
            }
            GameCommand::ActEnd => wielding.end(WieldMode::Tool),
            GameCommand::UseUpdate(target) => wielding.retarget(target),
            GameCommand::UseEnd(mode) => wielding.end(mode),
            GameCommand::SelectSlot(slot) => inventory.select(slot),
            GameCommand::SelectAdjacent(delta) => inventory.select_adjacent(delta),
            GameCommand::Zoom(delta) => {
                if viewport.zoom_by(delta) {
                    debug!(zoom = viewport.zoom(), tile = viewport.tile_size(), "Zoom changed");
                }
            }
            GameCommand::ToggleDebug => {
                debug_state.enabled = !debug_state.enabled;
                debug!(enabled = debug_state.enabled, "Debug overlay toggled");
            }
            _ => {}
        }
    }
}

/// Steps the player once its walking timeout has run out, trying held directions newest first.
pub fn player_walk_system(
    delta_time: Res<DeltaTime>,
    map: Res<WorldMap>,
    mut players: Query<(&mut Position, &mut Walker, &mut Wielding), With<PlayerControlled>>,
) {
    for (mut position, mut walker, mut wielding) in players.iter_mut() {
        walker.timeout = walker.timeout.saturating_sub(delta_time.millis);
        if walker.timeout > 0 {
            continue;
        }
        let Some(step) = walker
            .queue
            .iter()
            .map(|d| d.as_ivec2())
            .find(|step| map.can_occupy(position.0 + *step))
        else {
            continue;
        };
        position.0 += step;
        // The wielded cell keeps its offset from the player.
        if let Some(target) = wielding.target.as_mut() {
            *target += step;
        }
        walker.timeout += walker.step_time;
    }
}

/// One frame of swinging the selected tool (or bare hands) at `target`.
///
/// Work accumulates on the cell; once it reaches the cell's harvesting energy the whole stack
/// is collected. Returns what was collected, if anything.
pub fn swing_tool(
    map: &mut WorldMap,
    at: IVec2,
    target: IVec2,
    inventory: &mut Inventory,
    dt: u32,
) -> Result<Option<Stack>, GameError> {
    if chebyshev(at, target) > 1 {
        return Ok(None);
    }
    let Some(stack) = map.things_at(target) else {
        return Ok(None);
    };
    let tool = inventory.selected_thing().unwrap_or(Thing::Hands);
    let Some(yielded) = stack.thing.harvest_with(&tool) else {
        return Ok(None);
    };

    if map.progress_at(target) < stack.thing.energy_to_harvest() {
        map.add_progress(target, dt * tool.power_efficiency() / 100);
        return Ok(None);
    }

    let harvest = Stack::new(stack.count, yielded);
    inventory.add(harvest)?;
    map.set_things_at(target, None)?;
    map.clear_progress(target);
    Ok(Some(harvest))
}

/// Puts one of the selected thing on an empty neighbouring cell. Returns what was placed.
pub fn place_material(
    map: &mut WorldMap,
    at: IVec2,
    target: IVec2,
    inventory: &mut Inventory,
) -> Result<Option<Thing>, GameError> {
    let Some(held) = inventory.selected_thing() else {
        return Ok(None);
    };
    if chebyshev(at, target) != 1 || !map.in_bounds(target) || map.things_at(target).is_some() || !held.is_placeable() {
        return Ok(None);
    }
    let placed = inventory.remove_from(inventory.selection(), 1)?;
    map.set_things_at(target, Some(placed))?;
    Ok(Some(placed.thing))
}

pub fn player_wield_system(
    delta_time: Res<DeltaTime>,
    mut map: ResMut<WorldMap>,
    mut players: Query<(&Position, &mut Wielding, &mut Inventory), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for (position, mut wielding, mut inventory) in players.iter_mut() {
        let (Some(mode), Some(target)) = (wielding.mode, wielding.target) else {
            continue;
        };
        let result = match mode {
            WieldMode::Tool => swing_tool(&mut map, position.0, target, &mut inventory, delta_time.millis).map(|harvest| {
                if let Some(harvest) = harvest {
                    debug!(at = ?target, %harvest, "Harvested");
                }
            }),
            WieldMode::Material => place_material(&mut map, position.0, target, &mut inventory).map(|placed| {
                if let Some(placed) = placed {
                    trace!(at = ?target, %placed, "Placed");
                }
            }),
        };
        if let Err(e) = result {
            // Stop rather than fail again every frame.
            *wielding = Wielding::default();
            errors.write(e);
        }
    }
}
