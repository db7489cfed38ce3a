//! Routes mouse input to the crafting screen, the hotbar, or the world under the cursor.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use bitflags::bitflags;
use glam::IVec2;
use tracing::trace;

use crate::{
    crafting::{CraftingState, DropAction},
    error::GameError,
    events::{GameCommand, GameEvent, PointerButton, PointerEvent},
    inventory::Inventory,
    systems::components::{PlayerControlled, Position, WieldMode},
    ui::{hotbar_hit, CraftingLayout, CraftingTarget, Viewport},
    world::WorldMap,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
    }
}

impl From<PointerButton> for MouseButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => MouseButtons::PRIMARY,
            PointerButton::Secondary => MouseButtons::SECONDARY,
        }
    }
}

fn wield_mode(button: PointerButton) -> WieldMode {
    match button {
        PointerButton::Primary => WieldMode::Tool,
        PointerButton::Secondary => WieldMode::Material,
    }
}

/// Buttons held over the world, and the last pointer position in window pixels.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerState {
    pub held: MouseButtons,
    pub position: (i32, i32),
    /// The world cell last reported as a use target.
    pub hovered: Option<IVec2>,
}

/// Wheel up moves the selection towards the first slot.
pub fn scroll_delta(clicks: i32) -> i32 {
    -clicks.signum()
}

pub fn pointer_system(
    mut pointer_events: EventReader<PointerEvent>,
    mut writer: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
    mut pointer: ResMut<PointerState>,
    mut crafting: ResMut<CraftingState>,
    viewport: Res<Viewport>,
    map: Res<WorldMap>,
    mut players: Query<(&Position, &mut Inventory), With<PlayerControlled>>,
) {
    let Ok((position, mut inventory)) = players.single_mut() else {
        pointer_events.clear();
        return;
    };
    let center = position.0;

    for event in pointer_events.read() {
        // A world action ends on release even if the crafting screen opened meanwhile.
        if let PointerEvent::Released { button, .. } = *event {
            let released = MouseButtons::from(button);
            if pointer.held.contains(released) {
                pointer.held.remove(released);
                writer.write(GameCommand::UseEnd(wield_mode(button)).into());
            }
            if pointer.held.is_empty() {
                pointer.hovered = None;
            }
        }

        if crafting.open {
            let layout = CraftingLayout::new(viewport.width(), viewport.height());
            match *event {
                PointerEvent::Pressed {
                    button: PointerButton::Primary,
                    x,
                    y,
                } => {
                    let target = layout.hit(x, y, inventory.len(), crafting.products.len());
                    if target == CraftingTarget::Build {
                        writer.write(GameCommand::Craft.into());
                    } else if crafting.begin_drag(target, &inventory) {
                        trace!(?target, drag = ?crafting.drag, "Drag started");
                    }
                }
                PointerEvent::Released {
                    button: PointerButton::Primary,
                    x,
                    y,
                } => {
                    let target = layout.hit(x, y, inventory.len(), crafting.products.len());
                    match crafting.drop_on(target, &mut inventory) {
                        Ok(DropAction::Craft) => {
                            writer.write(GameCommand::Craft.into());
                        }
                        Ok(action) => trace!(?target, ?action, "Dropped"),
                        Err(e) => {
                            errors.write(e.into());
                        }
                    }
                }
                PointerEvent::Moved { x, y } => pointer.position = (x, y),
                _ => {}
            }
            continue;
        }

        match *event {
            PointerEvent::Pressed { button, x, y } => {
                pointer.position = (x, y);
                if let Some(slot) = hotbar_hit(viewport.height(), x, y) {
                    if button == PointerButton::Primary {
                        writer.write(GameCommand::SelectSlot(slot).into());
                    }
                    continue;
                }
                let target = viewport.screen_to_world(center, x, y);
                if !map.in_bounds(target) {
                    continue;
                }
                pointer.held |= MouseButtons::from(button);
                pointer.hovered = Some(target);
                writer.write(
                    GameCommand::UseBegin {
                        mode: wield_mode(button),
                        target,
                    }
                    .into(),
                );
            }
            PointerEvent::Released { x, y, .. } => pointer.position = (x, y),
            PointerEvent::Moved { x, y } => {
                pointer.position = (x, y);
                if pointer.held.is_empty() {
                    continue;
                }
                let target = viewport.screen_to_world(center, x, y);
                if map.in_bounds(target) && pointer.hovered != Some(target) {
                    pointer.hovered = Some(target);
                    writer.write(GameCommand::UseUpdate(target).into());
                }
            }
            PointerEvent::Scrolled(clicks) => {
                writer.write(GameCommand::SelectAdjacent(scroll_delta(clicks)).into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_delta() {
        assert_eq!(scroll_delta(1), -1);
        assert_eq!(scroll_delta(3), -1);
        assert_eq!(scroll_delta(-2), 1);
    }

    #[test]
    fn test_buttons_from_pointer() {
        let held = MouseButtons::from(PointerButton::Primary) | MouseButtons::from(PointerButton::Secondary);
        assert!(held.contains(MouseButtons::PRIMARY | MouseButtons::SECONDARY));
    }
}
