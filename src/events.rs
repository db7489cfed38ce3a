use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::map::direction::Direction;
use crate::systems::components::WieldMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    WalkBegin(Direction),
    WalkEnd(Direction),
    /// Start using the selected item on a world cell.
    UseBegin { mode: WieldMode, target: IVec2 },
    /// Start using the tool on the cell next to the player.
    ActBegin(Direction),
    ActEnd,
    /// The held button was dragged onto another cell.
    UseUpdate(IVec2),
    UseEnd(WieldMode),
    SelectSlot(usize),
    SelectAdjacent(i32),
    Zoom(i8),
    ToggleCrafting,
    Craft,
    Census,
    ToggleDebug,
    ToggleFullscreen,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The window's drawable area changed size.
    Resized { width: u32, height: u32 },
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button: swing the tool, or drag on the crafting screen.
    Primary,
    /// Right button: place material.
    Secondary,
}

/// Raw mouse input in window pixels; routed to the world, the hotbar, or the crafting screen.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed { button: PointerButton, x: i32, y: i32 },
    Released { button: PointerButton, x: i32, y: i32 },
    Moved { x: i32, y: i32 },
    /// Wheel clicks; positive is away from the user.
    Scrolled(i32),
}
