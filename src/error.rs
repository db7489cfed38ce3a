//! Centralized error types for the game.
//!
//! Startup failures propagate as `GameResult` up to `main`. Failures during a frame are
//! written as `GameError` events and logged by `error_log_system` without stopping the loop.

use bevy_ecs::event::Event;
use glam::IVec2;

use crate::things::Thing;

/// Main error type for the game.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Crafting error: {0}")]
    Crafting(#[from] CraftingError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

/// Errors from querying or editing the world map.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WorldError {
    #[error("Cell {0} is outside the world")]
    OutOfBounds(IVec2),

    #[error("No empty cell within {radius} of {origin}")]
    NoEmptySpot { origin: IVec2, radius: i32 },

    #[error("World size {0} is below the minimum of {1}")]
    TooSmall(u32, u32),
}

/// Errors from inventory bookkeeping.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InventoryError {
    #[error("No room for {0}")]
    Full(Thing),

    #[error("Holding only {have} of {thing}, needed {need}")]
    Insufficient { thing: Thing, have: u32, need: u32 },

    #[error("Slot {0} does not exist")]
    NoSuchSlot(usize),
}

/// Errors from the crafting screen.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CraftingError {
    #[error("Nothing can be made from this arrangement")]
    NoRecipe,

    #[error("Missing ingredient: {0}")]
    MissingIngredient(Thing),

    #[error("No room for the products")]
    NoRoom,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
