//! SquareWorldCraft game library crate.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod crafting;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod inventory;
pub mod map;
pub mod platform;
pub mod systems;
pub mod things;
pub mod ui;
pub mod world;
