//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod components;
pub mod crafting;
pub mod creatures;
pub mod debug;
pub mod hud;
pub mod input;
pub mod plants;
pub mod player;
pub mod pointer;
pub mod profiling;
pub mod render;

pub use self::components::*;
pub use self::crafting::crafting_system;
pub use self::creatures::{creature_system, spawn_creatures, Creature, Diet};
pub use self::debug::{census_system, debug_render_system, error_log_system, Census, DebugState};
pub use self::hud::{crafting_render_system, hud_render_system};
pub use self::input::{input_system, Bindings, WindowFocus};
pub use self::plants::plant_growth_system;
pub use self::player::{player_control_system, player_walk_system, player_wield_system};
pub use self::pointer::{pointer_system, PointerState};
pub use self::profiling::{profile, SystemId, SystemTimings, Timing};
pub use self::render::{fullscreen_system, present_system, world_render_system};
