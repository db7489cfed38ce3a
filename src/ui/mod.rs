//! Screen geometry: the world viewport and the widget layouts drawn over it.

pub mod layout;
pub mod viewport;

pub use layout::{hotbar_hit, hotbar_slot, CraftingLayout, CraftingTarget};
pub use viewport::Viewport;
