//! Cell geometry shared by the world, creatures and the view.

pub mod direction;
pub mod grid;
