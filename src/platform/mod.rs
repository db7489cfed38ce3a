//! Platform abstraction layer: frame sleeping, log setup, and entropy.

mod desktop;
pub use desktop::*;
