//! This module contains all the constants used in the game.

use std::time::Duration;

/// One second of simulated time, in milliseconds. All game clocks count milliseconds.
pub const SECOND: u32 = 1000;

/// Frame budget at normal speed.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);
/// Frame budget while overclocked; fewer, larger steps.
pub const OVERCLOCKED_LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 12.0) as u64);

/// The window title.
pub const TITLE: &str = "SquareWorldCraft";

/// Space left around the window when sizing it from the desktop display mode, in pixels.
pub const WINDOW_MARGIN: u32 = 96;

/// World generation and growth tunables.
pub mod world {
    /// Default world edge length, in cells.
    pub const DEFAULT_SIZE: u32 = 1000;
    /// The rock plots are up to 128 cells wide, so smaller worlds would clip every one of them.
    pub const MIN_SIZE: u32 = 200;
    /// Keeps the cell count comfortably inside `u32` and the grids in memory.
    pub const MAX_SIZE: u32 = 4000;

    /// Cells per sand (and per water) plot.
    pub const CELLS_PER_TERRAIN_PLOT: u32 = 10_000;
    /// Cells per loose thing of each basic material.
    pub const CELLS_PER_LOOSE_THING: u32 = 400;
    /// Grass is this many times as common as the other loose things.
    pub const GRASS_MULTIPLIER: u32 = 100;
    /// Cells per clay bed.
    pub const CELLS_PER_CLAY_BED: u32 = 50_000;
    /// Cells per rock outcrop.
    pub const CELLS_PER_ROCK: u32 = 5_000;
    /// Rock cells per ore vein.
    pub const ROCK_CELLS_PER_VEIN: u32 = 120;
    /// Longest an ore vein may grow.
    pub const MAX_VEIN_SIZE: usize = 12;
    /// In-situ stone stacks this deep inside rock outcrops.
    pub const ROCK_DEPTH: u32 = 2;

    /// Side range of sand, water and clay plots (end exclusive).
    pub const PLOT_SIDE: std::ops::Range<i32> = 12..64;
    /// Side range of rock outcrops (end exclusive).
    pub const ROCK_SIDE: std::ops::Range<i32> = 12..128;
    /// Plots are unlit this far inside their edge.
    pub const DARK_INSET: i32 = 4;

    /// Creature spawn attempts for a 1000×1000 world; scaled by area.
    pub const CREATURES_PER_MEGACELL: u64 = 800;

    /// Revealing a cell also lights its neighbours within this Chebyshev radius.
    pub const LIGHT_RADIUS: i32 = 2;
    /// How far `find_empty_spot_near` searches.
    pub const MAX_SEARCH_RADIUS: i32 = 99;

    /// One grass blade grows per this many milliseconds, on average.
    pub const GRASS_GROWTH_PERIOD: u32 = 500;
}

/// Creature metabolism.
pub mod creature {
    use super::SECOND;

    /// Energy spent per millisecond.
    pub const ENERGY_EXPENDITURE: u32 = 1;
    /// Only a tenth of an eaten creature's energy is gained.
    pub const DIGESTION_INEFFICIENCY: u32 = 10;
    /// Below this energy a creature is dead.
    pub const MIN_VIABLE_ENERGY: u32 = DIGESTION_INEFFICIENCY * ENERGY_EXPENDITURE * 120 * SECOND;

    /// Slowest and fastest walking speed, in cells per second.
    pub const SPEED_RANGE: std::ops::Range<f32> = 0.25..4.0;

    pub const HERBIVORE_MARGIN: u32 = 30 * SECOND;
    pub const CARNIVORE_MARGIN: u32 = 120 * SECOND;
    pub const CARNIVORE_SPEED_FACTOR: f32 = 1.5;
    /// Energy gained from one grass blade or vine.
    pub const PLANT_ENERGY: u32 = 20 * SECOND;

    /// Manhattan radius within which predators and prey are noticed.
    pub const SENSE_RADIUS: i32 = 20;
    /// Fraction of herbivores among spawned creatures, as a ratio.
    pub const HERBIVORE_SHARE: (u32, u32) = (3, 4);
    /// One in this many walks abandons the current heading.
    pub const TURN_CHANCE: u32 = 5;
}

/// Player tunables.
pub mod player {
    use super::SECOND;

    pub const STEP_TIME: u32 = SECOND / 6;
    pub const DM_STEP_TIME: u32 = SECOND / 30;
    pub const INVENTORY_SLOTS: usize = 40;
    pub const HOTBAR_SLOTS: usize = 10;
    pub const STACK_SIZE: u32 = 999;
    pub const START: (i32, i32) = (10, 10);
}

/// Layout and presentation.
pub mod ui {
    pub const ZOOM_RANGE: std::ops::RangeInclusive<u8> = 0..=5;
    pub const DEFAULT_ZOOM: u8 = 3;
    /// Smallest tile edge, at zoom 0, in pixels.
    pub const BASE_TILE: u32 = 4;

    pub const HOTBAR_GAP: u32 = 2;
    pub const CRAFTING_MARGIN: i32 = 16;
    pub const PANEL_PADDING: i32 = 4;
    pub const SLOT_SIZE: u32 = 64;
    pub const INVENTORY_ROWS: usize = 10;
    pub const MATRIX_RANK: usize = 4;
    pub const STRIP_HEIGHT: u32 = 64;

    /// Height of the built-in 8×8 font.
    pub const GLYPH: i32 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_viable_energy() {
        assert_eq!(creature::MIN_VIABLE_ENERGY, 1_200_000);
    }

    #[test]
    fn test_min_world_fits_rock() {
        assert!(world::MIN_SIZE as i32 >= world::ROCK_SIDE.end);
    }

    #[test]
    fn test_world_sizes() {
        assert!((world::MIN_SIZE..=world::MAX_SIZE).contains(&world::DEFAULT_SIZE));
        assert!(world::MAX_SIZE.checked_mul(world::MAX_SIZE).is_some());
    }

    #[test]
    fn test_hotbar_within_inventory() {
        assert!(player::HOTBAR_SLOTS <= player::INVENTORY_SLOTS);
        assert_eq!(player::INVENTORY_SLOTS % ui::INVENTORY_ROWS, 0);
    }

    #[test]
    fn test_loop_times() {
        assert!(OVERCLOCKED_LOOP_TIME > LOOP_TIME);
        assert_eq!(LOOP_TIME.as_millis(), 16);
    }

    #[test]
    fn test_default_zoom_in_range() {
        assert!(ui::ZOOM_RANGE.contains(&ui::DEFAULT_ZOOM));
    }
}
