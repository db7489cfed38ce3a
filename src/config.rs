//! Command-line options.

use std::time::Duration;

use clap::Parser;

use crate::constants::world::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::constants::{LOOP_TIME, OVERCLOCKED_LOOP_TIME};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "squareworldcraft")]
#[command(about = "A top-down 2D sandbox crafting game")]
pub struct Options {
    /// Verbose logging, with the timing overlay shown from the start
    #[arg(long)]
    pub debug: bool,

    /// Dungeon master: start with tools and stations, and walk faster
    #[arg(long)]
    pub dm: bool,

    /// Simulated milliseconds per real millisecond
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub overclock: u32,

    /// Seed for world generation and the simulation; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of the square world, in cells
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    pub world_size: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debug: false,
            dm: false,
            overclock: 1,
            seed: None,
            world_size: DEFAULT_SIZE,
        }
    }
}

impl Options {
    /// Overclocked runs take fewer, larger steps.
    pub fn loop_time(&self) -> Duration {
        if self.overclock > 1 {
            OVERCLOCKED_LOOP_TIME
        } else {
            LOOP_TIME
        }
    }
}
