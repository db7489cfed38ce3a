use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::{app::App, config::Options};

mod app;
mod color;
mod config;
mod constants;
mod crafting;
mod error;
mod events;
mod formatter;
mod game;
mod inventory;
mod map;
mod platform;
mod systems;
mod things;
mod ui;
mod world;

/// The main entry point of the application.
///
/// Parses the options, sets up logging, opens the window, generates the world, and runs the
/// game loop until the player quits.
pub fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    platform::init_logging(options.debug).context("Could not initialize logging")?;

    let mut app = App::new(&options).context("Could not create app")?;

    info!(loop_time = ?app.loop_time(), overclock = options.overclock, "Starting game loop");

    loop {
        if !app.run() {
            break;
        }
    }

    info!("Exiting");
    Ok(())
}
