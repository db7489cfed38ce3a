//! Diagnostics: the error log, the census log line, and the timing overlay.

use bevy_ecs::prelude::*;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use tracing::{info, warn};

use crate::constants::ui::GLYPH;
use crate::error::GameError;
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{PlayerControlled, Position};
use crate::systems::creatures::{Creature, Diet};
use crate::systems::profiling::{SystemTimings, Timing};
use crate::systems::render::sdl_error;

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugState {
    pub enabled: bool,
}

/// Living creatures by diet, plus the dead ones not yet eaten.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Census {
    pub herbivores: usize,
    pub carnivores: usize,
    pub dead: usize,
}

impl Census {
    pub fn take<'a>(creatures: impl IntoIterator<Item = &'a Creature>) -> Self {
        creatures.into_iter().fold(Census::default(), |mut census, creature| {
            match (creature.is_alive(), creature.diet) {
                (false, _) => census.dead += 1,
                (true, Diet::Herbivore) => census.herbivores += 1,
                (true, Diet::Carnivore) => census.carnivores += 1,
            }
            census
        })
    }

    pub fn total(&self) -> usize {
        self.herbivores + self.carnivores + self.dead
    }
}

/// Frame errors are reported and play goes on.
pub fn error_log_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        warn!(%error, "Frame error");
    }
}

pub fn census_system(
    mut events: EventReader<GameEvent>,
    player: Query<&Position, With<PlayerControlled>>,
    creatures: Query<&Creature>,
) {
    let requested = events
        .read()
        .filter(|e| **e == GameEvent::Command(GameCommand::Census))
        .count();
    if requested == 0 {
        return;
    }

    let census = Census::take(creatures.iter());
    let at = player.single().map(|p| p.0).ok();
    info!(
        player = ?at,
        animals = census.total(),
        herbivores = census.herbivores,
        carnivores = census.carnivores,
        dead = census.dead,
        "Census"
    );
}

fn draw_timings(canvas: &mut Canvas<Window>, lines: &[String]) -> Result<(), String> {
    let padding = 10;
    let line_height = GLYPH + 2;
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32 * GLYPH;
    if width == 0 {
        return Ok(());
    }

    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(40, 40, 40, 180));
    canvas.fill_rect(Rect::new(
        padding - 5,
        padding - 5,
        (width + 10) as u32,
        (lines.len() as i32 * line_height + 5) as u32,
    ))?;
    canvas.set_blend_mode(BlendMode::None);

    for (i, line) in lines.iter().enumerate() {
        canvas.string(
            padding as i16,
            (padding + i as i32 * line_height) as i16,
            line,
            Color::RGBA(255, 255, 255, 220),
        )?;
    }
    Ok(())
}

/// Per-system timings in the top-left corner, drawn over everything else.
pub fn debug_render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    debug_state: Res<DebugState>,
    timings: Res<SystemTimings>,
    timing: Res<Timing>,
    mut errors: EventWriter<GameError>,
) {
    if !debug_state.enabled {
        return;
    }
    // The current frame is still running; report the one before it.
    let tick = timing.get_current_tick().saturating_sub(1);
    let lines = timings.format_timing_display(tick);
    if let Err(e) = draw_timings(&mut canvas, &lines) {
        errors.write(sdl_error(e));
    }
}
