use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::Sdl;
use tracing::{debug, info, trace, warn};

use crate::config::Options;
use crate::constants::{TITLE, WINDOW_MARGIN};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::Game;
use crate::platform;
use crate::systems::WindowFocus;
use crate::world::generation::generate;

/// Smallest window the layout still works in.
const MIN_WINDOW: (u32, u32) = (640, 480);

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    loop_time: Duration,
    overclock: u32,
    // Dropping the context would shut the video subsystem down under the canvas.
    _sdl_context: Sdl,
}

/// A centred bar filled to `fraction`, shown while the world generates.
/// The desktop size less a margin, but never below the smallest usable window.
pub fn window_size(display_width: i32, display_height: i32) -> (u32, u32) {
    let fit = |edge: i32, min: u32| (edge.max(0) as u32).saturating_sub(WINDOW_MARGIN).max(min);
    (fit(display_width, MIN_WINDOW.0), fit(display_height, MIN_WINDOW.1))
}

fn draw_progress(canvas: &mut Canvas<Window>, fraction: f32) -> Result<(), String> {
    let (width, height) = canvas.output_size()?;
    let outline = Rect::new(width as i32 / 4, height as i32 / 2 - 12, (width / 2).max(1), 24);
    let fill = (outline.width() as f32 * fraction.clamp(0.0, 1.0)) as u32;

    canvas.set_draw_color(Color::RGB(0, 0, 0));
    canvas.clear();
    if fill > 0 {
        canvas.set_draw_color(Color::RGB(0, 160, 0));
        canvas.fill_rect(Rect::new(outline.x(), outline.y(), fill, outline.height()))?;
    }
    canvas.set_draw_color(Color::RGB(255, 255, 255));
    canvas.draw_rect(outline)?;
    canvas.present();
    Ok(())
}

impl App {
    /// Initializes SDL, opens the window, generates the world, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from world generation and `Game::new()`.
    pub fn new(options: &Options) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(|e| GameError::Sdl(e.to_string()))?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(|e| GameError::Sdl(e.to_string()))?;
        let mut event_pump = sdl_context.event_pump().map_err(|e| GameError::Sdl(e.to_string()))?;

        let mode = video_subsystem
            .desktop_display_mode(0)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        let (width, height) = window_size(mode.w, mode.h);

        trace!(width, height, display_width = mode.w, display_height = mode.h, "Creating game window");
        let window = video_subsystem
            .window(TITLE, width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        trace!("Creating hardware-accelerated canvas");
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let seed = options.seed.unwrap_or_else(platform::random_seed);
        info!(seed, size = options.world_size, "Seeding world");
        let mut rng = SmallRng::seed_from_u64(seed);

        let generated = generate(options.world_size, &mut rng, |fraction| {
            // Keep the window responsive while generation runs.
            event_pump.pump_events();
            if let Err(e) = draw_progress(&mut canvas, fraction) {
                warn!(error = %e, "Could not draw generation progress");
            }
        })?;

        let game = Game::new(canvas, event_pump, options, generated, rng)?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            last_tick: Instant::now(),
            loop_time: options.loop_time(),
            overclock: options.overclock,
            _sdl_context: sdl_context,
        })
    }

    pub fn loop_time(&self) -> Duration {
        self.loop_time
    }

    /// Executes a single frame, then sleeps out whatever is left of the frame budget.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        formatter::increment_tick();

        if self.game.tick(dt * self.overclock as f32) {
            return false;
        }

        let focused = self.game.world.get_resource::<WindowFocus>().is_none_or(|f| f.0);
        if start.elapsed() < self.loop_time {
            let time = self.loop_time.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, focused);
            }
        }

        true
    }
}
