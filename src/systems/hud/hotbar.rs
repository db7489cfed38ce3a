use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{NonSendMut, Query, Res};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::color::hsv_to_rgb;
use crate::constants::player::HOTBAR_SLOTS;
use crate::constants::ui::GLYPH;
use crate::error::GameError;
use crate::inventory::Inventory;
use crate::systems::components::{DeltaTime, PlayerControlled, Settings};
use crate::systems::hud::draw_stack;
use crate::systems::render::sdl_error;
use crate::ui::{hotbar_slot, Viewport};

/// The bottom-right status line: window size, real frame time, and frame rate.
///
/// `sim_millis` is the simulated frame time; dividing by the overclock factor gives wall time.
pub fn status_text(width: u32, height: u32, sim_millis: u32, overclock: u32) -> String {
    let dt = sim_millis / overclock.max(1);
    let fps = if dt == 0 { 0 } else { 1000 / dt };
    format!("{width:4}x{height:<4}, {dt:4} ms, {fps:3} fps")
}

fn draw_hotbar(canvas: &mut Canvas<Window>, height: u32, inventory: &Inventory) -> Result<(), String> {
    let body = hsv_to_rgb(30, 10, 80);
    let frame = hsv_to_rgb(30, 20, 70);
    let selected = hsv_to_rgb(60, 40, 90);

    for index in 0..HOTBAR_SLOTS.min(inventory.len()) {
        let rect = hotbar_slot(height, index);
        canvas.set_draw_color(if index == inventory.selection() { selected } else { body });
        canvas.fill_rect(rect)?;
        canvas.set_draw_color(frame);
        canvas.draw_rect(rect)?;

        if let Some(stack) = inventory.slot(index) {
            draw_stack(canvas, rect, stack, Color::RGB(0, 0, 0))?;
        }
    }
    Ok(())
}

pub fn hud_render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    viewport: Res<Viewport>,
    delta_time: Res<DeltaTime>,
    settings: Res<Settings>,
    players: Query<&Inventory, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (width, height) = (viewport.width(), viewport.height());

    if let Ok(inventory) = players.single() {
        if let Err(e) = draw_hotbar(&mut canvas, height, inventory) {
            errors.write(sdl_error(e));
        }
    }

    let status = status_text(width, height, delta_time.millis, settings.overclock);
    let x = width as i32 - status.chars().count() as i32 * GLYPH;
    let y = height as i32 - GLYPH;
    if let Err(e) = canvas.string(x as i16, y as i16, &status, Color::RGB(255, 255, 0)) {
        errors.write(sdl_error(e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(1600, 900, 16, 1), "1600x900 ,   16 ms,  62 fps");
    }

    #[test]
    fn test_status_text_overclocked() {
        assert_eq!(status_text(800, 600, 830, 10), " 800x600 ,   83 ms,  12 fps");
        assert_eq!(status_text(800, 600, 0, 1), " 800x600 ,    0 ms,   0 fps");
    }
}
