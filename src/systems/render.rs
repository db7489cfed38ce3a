//! Drawing the world view, and presenting the finished frame.

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{NonSendMut, Query, Res},
};
use glam::IVec2;
use sdl2::{
    gfx::primitives::DrawRenderer,
    pixels::Color,
    rect::Rect,
    render::Canvas,
    video::{FullscreenType, Window},
};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    constants::ui::GLYPH,
    error::GameError,
    events::{GameCommand, GameEvent},
    systems::{
        components::{PlayerControlled, Position},
        creatures::Creature,
    },
    things::Stack,
    ui::Viewport,
    world::WorldMap,
};

/// Pixels the drop shadow of a loose thing is offset by.
const DROP_SHADOW: i32 = 2;

pub(crate) fn sdl_error(e: impl ToString) -> GameError {
    GameError::Sdl(e.to_string())
}

/// Beyond the world's edge, a rippling sea.
pub fn out_of_bounds_color(cell: IVec2) -> Color {
    let ripple = |v: i32| ((v.rem_euclid(8) as f32 * TAU / 8.0).sin() * 8.0 + 247.0) as u8;
    Color::RGB(0, ripple(cell.y), ripple(cell.x))
}

/// Width of a harvest progress bar's fill, out of `width` pixels.
pub fn progress_fill(width: u32, progress: u32, energy: u32) -> u32 {
    if energy == 0 {
        return width;
    }
    (width as u64 * progress.min(energy) as u64 / energy as u64) as u32
}

/// Draws `text` centred on `center` in the built-in 8×8 font.
pub(crate) fn draw_text_centered(canvas: &Canvas<Window>, center: (i32, i32), text: &str, color: Color) -> Result<(), String> {
    let width = text.chars().count() as i32 * GLYPH;
    canvas.string(
        (center.0 - width / 2) as i16,
        (center.1 - GLYPH / 2) as i16,
        text,
        color,
    )
}

/// An item icon: a flat square for things in situ, otherwise an inset square with a drop shadow
/// and its symbol on top.
pub(crate) fn draw_thing(canvas: &mut Canvas<Window>, rect: Rect, stack: &Stack) -> Result<(), String> {
    let color = stack.thing.color();
    if stack.thing.is_in_situ() || (rect.width() as i32) < DROP_SHADOW * 4 {
        canvas.set_draw_color(color);
        return canvas.fill_rect(rect);
    }

    let inset = (rect.width() as i32 / 8).max(1);
    let side = (rect.width() as i32 - 2 * inset - DROP_SHADOW).max(1) as u32;
    let face = Rect::new(rect.x() + inset, rect.y() + inset, side, side);

    canvas.set_draw_color(Color::RGB(0, 0, 0));
    canvas.fill_rect(Rect::new(face.x() + DROP_SHADOW, face.y() + DROP_SHADOW, side, side))?;
    canvas.set_draw_color(color);
    canvas.fill_rect(face)?;

    if let Some(symbol) = stack.thing.symbol() {
        if face.width() as i32 >= GLYPH * 2 {
            let center = (face.center().x(), face.center().y());
            draw_text_centered(canvas, center, symbol, Color::RGB(0, 0, 0))?;
        }
    }
    Ok(())
}

fn draw_disc(canvas: &Canvas<Window>, center: (i32, i32), radius: i32, color: Color) -> Result<(), String> {
    let (x, y, r) = (center.0 as i16, center.1 as i16, radius.max(1) as i16);
    canvas.filled_circle(x, y, r, color)?;
    canvas.circle(x, y, r, Color::RGB(0, 0, 0))
}

fn draw_world(
    canvas: &mut Canvas<Window>,
    map: &WorldMap,
    viewport: &Viewport,
    center: IVec2,
    creatures: &HashMap<IVec2, SmallVec<[Color; 2]>>,
) -> Result<(), String> {
    let tile = viewport.tile_size();

    for cell in viewport.visible(center).cells() {
        let rect = viewport.cell_rect(center, cell);
        let ground = if !map.in_bounds(cell) {
            out_of_bounds_color(cell)
        } else if !map.is_lit(cell) {
            Color::RGB(0, 0, 0)
        } else {
            map.terrain_at(cell).map(|t| t.color()).unwrap_or(Color::RGB(0, 0, 0))
        };
        canvas.set_draw_color(ground);
        canvas.fill_rect(rect)?;

        if !map.is_lit(cell) {
            continue;
        }

        if let Some(stack) = map.things_at(cell) {
            draw_thing(canvas, rect, &stack)?;

            let progress = map.progress_at(cell);
            if progress > 0 {
                let bar = Rect::new(
                    rect.x() + 2,
                    rect.y() + 2,
                    (tile - 4).max(1) as u32,
                    (tile / 8).max(2) as u32,
                );
                canvas.set_draw_color(Color::RGB(0, 0, 0));
                canvas.fill_rect(bar)?;
                let fill = progress_fill(bar.width().saturating_sub(2), progress, stack.thing.energy_to_harvest());
                if fill > 0 {
                    canvas.set_draw_color(Color::RGB(0, 255, 0));
                    canvas.fill_rect(Rect::new(bar.x(), bar.y(), fill, bar.height().saturating_sub(2).max(1)))?;
                }
            }
        }

        let mid = (rect.center().x(), rect.center().y());
        if cell == center {
            draw_disc(canvas, mid, tile * 2 / 6, Color::RGB(255, 255, 0))?;
        }
        if let Some(colors) = creatures.get(&cell) {
            for color in colors {
                draw_disc(canvas, mid, tile * 3 / 12, *color)?;
            }
        }
    }
    Ok(())
}

/// Draws the cells around the player, the things on them, creatures, and the player.
pub fn world_render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    map: Res<WorldMap>,
    viewport: Res<Viewport>,
    player: Query<&Position, With<PlayerControlled>>,
    creatures: Query<(&Position, &Creature), Without<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    canvas.set_draw_color(Color::RGB(0, 0, 0));
    canvas.clear();

    let Ok(center) = player.single().map(|p| p.0) else {
        return;
    };

    let visible = viewport.visible(center);
    let mut creature_colors: HashMap<IVec2, SmallVec<[Color; 2]>> = HashMap::new();
    for (position, creature) in creatures.iter() {
        if visible.contains(position.0) {
            creature_colors.entry(position.0).or_default().push(creature.color());
        }
    }

    if let Err(e) = draw_world(&mut canvas, &map, &viewport, center, &creature_colors) {
        errors.write(sdl_error(e));
    }
}

/// Switches between a window and borderless desktop fullscreen.
pub fn fullscreen_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    mut events: EventReader<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        if *event != GameEvent::Command(GameCommand::ToggleFullscreen) {
            continue;
        }
        let window = canvas.window_mut();
        let next = match window.fullscreen_state() {
            FullscreenType::Off => FullscreenType::Desktop,
            _ => FullscreenType::Off,
        };
        match window.set_fullscreen(next) {
            Ok(()) => debug!(state = ?next, "Fullscreen toggled"),
            Err(e) => {
                errors.write(sdl_error(e));
            }
        }
    }
}

pub fn present_system(mut canvas: NonSendMut<&'static mut Canvas<Window>>) {
    canvas.present();
}
