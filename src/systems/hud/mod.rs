//! Widgets drawn over the world: the hotbar, the status line, and the crafting screen.

pub mod crafting;
pub mod hotbar;

pub use self::crafting::*;
pub use self::hotbar::*;

use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::constants::ui::GLYPH;
use crate::systems::render::draw_thing;
use crate::things::Stack;

/// Cuts `text` down to as many glyphs as fit in `width` pixels.
pub fn fit_label(text: &str, width: u32) -> &str {
    let glyphs = (width as i32 / GLYPH).max(0) as usize;
    match text.char_indices().nth(glyphs) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// A slot's contents: the icon, the name along the top, and the count in the bottom-right corner.
pub(crate) fn draw_stack(canvas: &mut Canvas<Window>, rect: Rect, stack: &Stack, text: Color) -> Result<(), String> {
    let pad = 2;
    let icon_side = (rect.height() as i32 - 2 * (GLYPH + pad)).max(GLYPH) as u32;
    let icon = Rect::new(
        rect.center().x() - icon_side as i32 / 2,
        rect.center().y() - icon_side as i32 / 2,
        icon_side,
        icon_side,
    );
    draw_thing(canvas, icon, stack)?;

    let name = stack.thing.to_string();
    canvas.string(
        (rect.x() + pad) as i16,
        (rect.y() + pad) as i16,
        fit_label(&name, rect.width().saturating_sub(2 * pad as u32)),
        text,
    )?;

    if stack.count > 1 {
        let count = stack.count.to_string();
        let x = rect.right() - pad - count.len() as i32 * GLYPH;
        canvas.string(x as i16, (rect.bottom() - pad - GLYPH) as i16, &count, text)?;
    }
    Ok(())
}
