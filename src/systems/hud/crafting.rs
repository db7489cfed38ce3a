use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{NonSendMut, Query, Res};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::color::{ColorTheme, Role};
use crate::constants::ui::{MATRIX_RANK, SLOT_SIZE};
use crate::crafting::{CraftingState, DragSource};
use crate::error::GameError;
use crate::inventory::Inventory;
use crate::systems::components::PlayerControlled;
use crate::systems::hud::draw_stack;
use crate::systems::pointer::PointerState;
use crate::systems::render::{draw_text_centered, draw_thing, sdl_error};
use crate::things::{Stack, Thing};
use crate::ui::{CraftingLayout, Viewport};

struct Themes {
    window: ColorTheme,
    inventory: ColorTheme,
    matrix: ColorTheme,
    build: ColorTheme,
}

impl Default for Themes {
    fn default() -> Self {
        Self {
            window: ColorTheme::default(),
            inventory: ColorTheme::default().colored(30, 20),
            matrix: ColorTheme::default().colored(200, 20),
            build: ColorTheme::default().colored(120, 40),
        }
    }
}

fn draw_slot(canvas: &mut Canvas<Window>, rect: Rect, theme: ColorTheme, selected: bool) -> Result<(), String> {
    let (body, edge) = if selected {
        (Role::SelectedBackground, Role::SelectedForeground)
    } else {
        (Role::Background, Role::Lowlight)
    };
    canvas.set_draw_color(theme.get(body));
    canvas.fill_rect(rect)?;
    canvas.set_draw_color(theme.get(edge));
    canvas.draw_rect(rect)
}

fn draw_screen(
    canvas: &mut Canvas<Window>,
    layout: &CraftingLayout,
    crafting: &CraftingState,
    inventory: &Inventory,
    pointer: (i32, i32),
) -> Result<(), String> {
    let themes = Themes::default();
    let text = themes.window.get(Role::Foreground);

    canvas.set_draw_color(themes.window.get(Role::Background));
    canvas.fill_rect(layout.window)?;
    canvas.set_draw_color(themes.window.get(Role::Highlight));
    canvas.draw_rect(layout.window)?;

    for (index, stack) in inventory.slots().iter().enumerate() {
        let rect = layout.inventory_slot(index);
        draw_slot(canvas, rect, themes.inventory, index == inventory.selection())?;
        if let Some(stack) = stack {
            draw_stack(canvas, rect, stack, text)?;
        }
    }

    for (index, station) in crafting.catalysts.iter().enumerate() {
        let rect = layout.catalyst_slot(index);
        draw_slot(canvas, rect, themes.window, false)?;
        draw_stack(canvas, rect, &Stack::one(Thing::Station(*station)), text)?;
    }

    canvas.set_draw_color(themes.matrix.get(Role::Background));
    canvas.fill_rect(layout.matrix)?;
    for row in 0..MATRIX_RANK {
        for col in 0..MATRIX_RANK {
            let rect = layout.matrix_slot(row, col);
            draw_slot(canvas, rect, themes.matrix, false)?;
            if let Some(thing) = crafting.matrix[row][col] {
                draw_stack(canvas, rect, &Stack::one(thing), text)?;
                // Mark things the inventory has run out of.
                if inventory.count(&thing) == 0 {
                    canvas.set_draw_color(Color::RGB(200, 0, 0));
                    canvas.draw_rect(rect)?;
                }
            }
        }
    }

    let buildable = crafting.is_buildable(inventory);
    draw_slot(canvas, layout.build, themes.build, buildable)?;
    let label = if buildable {
        themes.build.get(Role::Foreground)
    } else {
        themes.build.get(Role::Lowlight)
    };
    let center = (layout.build.center().x(), layout.build.center().y());
    draw_text_centered(canvas, center, "<--", label)?;

    for (index, product) in crafting.products.iter().enumerate() {
        let rect = layout.product_slot(index);
        draw_slot(canvas, rect, themes.build, buildable)?;
        draw_stack(canvas, rect, product, text)?;
    }

    // The dragged thing follows the pointer, centred on it.
    let dragged = match crafting.drag {
        Some(DragSource::Inventory(i)) => inventory.slot(i).copied(),
        Some(DragSource::Matrix(thing)) => Some(Stack::one(thing)),
        Some(DragSource::Products) => crafting.products.first().copied(),
        None => None,
    };
    if let Some(stack) = dragged {
        let half = SLOT_SIZE as i32 / 2;
        let rect = Rect::new(pointer.0 - half, pointer.1 - half, SLOT_SIZE, SLOT_SIZE);
        draw_thing(canvas, rect, &stack)?;
    }
    Ok(())
}

/// Draws the crafting screen over everything but the debug overlay, while it is open.
pub fn crafting_render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    viewport: Res<Viewport>,
    crafting: Res<CraftingState>,
    pointer: Res<PointerState>,
    players: Query<&Inventory, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    if !crafting.open {
        return;
    }
    let Ok(inventory) = players.single() else {
        return;
    };

    let layout = CraftingLayout::new(viewport.width(), viewport.height());
    if let Err(e) = draw_screen(&mut canvas, &layout, &crafting, inventory, pointer.position) {
        errors.write(sdl_error(e));
    }
}
