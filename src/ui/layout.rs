//! Pixel layout of the hotbar and the crafting screen, plus hit testing.

use sdl2::rect::Rect;

use crate::constants::player::HOTBAR_SLOTS;
use crate::constants::ui::{CRAFTING_MARGIN, HOTBAR_GAP, INVENTORY_ROWS, MATRIX_RANK, PANEL_PADDING, SLOT_SIZE, STRIP_HEIGHT};

/// Edge of a hotbar slot for a window `height` pixels tall.
pub fn hotbar_slot_size(height: u32) -> u32 {
    (height / HOTBAR_SLOTS as u32).saturating_sub(HOTBAR_GAP).max(1)
}

/// The hotbar is a column of slots down the left edge.
pub fn hotbar_slot(height: u32, index: usize) -> Rect {
    let size = hotbar_slot_size(height);
    Rect::new(0, (index as u32 * (size + HOTBAR_GAP)) as i32, size, size)
}

pub fn hotbar_hit(height: u32, x: i32, y: i32) -> Option<usize> {
    (0..HOTBAR_SLOTS).find(|i| hotbar_slot(height, *i).contains_point((x, y)))
}

/// What lies under the pointer on the crafting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftingTarget {
    Inventory(usize),
    Matrix(usize, usize),
    Build,
    Product(usize),
    /// Inside the window but on no control.
    Background,
    Outside,
}

/// Panel rectangles of the crafting screen for one window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftingLayout {
    pub window: Rect,
    pub inventory: Rect,
    pub catalysts: Rect,
    pub matrix: Rect,
    pub build: Rect,
    pub products: Rect,
    inventory_slot: u32,
}

fn inset(rect: Rect, by: i32) -> Rect {
    Rect::new(
        rect.x() + by,
        rect.y() + by,
        (rect.width() as i32 - 2 * by).max(1) as u32,
        (rect.height() as i32 - 2 * by).max(1) as u32,
    )
}

impl CraftingLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let window = inset(Rect::new(0, 0, width.max(1), height.max(1)), CRAFTING_MARGIN);
        let inner = inset(window, PANEL_PADDING);
        let third = (inner.width() / 3).max(1);

        let inventory = Rect::new(inner.x(), inner.y(), third, inner.height());
        let catalysts = Rect::new(inventory.right(), inner.y(), third, STRIP_HEIGHT);
        let matrix = Rect::new(
            inventory.right(),
            catalysts.bottom() + 2 * PANEL_PADDING,
            third,
            (inner.height() / 2).max(1),
        );
        let build = Rect::new(matrix.x(), matrix.bottom(), SLOT_SIZE, STRIP_HEIGHT);
        let products = Rect::new(
            matrix.x() + SLOT_SIZE as i32,
            matrix.bottom(),
            matrix.width().saturating_sub(SLOT_SIZE).max(1),
            STRIP_HEIGHT,
        );

        let rows = INVENTORY_ROWS as u32;
        let inventory_slot = if rows * SLOT_SIZE > inventory.height() {
            (inventory.height() / rows).max(1)
        } else {
            SLOT_SIZE
        };

        Self {
            window,
            inventory,
            catalysts,
            matrix,
            build,
            products,
            inventory_slot,
        }
    }

    /// Inventory slots fill columns of ten, top to bottom.
    pub fn inventory_slot(&self, index: usize) -> Rect {
        let size = self.inventory_slot;
        let col = (index / INVENTORY_ROWS) as u32;
        let row = (index % INVENTORY_ROWS) as u32;
        Rect::new(
            self.inventory.x() + (col * size) as i32,
            self.inventory.y() + (row * size) as i32,
            size,
            size,
        )
    }

    /// The matrix grid is centred in its panel.
    pub fn matrix_slot(&self, row: usize, col: usize) -> Rect {
        let span = (MATRIX_RANK as u32 * SLOT_SIZE) as i32;
        let left = self.matrix.x() + (self.matrix.width() as i32 - span) / 2;
        let top = self.matrix.y() + (self.matrix.height() as i32 - span) / 2;
        Rect::new(
            left + col as i32 * SLOT_SIZE as i32,
            top + row as i32 * SLOT_SIZE as i32,
            SLOT_SIZE,
            SLOT_SIZE,
        )
    }

    pub fn catalyst_slot(&self, index: usize) -> Rect {
        Rect::new(
            self.catalysts.x() + (index as u32 * SLOT_SIZE) as i32,
            self.catalysts.y(),
            SLOT_SIZE,
            SLOT_SIZE,
        )
    }

    pub fn product_slot(&self, index: usize) -> Rect {
        Rect::new(
            self.products.x() + (index as u32 * SLOT_SIZE) as i32,
            self.products.y(),
            SLOT_SIZE,
            SLOT_SIZE,
        )
    }

    /// Finds the control under `(x, y)`; `slots` is the inventory size, `products` the product count.
    pub fn hit(&self, x: i32, y: i32, slots: usize, products: usize) -> CraftingTarget {
        let p = (x, y);
        if !self.window.contains_point(p) {
            return CraftingTarget::Outside;
        }
        if let Some(i) = (0..slots).find(|i| self.inventory_slot(*i).contains_point(p)) {
            return CraftingTarget::Inventory(i);
        }
        for row in 0..MATRIX_RANK {
            for col in 0..MATRIX_RANK {
                if self.matrix_slot(row, col).contains_point(p) {
                    return CraftingTarget::Matrix(row, col);
                }
            }
        }
        if self.build.contains_point(p) {
            return CraftingTarget::Build;
        }
        if let Some(i) = (0..products).find(|i| self.product_slot(*i).contains_point(p)) {
            return CraftingTarget::Product(i);
        }
        CraftingTarget::Background
    }
}
