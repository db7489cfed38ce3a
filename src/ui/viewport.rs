//! Mapping between window pixels and world cells for the player-centred view.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use sdl2::rect::Rect;

use crate::constants::ui::{BASE_TILE, DEFAULT_ZOOM, ZOOM_RANGE};
use crate::map::grid::{ceildiv, CellRect};

/// The window's drawable size and the current zoom power.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    zoom: u8,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Edge of one cell in pixels: `4·2^zoom`.
    pub fn tile_size(&self) -> i32 {
        (BASE_TILE << self.zoom) as i32
    }

    /// Changes the zoom power by `delta`, staying within range. Returns whether it changed.
    pub fn zoom_by(&mut self, delta: i8) -> bool {
        let zoom = (self.zoom as i16 + delta as i16).clamp(*ZOOM_RANGE.start() as i16, *ZOOM_RANGE.end() as i16) as u8;
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    /// The cells drawn when the view is centred on `center`. May extend past the world's edges.
    pub fn visible(&self, center: IVec2) -> CellRect {
        let tile = self.tile_size();
        let half_cols = ceildiv(self.width as i32, tile * 2);
        let half_rows = ceildiv(self.height as i32, tile * 2);
        CellRect::new(
            center.x - half_cols,
            center.y - half_rows,
            2 * half_cols + 1,
            2 * half_rows + 1,
        )
    }

    /// The cell under window pixel `(x, y)`.
    pub fn screen_to_world(&self, center: IVec2, x: i32, y: i32) -> IVec2 {
        let origin = self.visible(center);
        let tile = self.tile_size();
        IVec2::new(origin.left + x.div_euclid(tile), origin.top + y.div_euclid(tile))
    }

    /// Where `cell` is drawn in the window.
    pub fn cell_rect(&self, center: IVec2, cell: IVec2) -> Rect {
        let origin = self.visible(center);
        let tile = self.tile_size();
        Rect::new(
            (cell.x - origin.left) * tile,
            (cell.y - origin.top) * tile,
            tile as u32,
            tile as u32,
        )
    }
}
