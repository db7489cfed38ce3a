//! Dense row-major grids and integer rectangle helpers.

use glam::IVec2;

/// Integer division rounding towards positive infinity.
pub fn ceildiv(a: i32, b: i32) -> i32 {
    -(-a).div_euclid(b)
}

/// `|dx| + |dy|`.
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// `max(|dx|, |dy|)`; the number of king moves between two cells.
pub fn chebyshev(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// An axis-aligned rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// Grows the rectangle by `dx` on the left and right, `dy` on the top and bottom.
    /// Negative values shrink it; the size never drops below zero.
    pub fn inflate(&self, dx: i32, dy: i32) -> CellRect {
        let width = (self.width + 2 * dx).max(0);
        let height = (self.height + 2 * dy).max(0);
        CellRect::new(self.left - dx, self.top - dy, width, height)
    }

    /// The overlap of two rectangles, possibly empty.
    pub fn clip(&self, other: &CellRect) -> CellRect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        CellRect::new(left, top, (right - left).max(0), (bottom - top).max(0))
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> {
        let (left, right) = (self.left, self.right());
        (self.top..self.bottom()).flat_map(move |y| (left..right).map(move |x| IVec2::new(x, y)))
    }
}

/// A fixed-size grid of cells, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Sets every cell of `rect` that lies inside the grid.
    pub fn fill_rect(&mut self, rect: &CellRect, value: T) {
        for p in rect.clip(&self.bounds()).cells() {
            if let Some(cell) = self.get_mut(p) {
                *cell = value.clone();
            }
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn in_bounds(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    pub fn get(&self, p: IVec2) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: IVec2) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// All cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (IVec2::new((i % width) as i32, (i / width) as i32), cell))
    }
}
