//! The crafting screen's state: the arrangement matrix, nearby workstations, and what they make.

pub mod recipes;

use bevy_ecs::resource::Resource;
use glam::IVec2;
use smallvec::SmallVec;

use crate::constants::ui::MATRIX_RANK;
use crate::error::{CraftingError, InventoryError};
use crate::inventory::{merge, Inventory};
use crate::map::grid::CellRect;
use crate::things::{Stack, Thing, Workstation};
use crate::ui::CraftingTarget;
use crate::world::WorldMap;

pub use recipes::{find_production, Pattern, Products, Recipe, RECIPES};

/// References to inventory things; nothing is consumed until a build.
pub type Matrix = [[Option<Thing>; MATRIX_RANK]; MATRIX_RANK];

/// Drops empty outer rows and columns.
pub fn trim(matrix: &Matrix) -> Vec<Vec<Option<Thing>>> {
    let filled = |r: usize, c: usize| matrix[r][c].is_some();
    let rows: SmallVec<[usize; MATRIX_RANK]> = (0..MATRIX_RANK).filter(|r| (0..MATRIX_RANK).any(|c| filled(*r, c))).collect();
    let cols: SmallVec<[usize; MATRIX_RANK]> = (0..MATRIX_RANK).filter(|c| (0..MATRIX_RANK).any(|r| filled(r, *c))).collect();
    let (Some(&top), Some(&bottom), Some(&left), Some(&right)) = (rows.first(), rows.last(), cols.first(), cols.last()) else {
        return Vec::new();
    };
    (top..=bottom).map(|r| matrix[r][left..=right].to_vec()).collect()
}

/// One of each thing in the matrix, with repeats summed.
pub fn ingredients(matrix: &Matrix) -> SmallVec<[Stack; 16]> {
    let cells: SmallVec<[Stack; 16]> = matrix.iter().flatten().flatten().map(|t| Stack::one(*t)).collect();
    merge(&cells)
}

/// Workstations within one cell of `at`, in row-major order.
pub fn catalysts_around(map: &WorldMap, at: IVec2) -> SmallVec<[Workstation; 9]> {
    CellRect::new(at.x - 1, at.y - 1, 3, 3)
        .cells()
        .filter_map(|p| match map.things_at(p)?.thing {
            Thing::Station(station) => Some(station),
            _ => None,
        })
        .collect()
}

/// Swaps the matrix's ingredients for its products, all or nothing.
pub fn craft(inventory: &mut Inventory, matrix: &Matrix, catalysts: &[Workstation]) -> Result<Products, CraftingError> {
    let products = find_production(&trim(matrix), catalysts);
    if products.is_empty() {
        return Err(CraftingError::NoRecipe);
    }

    let mut staged = inventory.clone();
    for input in ingredients(matrix) {
        staged.remove(&input).map_err(|e| match e {
            InventoryError::Insufficient { thing, .. } => CraftingError::MissingIngredient(thing),
            _ => CraftingError::MissingIngredient(input.thing),
        })?;
    }
    for product in &products {
        staged.add(*product).map_err(|_| CraftingError::NoRoom)?;
    }
    *inventory = staged;
    Ok(products)
}

/// What is being dragged on the crafting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Inventory(usize),
    /// A thing lifted out of the matrix; its cell is already empty.
    Matrix(Thing),
    Products,
}

/// The outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Nothing,
    Arranged,
    Swapped,
    /// Products were dropped into the inventory; build them.
    Craft,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct CraftingState {
    pub open: bool,
    pub matrix: Matrix,
    pub catalysts: SmallVec<[Workstation; 9]>,
    pub products: Products,
    pub drag: Option<DragSource>,
}

impl CraftingState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.drag = None;
    }

    /// Recomputes the products after the matrix or the catalysts changed.
    pub fn refresh(&mut self) {
        self.products = find_production(&trim(&self.matrix), &self.catalysts);
    }

    /// Whether the inventory holds everything the matrix shows.
    pub fn is_buildable(&self, inventory: &Inventory) -> bool {
        !self.products.is_empty() && inventory.has_all(&ingredients(&self.matrix))
    }

    /// Starts dragging whatever is under the pointer. Returns whether a drag began.
    pub fn begin_drag(&mut self, target: CraftingTarget, inventory: &Inventory) -> bool {
        self.drag = match target {
            CraftingTarget::Inventory(i) => inventory.slot(i).map(|_| DragSource::Inventory(i)),
            CraftingTarget::Matrix(row, col) => self.matrix[row][col].take().map(DragSource::Matrix),
            CraftingTarget::Product(_) if !self.products.is_empty() => Some(DragSource::Products),
            _ => None,
        };
        if matches!(self.drag, Some(DragSource::Matrix(_))) {
            self.refresh();
        }
        self.drag.is_some()
    }

    /// Finishes the current drag over `target`.
    pub fn drop_on(&mut self, target: CraftingTarget, inventory: &mut Inventory) -> Result<DropAction, InventoryError> {
        let Some(source) = self.drag.take() else {
            return Ok(DropAction::Nothing);
        };
        let action = match (source, target) {
            (DragSource::Inventory(i), CraftingTarget::Matrix(row, col)) => {
                self.matrix[row][col] = inventory.slot(i).map(|s| s.thing);
                DropAction::Arranged
            }
            (DragSource::Inventory(a), CraftingTarget::Inventory(b)) if a != b => {
                inventory.swap(a, b)?;
                DropAction::Swapped
            }
            (DragSource::Matrix(thing), CraftingTarget::Matrix(row, col)) => {
                self.matrix[row][col] = Some(thing);
                DropAction::Arranged
            }
            // Anywhere else, a lifted matrix thing is simply removed.
            (DragSource::Matrix(_), _) => DropAction::Arranged,
            (DragSource::Products, CraftingTarget::Inventory(_)) => DropAction::Craft,
            _ => DropAction::Nothing,
        };
        if action == DropAction::Arranged {
            self.refresh();
        }
        Ok(action)
    }
}
