//! The world map: terrain, things lying on cells, what is lit, and harvesting progress.

pub mod generation;

use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use glam::IVec2;
use rand::Rng;

use crate::constants::world::{LIGHT_RADIUS, MAX_SEARCH_RADIUS};
use crate::error::WorldError;
use crate::map::grid::{CellRect, Grid};
use crate::things::{Stack, Terrain, Thing};

#[derive(Resource, Debug, Clone)]
pub struct WorldMap {
    terrain: Grid<Terrain>,
    things: Grid<Option<Stack>>,
    lighting: Grid<bool>,
    /// Harvest work already spent on a cell, in efficiency-scaled milliseconds.
    progress: HashMap<IVec2, u32>,
}

impl WorldMap {
    /// A fully lit grass plain with nothing on it.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            terrain: Grid::new(width, height, Terrain::Grass),
            things: Grid::new(width, height, None),
            lighting: Grid::new(width, height, true),
            progress: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.terrain.width()
    }

    pub fn height(&self) -> u32 {
        self.terrain.height()
    }

    pub fn bounds(&self) -> CellRect {
        self.terrain.bounds()
    }

    pub fn in_bounds(&self, p: IVec2) -> bool {
        self.terrain.in_bounds(p)
    }

    pub fn terrain_at(&self, p: IVec2) -> Option<Terrain> {
        self.terrain.get(p).copied()
    }

    pub fn things_at(&self, p: IVec2) -> Option<Stack> {
        self.things.get(p).copied().flatten()
    }

    pub fn is_lit(&self, p: IVec2) -> bool {
        self.lighting.get(p).copied().unwrap_or(false)
    }

    /// Replaces whatever lies on `p`, lighting up the neighbourhood as it is disturbed.
    pub fn set_things_at(&mut self, p: IVec2, stack: Option<Stack>) -> Result<(), WorldError> {
        let cell = self.things.get_mut(p).ok_or(WorldError::OutOfBounds(p))?;
        *cell = stack.filter(|s| s.count > 0);
        self.expose_to_light(p);
        Ok(())
    }

    pub fn expose_to_light(&mut self, p: IVec2) {
        let around = CellRect::new(p.x - LIGHT_RADIUS, p.y - LIGHT_RADIUS, 2 * LIGHT_RADIUS + 1, 2 * LIGHT_RADIUS + 1);
        self.lighting.fill_rect(&around, true);
    }

    pub fn fill_terrain(&mut self, rect: &CellRect, terrain: Terrain) {
        self.terrain.fill_rect(rect, terrain);
    }

    pub fn fill_things(&mut self, rect: &CellRect, stack: Option<Stack>) {
        self.things.fill_rect(rect, stack);
    }

    pub fn fill_light(&mut self, rect: &CellRect, lit: bool) {
        self.lighting.fill_rect(rect, lit);
    }

    /// Whether a walker may stand on `p`: in bounds, on dry land, and not blocked by a solid thing.
    pub fn can_occupy(&self, p: IVec2) -> bool {
        let dry = self.terrain_at(p).is_some_and(Terrain::is_traversable);
        dry && self.things_at(p).is_none_or(|s| s.thing.is_traversable())
    }

    /// The nearest cell (by growing square rings) that can be occupied.
    pub fn find_empty_spot_near(&self, origin: IVec2) -> Result<IVec2, WorldError> {
        (0..MAX_SEARCH_RADIUS)
            .flat_map(|radius| {
                CellRect::new(origin.x - radius, origin.y - radius, 2 * radius + 1, 2 * radius + 1).cells()
            })
            .find(|p| self.can_occupy(*p))
            .ok_or(WorldError::NoEmptySpot {
                origin,
                radius: MAX_SEARCH_RADIUS,
            })
    }

    pub fn progress_at(&self, p: IVec2) -> u32 {
        self.progress.get(&p).copied().unwrap_or(0)
    }

    pub fn add_progress(&mut self, p: IVec2, work: u32) -> u32 {
        let total = self.progress.entry(p).or_insert(0);
        *total += work;
        *total
    }

    pub fn clear_progress(&mut self, p: IVec2) {
        self.progress.remove(&p);
    }

    /// Cells with harvesting underway.
    pub fn progress(&self) -> impl Iterator<Item = (IVec2, u32)> + '_ {
        self.progress.iter().map(|(p, v)| (*p, *v))
    }

    pub fn random_cell(&self, rng: &mut impl Rng) -> IVec2 {
        IVec2::new(
            rng.random_range(0..self.width() as i32),
            rng.random_range(0..self.height() as i32),
        )
    }

    /// Every cell with something on it.
    pub fn iter_things(&self) -> impl Iterator<Item = (IVec2, Stack)> + '_ {
        self.things.iter().filter_map(|(p, s)| s.map(|s| (p, s)))
    }

    /// How many cells hold `thing`.
    pub fn count_cells_with(&self, thing: &Thing) -> usize {
        self.iter_things().filter(|(_, s)| s.thing == *thing).count()
    }
}
