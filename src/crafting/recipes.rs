//! The recipe table.
//!
//! Recipes are tried in order; the first whose station, shape and cells all match wins.

use smallvec::{smallvec, SmallVec};

use crate::things::{Kind, PartKind, Stack, Thing, ToolKind, Workstation};

/// What a single matrix cell must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Kind(Kind),
    /// Any metal or alloy.
    Metal,
    Part(PartKind),
}

impl Pattern {
    pub fn matches(self, cell: Option<Thing>) -> bool {
        match (self, cell) {
            (Pattern::Kind(kind), Some(Thing::Material { kind: k, .. })) => kind == k,
            (Pattern::Metal, Some(Thing::Material { kind, .. })) => kind.is_metal(),
            (Pattern::Part(part), Some(Thing::Part { part: p, .. })) => part == p,
            _ => false,
        }
    }
}

pub type Products = SmallVec<[Stack; 2]>;

/// A trimmed crafting matrix, row by row.
pub type Cells = [Vec<Option<Thing>>];

pub struct Recipe {
    /// The least workstation that must stand next to the player.
    pub station: Option<Workstation>,
    pub pattern: &'static [&'static [Pattern]],
    pub produce: fn(&Cells) -> Products,
}

impl Recipe {
    pub fn matches(&self, cells: &Cells, catalysts: &[Workstation]) -> bool {
        let station = self
            .station
            .is_none_or(|need| catalysts.iter().any(|have| have.satisfies(need)));
        station
            && self.pattern.len() == cells.len()
            && self.pattern.iter().zip(cells).all(|(pattern, row)| {
                pattern.len() == row.len() && pattern.iter().zip(row).all(|(p, cell)| p.matches(*cell))
            })
    }
}

fn cell(cells: &Cells, row: usize, col: usize) -> Option<Thing> {
    cells.get(row).and_then(|r| r.get(col)).copied().flatten()
}

fn material(cells: &Cells, row: usize, col: usize) -> Option<Kind> {
    cell(cells, row, col).and_then(|t| t.material())
}

fn loose(count: u32, kind: Kind) -> Stack {
    Stack::new(count, Thing::loose(kind))
}

fn station(station: Workstation) -> Products {
    smallvec![Stack::one(Thing::Station(station))]
}

/// A tool whose material is that of the head (or stone) in the top cell.
fn tool_from_top(cells: &Cells, tool: ToolKind) -> Products {
    material(cells, 0, 0)
        .map(|kind| Stack::one(Thing::tool(tool, kind)))
        .into_iter()
        .collect()
}

const fn k(kind: Kind) -> Pattern {
    Pattern::Kind(kind)
}

const STONE: Pattern = k(Kind::Stone);
const WOOD: Pattern = k(Kind::Wood);
const CHARCOAL: Pattern = k(Kind::Charcoal);
const BRICK: Pattern = k(Kind::Brick);
const FIRE_BRICK: Pattern = k(Kind::FireBrick);
const CLAY: Pattern = k(Kind::Clay);

pub static RECIPES: &[Recipe] = &[
    // Bare hands
    Recipe {
        station: None,
        pattern: &[&[STONE], &[STONE]],
        produce: |_| smallvec![Stack::one(Thing::part(PartKind::AxeHead, Kind::Stone))],
    },
    Recipe {
        station: None,
        pattern: &[&[STONE], &[WOOD]],
        produce: |m| tool_from_top(m, ToolKind::Hammer),
    },
    Recipe {
        station: None,
        pattern: &[&[Pattern::Part(PartKind::AxeHead)], &[WOOD]],
        produce: |m| tool_from_top(m, ToolKind::Woodaxe),
    },
    Recipe {
        station: None,
        pattern: &[&[Pattern::Part(PartKind::PickaxeHead)], &[WOOD]],
        produce: |m| tool_from_top(m, ToolKind::Pickaxe),
    },
    Recipe {
        station: None,
        pattern: &[&[WOOD, WOOD], &[WOOD, WOOD]],
        produce: |_| station(Workstation::CampFire),
    },
    Recipe {
        station: None,
        pattern: &[&[STONE, STONE], &[STONE, STONE], &[CHARCOAL, CHARCOAL]],
        produce: |_| station(Workstation::StoneFurnace),
    },
    Recipe {
        station: None,
        pattern: &[&[BRICK, BRICK], &[BRICK, BRICK], &[CHARCOAL, CHARCOAL]],
        produce: |_| station(Workstation::BrickFurnace),
    },
    Recipe {
        station: None,
        pattern: &[&[FIRE_BRICK, FIRE_BRICK], &[FIRE_BRICK, FIRE_BRICK], &[CHARCOAL, CHARCOAL]],
        produce: |_| station(Workstation::FireBrickFurnace),
    },
    // Campfire: ores that melt below about 1100 °C
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[WOOD]],
        produce: |_| smallvec![loose(1, Kind::Charcoal)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::Bismuthinite)]],
        produce: |_| smallvec![loose(2, Kind::Bismuth)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::Malachite)]],
        produce: |_| smallvec![loose(2, Kind::Copper)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::NativeGold)]],
        produce: |_| smallvec![loose(2, Kind::Gold)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::NativeSilver)]],
        produce: |_| smallvec![loose(2, Kind::Silver)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::Tetrahedrite)]],
        produce: |_| smallvec![loose(2, Kind::Copper), loose(1, Kind::Silver)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::Copper), k(Kind::Tin)]],
        produce: |_| smallvec![loose(2, Kind::Bronze)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[k(Kind::Silver), k(Kind::Gold)]],
        produce: |_| smallvec![loose(2, Kind::Electrum)],
    },
    Recipe {
        station: Some(Workstation::CampFire),
        pattern: &[&[Pattern::Metal], &[Pattern::Metal]],
        produce: |m| match (material(m, 0, 0), material(m, 1, 0)) {
            (Some(top), Some(bottom)) if top == bottom => {
                smallvec![Stack::one(Thing::part(PartKind::PickaxeHead, top))]
            }
            _ => SmallVec::new(),
        },
    },
    // Stone furnace
    Recipe {
        station: Some(Workstation::StoneFurnace),
        pattern: &[&[CLAY], &[k(Kind::Grass)]],
        produce: |_| smallvec![loose(1, Kind::Brick)],
    },
    Recipe {
        station: Some(Workstation::StoneFurnace),
        pattern: &[&[k(Kind::Galena)]],
        produce: |_| smallvec![loose(2, Kind::Lead), loose(1, Kind::Silver)],
    },
    // Brick furnace
    Recipe {
        station: Some(Workstation::BrickFurnace),
        pattern: &[&[k(Kind::NativeAluminum)], &[CLAY], &[CLAY], &[CLAY]],
        produce: |_| smallvec![loose(4, Kind::FireBrick)],
    },
    Recipe {
        station: Some(Workstation::BrickFurnace),
        pattern: &[&[k(Kind::Hematite)]],
        produce: |_| smallvec![loose(2, Kind::Iron)],
    },
    Recipe {
        station: Some(Workstation::BrickFurnace),
        pattern: &[&[k(Kind::Limonite)]],
        produce: |_| smallvec![loose(2, Kind::Iron)],
    },
    Recipe {
        station: Some(Workstation::BrickFurnace),
        pattern: &[&[k(Kind::Magnetite)]],
        produce: |_| smallvec![loose(2, Kind::Iron)],
    },
    Recipe {
        station: Some(Workstation::BrickFurnace),
        pattern: &[&[k(Kind::NativePlatinum)]],
        produce: |_| smallvec![loose(2, Kind::Platinum)],
    },
    // Fire brick furnace
    Recipe {
        station: Some(Workstation::FireBrickFurnace),
        pattern: &[&[k(Kind::Cassiterite)]],
        produce: |_| smallvec![loose(2, Kind::Tin)],
    },
    Recipe {
        station: Some(Workstation::FireBrickFurnace),
        pattern: &[&[k(Kind::Garnierite)]],
        produce: |_| smallvec![loose(2, Kind::Nickel)],
    },
    Recipe {
        station: Some(Workstation::FireBrickFurnace),
        pattern: &[&[k(Kind::NativeAluminum)]],
        produce: |_| smallvec![loose(2, Kind::Aluminum)],
    },
    Recipe {
        station: Some(Workstation::FireBrickFurnace),
        pattern: &[&[k(Kind::Sphalerite)]],
        produce: |_| smallvec![loose(2, Kind::Zinc)],
    },
];

/// What the matrix would produce with these catalysts nearby; empty when nothing does.
pub fn find_production(cells: &Cells, catalysts: &[Workstation]) -> Products {
    RECIPES
        .iter()
        .find(|recipe| recipe.matches(cells, catalysts))
        .map(|recipe| (recipe.produce)(cells))
        .unwrap_or_default()
}
