//! Everything that can lie on a cell or sit in an inventory slot.

pub mod kind;
pub mod terrain;

use std::fmt;

use sdl2::pixels::Color;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::color::Hsv;
use crate::constants::player::STACK_SIZE;

pub use kind::{Kind, MaterialClass};
pub use terrain::Terrain;

/// Power efficiency, in percent, of anything that is not a pickaxe.
pub const BASE_EFFICIENCY: u32 = 10;
/// Work needed to take a thing off the ground unless it is loose.
pub const ENERGY_IN_SITU: u32 = 500;
pub const ENERGY_LOOSE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
pub enum ToolKind {
    Pickaxe,
    Woodaxe,
    Hammer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
pub enum PartKind {
    #[strum(serialize = "Axe Head")]
    AxeHead,
    #[strum(serialize = "Pickaxe Head")]
    PickaxeHead,
}

/// Placed things that unlock recipes for a player standing next to them.
///
/// The furnaces are ordered by heat, so a hotter one can do anything a cooler one can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
pub enum Workstation {
    #[strum(serialize = "Campfire")]
    CampFire,
    #[strum(serialize = "Stone Furnace")]
    StoneFurnace,
    #[strum(serialize = "Brick Furnace")]
    BrickFurnace,
    #[strum(serialize = "Fire Brick Furnace")]
    FireBrickFurnace,
    Table,
}

impl Workstation {
    /// Heat tier, if this station is a fire at all.
    pub fn heat(self) -> Option<u8> {
        match self {
            Workstation::CampFire => Some(1),
            Workstation::StoneFurnace => Some(2),
            Workstation::BrickFurnace => Some(3),
            Workstation::FireBrickFurnace => Some(4),
            Workstation::Table => None,
        }
    }

    /// Whether this station can stand in for `required`.
    pub fn satisfies(self, required: Workstation) -> bool {
        match (self.heat(), required.heat()) {
            (Some(have), Some(need)) => have >= need,
            _ => self == required,
        }
    }

    fn color(self) -> Hsv {
        match self {
            Workstation::CampFire => Hsv::new(20, 100, 100),
            Workstation::StoneFurnace => Hsv::new(0, 0, 50),
            Workstation::BrickFurnace => Kind::Brick.color(),
            Workstation::FireBrickFurnace => Kind::FireBrick.color(),
            Workstation::Table => Hsv::new(30, 58, 80),
        }
    }
}

/// A single item. Values are small and `Copy`; identity is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Thing {
    /// A raw material; `in_situ` when it is still part of the landscape.
    Material { kind: Kind, in_situ: bool },
    Hands,
    Tool { tool: ToolKind, material: Kind },
    Part { part: PartKind, material: Kind },
    Station(Workstation),
}

impl Thing {
    pub const fn loose(kind: Kind) -> Thing {
        Thing::Material { kind, in_situ: false }
    }

    pub const fn in_situ(kind: Kind) -> Thing {
        Thing::Material { kind, in_situ: true }
    }

    pub const fn tool(tool: ToolKind, material: Kind) -> Thing {
        Thing::Tool { tool, material }
    }

    pub const fn part(part: PartKind, material: Kind) -> Thing {
        Thing::Part { part, material }
    }

    /// The raw material, or what a tool or part is made of.
    pub fn material(&self) -> Option<Kind> {
        match *self {
            Thing::Material { kind, .. } => Some(kind),
            Thing::Tool { material, .. } | Thing::Part { material, .. } => Some(material),
            Thing::Hands | Thing::Station(_) => None,
        }
    }

    pub fn is_in_situ(&self) -> bool {
        matches!(self, Thing::Material { in_situ: true, .. })
    }

    pub fn is_traversable(&self) -> bool {
        matches!(self, Thing::Material { in_situ: false, .. })
    }

    pub fn is_placeable(&self) -> bool {
        match self {
            Thing::Material { kind, .. } => kind.properties().placeable,
            Thing::Station(_) => true,
            _ => false,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Thing::Material { kind, .. } | Thing::Tool { material: kind, .. } | Thing::Part { material: kind, .. } => {
                kind.color().to_rgb()
            }
            Thing::Station(station) => station.color().to_rgb(),
            Thing::Hands => Hsv::new(30, 40, 90).to_rgb(),
        }
    }

    /// Short label drawn on the icon.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Thing::Material { kind, .. } => kind.symbol(),
            Thing::Tool { tool, .. } => Some(match tool {
                ToolKind::Pickaxe => "P",
                ToolKind::Woodaxe => "W",
                ToolKind::Hammer => "H",
            }),
            Thing::Part { part, .. } => Some(match part {
                PartKind::AxeHead => "a",
                PartKind::PickaxeHead => "p",
            }),
            Thing::Station(_) | Thing::Hands => None,
        }
    }

    /// Work needed to harvest this thing from a cell.
    pub fn energy_to_harvest(&self) -> u32 {
        match self {
            Thing::Material { in_situ: false, .. } => ENERGY_LOOSE,
            _ => ENERGY_IN_SITU,
        }
    }

    /// How hard a material this tool can break, if it breaks anything.
    pub fn harvesting_magnitude(&self) -> Option<f32> {
        match *self {
            Thing::Tool {
                tool: ToolKind::Pickaxe,
                material,
            } => Some(material.hardness() + 0.5),
            Thing::Tool {
                tool: ToolKind::Hammer,
                material,
            } => Some(material.hardness()),
            _ => None,
        }
    }

    /// Percent of each millisecond of effort that turns into harvest progress.
    pub fn power_efficiency(&self) -> u32 {
        match *self {
            Thing::Tool {
                tool: ToolKind::Pickaxe,
                material,
            } => BASE_EFFICIENCY.max((material.hardness() * 8.0) as u32),
            _ => BASE_EFFICIENCY,
        }
    }

    /// What harvesting one unit of this thing with `tool` would give, if anything.
    pub fn harvest_with(&self, tool: &Thing) -> Option<Thing> {
        match *self {
            Thing::Material { kind, in_situ: false } => Some(Thing::loose(kind)),
            Thing::Material { kind, in_situ: true } if kind.is_plant() => {
                matches!(tool, Thing::Tool { tool: ToolKind::Woodaxe, .. }).then_some(Thing::loose(kind))
            }
            Thing::Material { kind, in_situ: true } => tool
                .harvesting_magnitude()
                .filter(|magnitude| *magnitude >= kind.hardness())
                .map(|_| Thing::loose(kind)),
            Thing::Station(_) | Thing::Hands | Thing::Tool { .. } | Thing::Part { .. } => None,
        }
    }
}

impl fmt::Display for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Material { kind, .. } => write!(f, "{kind}"),
            Thing::Hands => f.write_str("Hands"),
            Thing::Tool { tool, material } => write!(f, "{material} {}", <&'static str>::from(tool)),
            Thing::Part { part, material } => write!(f, "{material} {}", <&'static str>::from(part)),
            Thing::Station(station) => f.write_str(<&'static str>::from(station)),
        }
    }
}

/// A count of identical things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stack {
    pub count: u32,
    pub thing: Thing,
}

impl Stack {
    pub const fn new(count: u32, thing: Thing) -> Self {
        Self { count, thing }
    }

    pub const fn one(thing: Thing) -> Self {
        Self { count: 1, thing }
    }

    /// Room left before the stack is full.
    pub fn space(&self) -> u32 {
        STACK_SIZE.saturating_sub(self.count)
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.thing)
    }
}
