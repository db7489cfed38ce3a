//! The material catalogue and its static property table.

use phf::phf_map;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

use crate::color::Hsv;

/// Broad family of a material; recipes match on these as well as on exact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    Rock,
    Clay,
    Ore,
    Metal,
    Alloy,
    Gem,
    Plant,
    Fuel,
    Ceramic,
}

impl MaterialClass {
    /// Alloys are metals too.
    pub fn is_metal(self) -> bool {
        matches!(self, MaterialClass::Metal | MaterialClass::Alloy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, IntoStaticStr)]
pub enum Kind {
    Stone,
    Clay,
    Flint,
    Diamond,
    Wood,
    Grass,
    Vine,
    Charcoal,
    Coke,
    Brick,
    FireBrick,
    Cassiterite,
    Malachite,
    NativeSilver,
    NativeGold,
    NativeAluminum,
    Bismuthinite,
    Garnierite,
    NativePlatinum,
    Sphalerite,
    Tetrahedrite,
    Hematite,
    Limonite,
    Magnetite,
    Galena,
    Tin,
    Copper,
    Silver,
    Gold,
    Aluminum,
    Bismuth,
    Nickel,
    Platinum,
    Zinc,
    Iron,
    Lead,
    Brass,
    Bronze,
    Electrum,
    Steel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProperties {
    pub name: &'static str,
    pub color: Hsv,
    /// Mohs-like scale; a tool must reach this magnitude to break the material out of the ground.
    pub hardness: f32,
    pub symbol: Option<&'static str>,
    pub class: MaterialClass,
    pub placeable: bool,
}

const fn props(
    name: &'static str,
    color: Hsv,
    hardness: f32,
    symbol: Option<&'static str>,
    class: MaterialClass,
) -> KindProperties {
    KindProperties {
        name,
        color,
        hardness,
        symbol,
        class,
        placeable: true,
    }
}

use MaterialClass::*;

static PROPERTIES: phf::Map<&'static str, KindProperties> = phf_map! {
    "Stone" => props("Stone", Hsv::new(0, 0, 50), 3.0, None, Rock),
    "Clay" => props("Clay", Hsv::new(20, 50, 40), 1.0, None, Clay),
    "Flint" => props("Flint", Hsv::new(0, 0, 25), 7.0, None, Rock),
    "Diamond" => props("Diamond", Hsv::new(190, 30, 95), 10.0, Some("C"), Gem),
    "Wood" => props("Wood", Hsv::new(30, 70, 45), 2.0, None, Plant),
    "Grass" => KindProperties {
        name: "Grass",
        color: Hsv::new(120, 100, 50),
        hardness: 0.5,
        symbol: None,
        class: Plant,
        placeable: false,
    },
    "Vine" => props("Vine", Hsv::new(120, 100, 75), 0.5, None, Plant),
    "Charcoal" => props("Charcoal", Hsv::new(0, 0, 15), 1.0, None, Fuel),
    "Coke" => props("Coke", Hsv::new(0, 0, 25), 1.0, None, Fuel),
    "Brick" => props("Brick", Hsv::new(20, 85, 80), 3.0, None, Ceramic),
    "FireBrick" => props("Fire Brick", Hsv::new(20, 25, 95), 3.0, None, Ceramic),
    "Cassiterite" => props("Cassiterite", Hsv::new(30, 60, 30), 6.0, None, Ore),
    "Malachite" => props("Malachite", Hsv::new(150, 80, 55), 3.0, None, Ore),
    "NativeSilver" => props("Native Silver", Hsv::new(0, 0, 80), 2.5, None, Ore),
    "NativeGold" => props("Native Gold", Hsv::new(50, 90, 85), 2.5, None, Ore),
    "NativeAluminum" => props("Native Aluminum", Hsv::new(200, 5, 85), 2.5, None, Ore),
    "Bismuthinite" => props("Bismuthinite", Hsv::new(220, 10, 55), 2.0, None, Ore),
    "Garnierite" => props("Garnierite", Hsv::new(110, 60, 60), 2.5, None, Ore),
    "NativePlatinum" => props("Native Platinum", Hsv::new(210, 5, 90), 4.0, None, Ore),
    "Sphalerite" => props("Sphalerite", Hsv::new(40, 70, 40), 3.5, None, Ore),
    "Tetrahedrite" => props("Tetrahedrite", Hsv::new(0, 0, 35), 3.5, None, Ore),
    "Hematite" => props("Hematite", Hsv::new(0, 70, 45), 5.0, None, Ore),
    "Limonite" => props("Limonite", Hsv::new(35, 80, 55), 4.0, None, Ore),
    "Magnetite" => props("Magnetite", Hsv::new(0, 0, 20), 5.5, None, Ore),
    "Galena" => props("Galena", Hsv::new(220, 5, 60), 2.5, None, Ore),
    "Tin" => props("Tin", Hsv::new(0, 0, 85), 1.5, Some("Sn"), Metal),
    "Copper" => props("Copper", Hsv::new(20, 75, 75), 3.0, Some("Cu"), Metal),
    "Silver" => props("Silver", Hsv::new(0, 0, 90), 2.5, Some("Ag"), Metal),
    "Gold" => props("Gold", Hsv::new(50, 100, 95), 2.5, Some("Au"), Metal),
    "Aluminum" => props("Aluminum", Hsv::new(210, 5, 90), 2.75, Some("Al"), Metal),
    "Bismuth" => props("Bismuth", Hsv::new(300, 20, 80), 2.25, Some("Bi"), Metal),
    "Nickel" => props("Nickel", Hsv::new(45, 10, 75), 4.0, Some("Ni"), Metal),
    "Platinum" => props("Platinum", Hsv::new(210, 5, 95), 3.5, Some("Pt"), Metal),
    "Zinc" => props("Zinc", Hsv::new(200, 10, 70), 2.5, Some("Zn"), Metal),
    "Iron" => props("Iron", Hsv::new(0, 0, 60), 4.0, Some("Fe"), Metal),
    "Lead" => props("Lead", Hsv::new(240, 10, 50), 1.5, Some("Pb"), Metal),
    "Brass" => props("Brass", Hsv::new(45, 70, 80), 3.5, None, Alloy),
    "Bronze" => props("Bronze", Hsv::new(30, 65, 70), 3.5, None, Alloy),
    "Electrum" => props("Electrum", Hsv::new(55, 55, 90), 2.5, None, Alloy),
    "Steel" => props("Steel", Hsv::new(210, 10, 70), 5.5, None, Alloy),
};

/// Used only if the table and the enum ever drift apart.
const UNKNOWN: KindProperties = props("Unknown", Hsv::new(300, 100, 100), 1.0, None, Rock);

impl Kind {
    pub fn properties(self) -> &'static KindProperties {
        let key: &'static str = self.into();
        PROPERTIES.get(key).unwrap_or(&UNKNOWN)
    }

    pub fn name(self) -> &'static str {
        self.properties().name
    }

    pub fn hardness(self) -> f32 {
        self.properties().hardness
    }

    pub fn class(self) -> MaterialClass {
        self.properties().class
    }

    pub fn symbol(self) -> Option<&'static str> {
        self.properties().symbol
    }

    pub fn color(self) -> Hsv {
        self.properties().color
    }

    pub fn is_metal(self) -> bool {
        self.class().is_metal()
    }

    pub fn is_plant(self) -> bool {
        self.class() == MaterialClass::Plant
    }

    /// Things creatures and the player can eat.
    pub fn is_edible(self) -> bool {
        matches!(self, Kind::Grass | Kind::Vine)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_has_properties() {
        for kind in Kind::iter() {
            assert_ne!(kind.properties().name, UNKNOWN.name, "{kind:?} is missing from the table");
        }
    }

    #[test]
    fn test_metals_have_symbols() {
        for kind in Kind::iter().filter(|k| k.class() == MaterialClass::Metal) {
            assert!(kind.symbol().is_some(), "{kind:?} has no symbol");
        }
    }
}
