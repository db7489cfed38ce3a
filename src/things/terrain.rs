use sdl2::pixels::Color;
use strum_macros::{EnumIter, IntoStaticStr};

/// The ground under every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, IntoStaticStr)]
pub enum Terrain {
    Water,
    SaltWater,
    Land,
    Rock,
    Dirt,
    Sand,
    #[default]
    Grass,
}

impl Terrain {
    pub fn is_traversable(self) -> bool {
        !matches!(self, Terrain::Water | Terrain::SaltWater)
    }

    pub fn color(self) -> Color {
        match self {
            Terrain::Water | Terrain::SaltWater => Color::RGB(0, 0, 127),
            Terrain::Land | Terrain::Rock | Terrain::Dirt => Color::RGB(127, 95, 63),
            Terrain::Sand => Color::RGB(230, 201, 114),
            Terrain::Grass => Color::RGB(0, 127, 0),
        }
    }
}
