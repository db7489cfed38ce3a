//! Seeded procedural generation of a fresh world.

use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::constants::creature::HERBIVORE_SHARE;
use crate::constants::world::*;
use crate::error::WorldError;
use crate::map::grid::CellRect;
use crate::things::{Kind, Stack, Terrain, Thing};
use crate::world::WorldMap;

/// Relative frequency of each ore in rock.
pub const ORE_WEIGHTS: [(Kind, u32); 14] = [
    (Kind::Bismuthinite, 3),
    (Kind::Cassiterite, 2),
    (Kind::Galena, 3),
    (Kind::Garnierite, 3),
    (Kind::Hematite, 3),
    (Kind::Limonite, 3),
    (Kind::Magnetite, 3),
    (Kind::Malachite, 3),
    (Kind::NativeAluminum, 5),
    (Kind::NativeGold, 1),
    (Kind::NativePlatinum, 1),
    (Kind::NativeSilver, 2),
    (Kind::Sphalerite, 3),
    (Kind::Tetrahedrite, 4),
];

/// What a creature spawn point will become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Herbivore,
    Carnivore,
}

/// A freshly generated map plus where its creatures start.
pub struct Generated {
    pub map: WorldMap,
    pub spawns: Vec<(IVec2, SpawnKind)>,
}

/// Builds a `size`×`size` world, reporting progress in `0.0..=1.0`.
pub fn generate(size: u32, rng: &mut impl Rng, mut progress: impl FnMut(f32)) -> Result<Generated, WorldError> {
    if size < MIN_SIZE {
        return Err(WorldError::TooSmall(size, MIN_SIZE));
    }
    let mut map = WorldMap::new(size, size);
    let area = size * size;
    info!(width = size, height = size, cells = area, "Generating world");

    progress(0.05);
    generate_terrain(&mut map, area, rng, |p| progress(0.05 + p * 0.7));
    progress(0.75);
    generate_things(&mut map, area, rng);
    progress(0.8);
    generate_clay(&mut map, area, rng);
    generate_rock(&mut map, area, rng);
    let spawns = generate_spawns(&map, area, rng);
    progress(1.0);

    info!(creatures = spawns.len(), "World generated");
    Ok(Generated { map, spawns })
}

/// A random rectangle with sides in `side`, placed wholly inside the map.
fn random_plot(map: &WorldMap, side: std::ops::Range<i32>, rng: &mut impl Rng) -> CellRect {
    let width = rng.random_range(side.clone());
    let height = rng.random_range(side);
    let left = rng.random_range(0..map.width() as i32 - width);
    let top = rng.random_range(0..map.height() as i32 - height);
    CellRect::new(left, top, width, height)
}

fn generate_terrain(map: &mut WorldMap, area: u32, rng: &mut impl Rng, mut progress: impl FnMut(f32)) {
    let plots = area / CELLS_PER_TERRAIN_PLOT;
    let total = (2 * plots).max(1) as f32;
    for (n, terrain) in [Terrain::Sand, Terrain::Water].into_iter().enumerate() {
        for i in 0..plots {
            let plot = random_plot(map, PLOT_SIDE, rng);
            map.fill_terrain(&plot, terrain);
            progress((n as u32 * plots + i + 1) as f32 / total);
        }
    }
    debug!(plots, "Sand and water placed");
}

fn generate_things(map: &mut WorldMap, area: u32, rng: &mut impl Rng) {
    let count = area / CELLS_PER_LOOSE_THING;
    let scatter = [
        (Kind::Stone, count),
        (Kind::Wood, count),
        (Kind::Vine, count),
        (Kind::Grass, count * GRASS_MULTIPLIER),
    ];
    for (kind, n) in scatter {
        for _ in 0..n {
            let p = map.random_cell(rng);
            place(map, p, Stack::one(Thing::loose(kind)));
        }
    }
    for _ in 0..count {
        let p = map.random_cell(rng);
        let height = rng.random_range(0..4) + rng.random_range(0..3) + 1;
        place(map, p, Stack::new(height, Thing::in_situ(Kind::Wood)));
    }
    debug!(count, "Loose things and trees placed");
}

fn generate_clay(map: &mut WorldMap, area: u32, rng: &mut impl Rng) {
    let beds = area / CELLS_PER_CLAY_BED;
    for _ in 0..beds {
        let plot = random_plot(map, PLOT_SIDE, rng);
        map.fill_things(&plot, Some(Stack::one(Thing::in_situ(Kind::Clay))));
        map.fill_light(&plot.inflate(-DARK_INSET, -DARK_INSET), false);
    }
    debug!(beds, "Clay placed");
}

fn generate_rock(map: &mut WorldMap, area: u32, rng: &mut impl Rng) {
    let ores: Vec<Kind> = ORE_WEIGHTS
        .iter()
        .flat_map(|(kind, weight)| std::iter::repeat_n(*kind, *weight as usize))
        .collect();

    let rocks = area / CELLS_PER_ROCK;
    let mut veins = 0;
    for _ in 0..rocks {
        let plot = random_plot(map, ROCK_SIDE, rng);
        map.fill_things(&plot, Some(Stack::new(ROCK_DEPTH, Thing::in_situ(Kind::Stone))));
        map.fill_light(&plot.inflate(-DARK_INSET, -DARK_INSET), false);

        for _ in 0..(plot.area() as u32 / ROCK_CELLS_PER_VEIN) {
            let ore = ores[rng.random_range(0..ores.len())];
            generate_vein(map, &plot, Stack::one(Thing::in_situ(ore)), rng);
            veins += 1;
        }
    }
    debug!(rocks, veins, "Rock and ore placed");
}

/// Random-walks through bedrock from a point inside `rect`, turning the visited cells into `ore`.
fn generate_vein(map: &mut WorldMap, rect: &CellRect, ore: Stack, rng: &mut impl Rng) {
    let bedrock = Thing::in_situ(Kind::Stone);
    let start = IVec2::new(
        rng.random_range(rect.left..rect.right()),
        rng.random_range(rect.top..rect.bottom()),
    );
    let mut points: SmallVec<[IVec2; MAX_VEIN_SIZE]> = SmallVec::new();
    points.push(start);

    let mut p = start;
    for _ in 0..rng.random_range(0..MAX_VEIN_SIZE) {
        let next = p + IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1));
        let is_bedrock = map.things_at(next).is_some_and(|s| s.thing == bedrock);
        if is_bedrock && !points.contains(&next) {
            points.push(next);
            p = next;
        }
    }

    for p in points {
        place(map, p, ore);
    }
}

fn generate_spawns(map: &WorldMap, area: u32, rng: &mut impl Rng) -> Vec<(IVec2, SpawnKind)> {
    let attempts = (CREATURES_PER_MEGACELL * area as u64 / 1_000_000).max(1);
    let (herbivores, out_of) = HERBIVORE_SHARE;
    let mut spawns = Vec::new();
    for _ in 0..attempts {
        let p = map.random_cell(rng);
        if !map.can_occupy(p) {
            continue;
        }
        let kind = if rng.random_range(0..out_of) < herbivores {
            SpawnKind::Herbivore
        } else {
            SpawnKind::Carnivore
        };
        spawns.push((p, kind));
    }
    spawns
}

/// Generation leaves lighting alone; only disturbing a cell later reveals it.
fn place(map: &mut WorldMap, p: IVec2, stack: Stack) {
    if let Some(cell) = map.things.get_mut(p) {
        *cell = Some(stack);
    }
}
