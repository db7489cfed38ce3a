use bevy_ecs::system::RunSystemOnce;
use glam::IVec2;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;
use squareworldcraft::{
    constants::creature::{MIN_VIABLE_ENERGY, PLANT_ENERGY},
    map::grid::manhattan,
    systems::{
        creature_system,
        creatures::{best_by_distance, nearest_targets, pick_walk},
        spawn_creatures, Census, Creature, Diet, Position, SimRng,
    },
    things::Kind,
    world::{generation::SpawnKind, WorldMap},
};

mod common;

use common::loose;

const AT: IVec2 = IVec2::new(10, 10);

fn creatures(world: &mut bevy_ecs::world::World) -> Vec<Creature> {
    let mut query = world.query::<&Creature>();
    query.iter(world).cloned().collect()
}

#[test]
fn test_newborns_get_a_margin() {
    let herbivore = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    let carnivore = Creature::new(Diet::Carnivore, 0.001, Some(MIN_VIABLE_ENERGY * 2), IVec2::ZERO);

    assert_that(&(herbivore.energy > MIN_VIABLE_ENERGY)).is_true();
    assert_that(&(carnivore.energy > MIN_VIABLE_ENERGY * 2)).is_true();
    assert_that(&herbivore.reproduction_threshold).is_equal_to(herbivore.energy * 2);
    assert_that(&herbivore.is_alive()).is_true();
}

#[test]
fn test_random_creatures_walk_within_the_speed_range() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..50 {
        let creature = Creature::random(Diet::Herbivore, &mut rng);
        assert_that(&(creature.speed > 0.0 && creature.speed <= 0.004)).is_true();
        assert_that(&(creature.heading.abs().max_element() <= 1)).is_true();
    }
}

#[test]
fn test_carnivores_eat_herbivores_and_carcasses() {
    let herbivore = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    let mut carcass = Creature::new(Diet::Carnivore, 0.001, None, IVec2::ZERO);
    carcass.energy = 0;
    let hunter = Creature::new(Diet::Carnivore, 0.001, None, IVec2::ZERO);

    assert_that(&herbivore.is_edible_to_carnivores()).is_true();
    assert_that(&carcass.is_edible_to_carnivores()).is_true();
    assert_that(&hunter.is_edible_to_carnivores()).is_false();
}

#[test]
fn test_nearest_targets_keeps_ties() {
    let targets = [IVec2::new(12, 10), IVec2::new(10, 8), IVec2::new(13, 13), IVec2::new(40, 40)];

    let nearest = nearest_targets(AT, targets, 20);

    assert_that(&nearest.as_slice()).is_equal_to(&[IVec2::new(12, 10), IVec2::new(10, 8)][..]);
    assert_that(&nearest_targets(AT, [IVec2::new(40, 40)], 20).is_empty()).is_true();
}

#[test]
fn test_best_by_distance() {
    let candidates = [AT, AT + IVec2::X, AT - IVec2::X];
    let threat = [IVec2::new(15, 10)];

    let flee = best_by_distance(&candidates, &threat, true);
    let chase = best_by_distance(&candidates, &threat, false);

    assert_that(&flee.as_slice()).is_equal_to(&[AT - IVec2::X][..]);
    assert_that(&chase.as_slice()).is_equal_to(&[AT + IVec2::X][..]);
}

#[test]
fn test_pick_walk_with_nowhere_to_go() {
    let mut rng = SmallRng::seed_from_u64(1);
    assert_that(&pick_walk(AT, IVec2::X, &[], &mut rng)).is_equal_to(AT);
    assert_that(&pick_walk(AT, IVec2::X, &[AT], &mut rng)).is_equal_to(AT);
}

#[test]
fn test_census() {
    let mut dead = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    dead.energy = 0;
    let all = [
        Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO),
        Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO),
        Creature::new(Diet::Carnivore, 0.001, None, IVec2::ZERO),
        dead,
    ];

    let census = Census::take(all.iter());

    assert_that(&census).is_equal_to(Census {
        herbivores: 2,
        carnivores: 1,
        dead: 1,
    });
    assert_that(&census.total()).is_equal_to(4);
}

#[test]
fn test_spawn_creatures() {
    let mut world = common::create_test_world();
    let mut rng = SmallRng::seed_from_u64(9);
    let spawns = [(IVec2::new(1, 1), SpawnKind::Herbivore), (IVec2::new(2, 2), SpawnKind::Carnivore)];

    let spawned = spawn_creatures(&mut world, &spawns, &mut rng);

    assert_that(&spawned).is_equal_to(2);
    let census = Census::take(creatures(&mut world).iter());
    assert_that(&(census.herbivores, census.carnivores)).is_equal_to((1, 1));
}

#[test]
fn test_herbivores_graze_underfoot() {
    let mut world = common::create_test_world();
    world
        .resource_mut::<WorldMap>()
        .set_things_at(AT, Some(loose(1, Kind::Grass)))
        .unwrap();
    let creature = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    let before = creature.energy;
    world.spawn((Position(AT), creature));

    world.run_system_once(creature_system).unwrap();

    assert_that(&world.resource::<WorldMap>().things_at(AT)).is_none();
    let all = creatures(&mut world);
    let after = &all[0];
    assert_that(&after.energy).is_equal_to(before + PLANT_ENERGY - 100);
    assert_that(&after.age).is_equal_to(100);
}

#[test]
fn test_carnivores_eat_carcasses_underfoot() {
    let mut world = common::create_test_world();
    let mut carcass = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    carcass.energy = MIN_VIABLE_ENERGY - 10;
    world.spawn((Position(AT), carcass));
    let hunter = Creature::new(Diet::Carnivore, 0.001, None, IVec2::ZERO);
    let before = hunter.energy;
    world.spawn((Position(AT), hunter));

    world.run_system_once(creature_system).unwrap();

    let left = creatures(&mut world);
    assert_that(&left.len()).is_equal_to(1);
    assert_that(&left[0].diet).is_equal_to(Diet::Carnivore);
    assert_that(&left[0].energy).is_equal_to(before + (MIN_VIABLE_ENERGY - 10) / 10 - 100);
}

#[test]
fn test_creatures_starve() {
    let mut world = common::create_test_world();
    let mut creature = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    creature.energy = MIN_VIABLE_ENERGY + 50;
    world.spawn((Position(AT), creature));

    world.run_system_once(creature_system).unwrap();

    let census = Census::take(creatures(&mut world).iter());
    assert_that(&census.dead).is_equal_to(1);
}

#[test]
fn test_the_dead_stay_put() {
    let mut world = common::create_test_world();
    let mut creature = Creature::new(Diet::Herbivore, 1.0, None, IVec2::X);
    creature.energy = 0;
    world.spawn((Position(AT), creature));

    world.run_system_once(creature_system).unwrap();

    let mut query = world.query::<&Position>();
    assert_that(&query.single(&world).unwrap().0).is_equal_to(AT);
    assert_that(&creatures(&mut world)[0].age).is_equal_to(0);
}

#[test]
fn test_well_fed_creatures_breed() {
    let mut world = common::create_test_world();
    let mut parent = Creature::new(Diet::Herbivore, 0.001, None, IVec2::ZERO);
    parent.energy = parent.reproduction_threshold + 1000;
    world.spawn((Position(AT), parent));

    world.run_system_once(creature_system).unwrap();

    let all = creatures(&mut world);
    assert_that(&all.len()).is_equal_to(2);
    assert_that(&all.iter().all(Creature::is_alive)).is_true();
}

fn position_of(world: &mut bevy_ecs::world::World, diet: Diet) -> IVec2 {
    let mut query = world.query::<(&Position, &Creature)>();
    query
        .iter(world)
        .find(|(_, c)| c.diet == diet && c.is_alive())
        .map(|(p, _)| p.0)
        .expect("A living creature of that diet should exist")
}

fn corpse(diet: Diet) -> Creature {
    let mut dead = Creature::new(diet, 0.001, None, IVec2::ZERO);
    dead.energy = 0;
    dead
}

#[test]
fn test_herbivores_shy_away_from_carnivore_corpses() {
    let remains = AT + IVec2::X * 2;
    for seed in 0..20 {
        let mut world = common::create_test_world();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.spawn((Position(remains), corpse(Diet::Carnivore)));
        world.spawn((Position(AT), Creature::new(Diet::Herbivore, 0.001, None, IVec2::X)));

        world.run_system_once(creature_system).unwrap();

        let now = position_of(&mut world, Diet::Herbivore);
        assert_that(&manhattan(now, remains)).is_equal_to(3);
    }
}

#[test]
fn test_carnivores_close_in_on_a_meal() {
    let meal = AT + IVec2::X * 3;
    for seed in 0..20 {
        let mut world = common::create_test_world();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.spawn((Position(meal), corpse(Diet::Herbivore)));
        world.spawn((Position(AT), Creature::new(Diet::Carnivore, 0.001, None, -IVec2::X)));

        world.run_system_once(creature_system).unwrap();

        assert_that(&position_of(&mut world, Diet::Carnivore)).is_equal_to(AT + IVec2::X);
    }
}
