use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use squareworldcraft::{
    error::InventoryError,
    inventory::Inventory,
    things::{Kind, Stack, Thing, ToolKind},
};

mod common;

use common::loose;

#[test]
fn test_add_tops_up_before_using_empty_slots() {
    let mut inventory = Inventory::new(4);
    inventory.add(loose(998, Kind::Stone)).unwrap();
    inventory.add(loose(3, Kind::Stone)).unwrap();

    assert_that(&inventory.slot(0).copied()).is_equal_to(Some(loose(999, Kind::Stone)));
    assert_that(&inventory.slot(1).copied()).is_equal_to(Some(loose(2, Kind::Stone)));
    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(1001);
}

#[test]
fn test_add_fills_a_gap_left_by_removal() {
    let mut inventory = Inventory::new(3);
    inventory.add(loose(1, Kind::Stone)).unwrap();
    inventory.add(loose(1, Kind::Wood)).unwrap();
    inventory.remove(&loose(1, Kind::Stone)).unwrap();
    inventory.add(loose(1, Kind::Clay)).unwrap();

    assert_that(&inventory.slot(0).copied()).is_equal_to(Some(loose(1, Kind::Clay)));
}

#[test]
fn test_add_is_all_or_nothing() {
    let mut inventory = Inventory::new(2);
    inventory.add(loose(999, Kind::Stone)).unwrap();
    inventory.add(loose(990, Kind::Wood)).unwrap();
    let before = inventory.clone();

    let result = inventory.add(loose(20, Kind::Wood));

    assert_eq!(result, Err(InventoryError::Full(Thing::loose(Kind::Wood))));
    assert_eq!(inventory, before);
}

#[test]
fn test_add_nothing_always_fits() {
    let mut inventory = Inventory::new(0);
    assert_that(&inventory.add(loose(0, Kind::Stone))).is_ok();
}

#[test]
fn test_remove_across_slots() {
    let mut inventory = Inventory::new(4);
    inventory.add(loose(1500, Kind::Stone)).unwrap();
    inventory.remove(&loose(1200, Kind::Stone)).unwrap();

    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(300);
    assert_that(&inventory.slot(0).is_none()).is_true();
    assert_that(&inventory.slot(1).copied()).is_equal_to(Some(loose(300, Kind::Stone)));
}

#[test]
fn test_remove_insufficient_leaves_inventory_alone() {
    let mut inventory = Inventory::new(4);
    inventory.add(loose(2, Kind::Stone)).unwrap();

    let result = inventory.remove(&loose(3, Kind::Stone));

    assert_eq!(
        result,
        Err(InventoryError::Insufficient {
            thing: Thing::loose(Kind::Stone),
            have: 2,
            need: 3
        })
    );
    assert_that(&inventory.count(&Thing::loose(Kind::Stone))).is_equal_to(2);
}

#[test]
fn test_remove_from_single_slot() {
    let mut inventory = Inventory::new(2);
    inventory.add(loose(5, Kind::Clay)).unwrap();

    let taken = inventory.remove_from(0, 5).unwrap();

    assert_that(&taken).is_equal_to(loose(5, Kind::Clay));
    assert_that(&inventory.slot(0).is_none()).is_true();
    assert_that(&inventory.remove_from(0, 1)).is_err();
    assert_eq!(inventory.remove_from(7, 1), Err(InventoryError::NoSuchSlot(7)));
}

#[test]
fn test_selection_stays_on_the_hotbar() {
    let mut inventory = Inventory::default();

    inventory.select(25);
    assert_that(&inventory.selection()).is_equal_to(9);

    inventory.select_adjacent(1);
    assert_that(&inventory.selection()).is_equal_to(0);

    inventory.select_adjacent(-1);
    assert_that(&inventory.selection()).is_equal_to(9);

    inventory.select_adjacent(-3);
    assert_that(&inventory.selection()).is_equal_to(6);
}

#[test]
fn test_selected_thing() {
    let pickaxe = Thing::tool(ToolKind::Pickaxe, Kind::Iron);
    let mut inventory = common::inventory_with(&[loose(1, Kind::Stone), Stack::one(pickaxe)]);

    assert_that(&inventory.selected_thing()).is_equal_to(Some(Thing::loose(Kind::Stone)));
    inventory.select(1);
    assert_that(&inventory.selected_thing()).is_equal_to(Some(pickaxe));
    inventory.select(2);
    assert_that(&inventory.selected_thing()).is_none();
}

#[test]
fn test_has_all_sums_repeats() {
    let inventory = common::inventory_with(&[loose(1, Kind::Stone), loose(1, Kind::Wood)]);

    assert_that(&inventory.has_all(&[loose(1, Kind::Stone), loose(1, Kind::Wood)])).is_true();
    assert_that(&inventory.has_all(&[loose(1, Kind::Stone), loose(1, Kind::Stone)])).is_false();
}

#[test]
fn test_can_add_all_checks_together() {
    let mut inventory = Inventory::new(2);
    inventory.add(loose(1, Kind::Stone)).unwrap();

    assert_that(&inventory.can_add_all(&[loose(5, Kind::Stone), loose(1, Kind::Wood)])).is_true();
    assert_that(&inventory.can_add_all(&[loose(1, Kind::Wood), loose(1, Kind::Clay)])).is_false();
    assert_that(&inventory.count(&Thing::loose(Kind::Wood))).is_equal_to(0);
}

#[test]
fn test_swap_and_find_space() {
    let mut inventory = common::inventory_with(&[loose(1, Kind::Stone), loose(1, Kind::Wood)]);

    inventory.swap(0, 1).unwrap();
    assert_that(&inventory.slot(0).copied()).is_equal_to(Some(loose(1, Kind::Wood)));
    assert_that(&inventory.find_space(&Thing::loose(Kind::Stone))).is_equal_to(Some(1));
    assert_that(&inventory.find_space(&Thing::loose(Kind::Clay))).is_equal_to(Some(2));
    assert_eq!(inventory.swap(0, 99), Err(InventoryError::NoSuchSlot(99)));
}
