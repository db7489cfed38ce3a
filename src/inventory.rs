//! The player's slots and hotbar selection.

use bevy_ecs::component::Component;
use smallvec::SmallVec;

use crate::constants::player::{HOTBAR_SLOTS, INVENTORY_SLOTS, STACK_SIZE};
use crate::error::InventoryError;
use crate::things::{Stack, Thing};

/// Fixed slots of stacked things; the first `HOTBAR_SLOTS` form the hotbar.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Option<Stack>>,
    selection: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            selection: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<Stack>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Stack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Selects a hotbar slot; indices past the hotbar are clamped to its last slot.
    pub fn select(&mut self, index: usize) {
        self.selection = index.min(HOTBAR_SLOTS - 1);
    }

    /// Moves the selection by `delta`, wrapping around the hotbar.
    pub fn select_adjacent(&mut self, delta: i32) {
        self.selection = (self.selection as i32 + delta).rem_euclid(HOTBAR_SLOTS as i32) as usize;
    }

    pub fn selected(&self) -> Option<&Stack> {
        self.slot(self.selection)
    }

    pub fn selected_thing(&self) -> Option<Thing> {
        self.selected().map(|s| s.thing)
    }

    /// Total count of `thing` across all slots.
    pub fn count(&self, thing: &Thing) -> u32 {
        self.slots.iter().flatten().filter(|s| s.thing == *thing).map(|s| s.count).sum()
    }

    pub fn has(&self, stack: &Stack) -> bool {
        self.count(&stack.thing) >= stack.count
    }

    /// Whether every stack is held at once; repeated things are summed first.
    pub fn has_all(&self, stacks: &[Stack]) -> bool {
        merge(stacks).iter().all(|s| self.has(s))
    }

    /// The slot `thing` would go into: one already holding it with room to spare, else the first empty one.
    pub fn find_space(&self, thing: &Thing) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| matches!(s, Some(s) if s.thing == *thing && s.space() > 0))
            .or_else(|| self.slots.iter().position(Option::is_none))
    }

    /// Adds a stack, topping up existing stacks of the same thing before using empty slots.
    ///
    /// Either the whole stack fits or nothing changes.
    pub fn add(&mut self, stack: Stack) -> Result<(), InventoryError> {
        if stack.count == 0 {
            return Ok(());
        }
        let mut staged = self.slots.clone();
        let mut remaining = stack.count;
        while remaining > 0 {
            let index = staged
                .iter()
                .position(|s| matches!(s, Some(s) if s.thing == stack.thing && s.space() > 0))
                .or_else(|| staged.iter().position(Option::is_none))
                .ok_or(InventoryError::Full(stack.thing))?;
            let slot = staged[index].get_or_insert(Stack::new(0, stack.thing));
            let moved = remaining.min(STACK_SIZE - slot.count);
            slot.count += moved;
            remaining -= moved;
        }
        self.slots = staged;
        Ok(())
    }

    /// Whether all of `stacks` could be added together.
    pub fn can_add_all(&self, stacks: &[Stack]) -> bool {
        let mut trial = self.clone();
        stacks.iter().all(|s| trial.add(*s).is_ok())
    }

    /// Takes `stack.count` of `stack.thing` from wherever it is held, later slots last.
    pub fn remove(&mut self, stack: &Stack) -> Result<(), InventoryError> {
        let have = self.count(&stack.thing);
        if have < stack.count {
            return Err(InventoryError::Insufficient {
                thing: stack.thing,
                have,
                need: stack.count,
            });
        }
        let mut remaining = stack.count;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(held) = slot.as_mut().filter(|s| s.thing == stack.thing) {
                let taken = remaining.min(held.count);
                held.count -= taken;
                remaining -= taken;
                if held.count == 0 {
                    *slot = None;
                }
            }
        }
        Ok(())
    }

    /// Takes `count` things out of one slot and returns what was taken.
    pub fn remove_from(&mut self, index: usize, count: u32) -> Result<Stack, InventoryError> {
        let slot = self.slots.get_mut(index).ok_or(InventoryError::NoSuchSlot(index))?;
        let Some(held) = slot.as_mut() else {
            return Err(InventoryError::NoSuchSlot(index));
        };
        if held.count < count {
            return Err(InventoryError::Insufficient {
                thing: held.thing,
                have: held.count,
                need: count,
            });
        }
        held.count -= count;
        let taken = Stack::new(count, held.thing);
        if held.count == 0 {
            *slot = None;
        }
        Ok(taken)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), InventoryError> {
        let len = self.slots.len();
        for index in [a, b] {
            if index >= len {
                return Err(InventoryError::NoSuchSlot(index));
            }
        }
        self.slots.swap(a, b);
        Ok(())
    }
}

/// Sums stacks of the same thing, keeping first-seen order.
pub fn merge(stacks: &[Stack]) -> SmallVec<[Stack; 16]> {
    let mut merged: SmallVec<[Stack; 16]> = SmallVec::new();
    for stack in stacks {
        match merged.iter_mut().find(|m| m.thing == stack.thing) {
            Some(existing) => existing.count += stack.count,
            None => merged.push(*stack),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::things::Kind;

    #[test]
    fn test_merge_sums_duplicates() {
        let stone = Thing::loose(Kind::Stone);
        let wood = Thing::loose(Kind::Wood);
        let merged = merge(&[Stack::one(stone), Stack::one(wood), Stack::new(2, stone)]);
        assert_eq!(merged.as_slice(), &[Stack::new(3, stone), Stack::one(wood)]);
    }
}
