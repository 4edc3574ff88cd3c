//! Inventory engine for the player's carried items.
//!
//! Provides a 15-slot, stack-per-name inventory with category ceilings,
//! all-or-nothing transactions and the display-priority ordering the HUD
//! relies on.

use crate::error::ActionError;
use emberwild_core::{ItemCategory, ItemKind};
use serde::{Deserialize, Serialize};

/// Unique identifier of an inventory stack.
pub type ItemId = u64;

/// Maximum number of distinct stacks.
pub const INVENTORY_CAPACITY: usize = 15;

/// A stack of one item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Stable identity used by consume requests from the HUD.
    pub id: ItemId,
    /// What the stack holds.
    pub kind: ItemKind,
    /// Number of items (always positive while stored).
    pub count: u32,
}

impl InventoryItem {
    /// Category of the stacked item.
    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Remaining room before the category ceiling.
    pub fn remaining_space(&self) -> u32 {
        self.kind.stack_cap().saturating_sub(self.count)
    }
}

/// Flat record used for persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct InventoryRecord {
    #[serde(default)]
    items: Vec<InventoryItem>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    INVENTORY_CAPACITY
}

/// The player's inventory.
///
/// Invariants: at most one stack per [`ItemKind`] (and one per water container,
/// whichever fill state it is in), every stack has a positive
/// count no larger than its category ceiling, at most `capacity` stacks, and
/// stacks are kept in display-priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InventoryRecord", into = "InventoryRecord")]
pub struct Inventory {
    items: Vec<InventoryItem>,
    next_id: ItemId,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl From<InventoryRecord> for Inventory {
    fn from(record: InventoryRecord) -> Self {
        let mut inventory = Inventory::with_capacity(record.capacity.max(1));
        for item in record.items {
            if item.count == 0 {
                continue;
            }
            let count = item.count.min(item.kind.stack_cap());
            if inventory.holds_variant_of(item.kind) {
                continue;
            }
            let position = inventory.items.iter().position(|s| s.kind == item.kind);
            match position {
                Some(index) => {
                    let existing = &mut inventory.items[index];
                    existing.count = (existing.count + count).min(item.kind.stack_cap());
                }
                None if !inventory.is_full() => {
                    inventory.next_id = inventory.next_id.max(item.id + 1);
                    inventory.items.push(InventoryItem { count, ..item });
                }
                None => {}
            }
        }
        inventory.sort();
        inventory
    }
}

impl From<Inventory> for InventoryRecord {
    fn from(inventory: Inventory) -> Self {
        Self {
            items: inventory.items,
            capacity: inventory.capacity,
        }
    }
}

impl Inventory {
    /// Create an empty inventory with the standard 15 slots.
    pub fn new() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }

    /// Create an empty inventory with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Build an inventory from `(kind, count)` pairs, failing on the first pair that does not fit.
    pub fn with_items<I: IntoIterator<Item = (ItemKind, u32)>>(
        items: I,
    ) -> Result<Self, ActionError> {
        let mut inventory = Self::new();
        for (kind, count) in items {
            inventory.add(kind, count)?;
        }
        Ok(inventory)
    }

    /// Stacks in display order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Look up a stack by id.
    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find the stack holding `kind`.
    pub fn find(&self, kind: ItemKind) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Count of `kind` carried.
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.find(kind).map_or(0, |item| item.count)
    }

    /// Check if at least `amount` of `kind` is carried.
    pub fn has(&self, kind: ItemKind, amount: u32) -> bool {
        self.count(kind) >= amount
    }

    /// Sum of all stack counts.
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|item| item.count).sum()
    }

    /// Number of distinct stacks.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of distinct stacks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if no new distinct stack can be created.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Pick up a single item.
    pub fn collect(&mut self, kind: ItemKind) -> Result<ItemId, ActionError> {
        self.add(kind, 1)
    }

    /// Add `amount` of `kind`, all or nothing.
    ///
    /// Merges into the existing stack when one exists; otherwise opens a new
    /// stack if a slot is free. Returns the id of the stack that received the items.
    pub fn add(&mut self, kind: ItemKind, amount: u32) -> Result<ItemId, ActionError> {
        if let Some(existing) = self.items.iter_mut().find(|item| item.kind == kind) {
            if existing.remaining_space() < amount {
                return Err(ActionError::StackFull(kind));
            }
            existing.count += amount;
            return Ok(existing.id);
        }

        if amount == 0 {
            return Err(ActionError::UnknownItem);
        }
        if self.holds_variant_of(kind) {
            return Err(ActionError::StackFull(kind));
        }
        if self.is_full() {
            return Err(ActionError::InventoryFull);
        }
        if amount > kind.stack_cap() {
            return Err(ActionError::StackFull(kind));
        }

        let id = self.allocate_id();
        self.items.push(InventoryItem {
            id,
            kind,
            count: amount,
        });
        self.sort();
        Ok(id)
    }

    /// A water container is carried in its other fill state.
    fn holds_variant_of(&self, kind: ItemKind) -> bool {
        kind.container_variant()
            .is_some_and(|variant| self.items.iter().any(|item| item.kind == variant))
    }

    /// Remove exactly `amount` of `kind`, removing the stack when it empties.
    pub fn remove(&mut self, kind: ItemKind, amount: u32) -> Result<(), ActionError> {
        let Some(index) = self.items.iter().position(|item| item.kind == kind) else {
            return Err(ActionError::MissingIngredients {
                missing: format!("{amount} {kind}"),
            });
        };
        let stack = &mut self.items[index];
        if stack.count < amount {
            return Err(ActionError::MissingIngredients {
                missing: format!("{} {kind}", amount - stack.count),
            });
        }
        stack.count -= amount;
        if stack.count == 0 {
            self.items.remove(index);
        }
        Ok(())
    }

    /// Change what a stack holds without touching its id or count.
    ///
    /// Used for containers that change state (empty/full waterskin).
    pub fn relabel(&mut self, id: ItemId, kind: ItemKind) -> Result<(), ActionError> {
        if self.items.iter().any(|item| item.kind == kind && item.id != id) {
            return Err(ActionError::StackFull(kind));
        }
        let stack = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ActionError::UnknownItem)?;
        if stack.count > kind.stack_cap() {
            return Err(ActionError::StackFull(kind));
        }
        stack.kind = kind;
        self.sort();
        Ok(())
    }

    /// Run `op` against a working copy and keep the result only on success.
    pub fn transact<T, F>(&mut self, op: F) -> Result<T, ActionError>
    where
        F: FnOnce(&mut Inventory) -> Result<T, ActionError>,
    {
        let mut working = self.clone();
        let value = op(&mut working)?;
        *self = working;
        Ok(value)
    }

    /// Convert one raw item into its cooked form.
    ///
    /// Meat takes priority over fruit. Returns the `(raw, cooked)` pair that
    /// was converted, or `None` if nothing cookable is carried.
    pub fn cook_at_fire(&mut self) -> Result<Option<(ItemKind, ItemKind)>, ActionError> {
        let Some(raw) = [ItemKind::RawMeat, ItemKind::Apple]
            .into_iter()
            .find(|kind| self.has(*kind, 1))
        else {
            return Ok(None);
        };
        let Some(cooked) = raw.cooked() else {
            return Ok(None);
        };
        self.transact(|inv| {
            inv.remove(raw, 1)?;
            inv.add(cooked, 1)?;
            Ok(Some((raw, cooked)))
        })
    }

    /// Re-establish display-priority order (stable within a priority class).
    pub fn sort(&mut self) {
        self.items.sort_by_key(|item| item.kind.display_priority());
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}
