//! Property-based tests for inventory and crafting atomicity
//!
//! Validates:
//! - No stack ever exceeds its category ceiling
//! - Distinct stacks never exceed the slot count
//! - A rejected add, remove or craft leaves the inventory untouched
//! - A successful craft removes exactly the recipe inputs

use emberwild_core::ItemKind;
use emberwild_world::{requirements, Inventory, RecipeId, RecipeOutput, INVENTORY_CAPACITY};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(ItemKind, u32),
    Remove(ItemKind, u32),
    Craft(RecipeId),
}

fn any_kind() -> impl Strategy<Value = ItemKind> {
    prop::sample::select(ItemKind::ALL.to_vec())
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any_kind(), 1u32..30).prop_map(|(kind, n)| Op::Add(kind, n)),
        2 => (any_kind(), 1u32..10).prop_map(|(kind, n)| Op::Remove(kind, n)),
        2 => prop::sample::select(RecipeId::ALL.to_vec()).prop_map(Op::Craft),
    ]
}

fn well_formed(inventory: &Inventory) -> bool {
    inventory.len() <= INVENTORY_CAPACITY
        && inventory
            .items()
            .iter()
            .all(|item| item.count >= 1 && item.count <= item.kind.stack_cap())
}

proptest! {
    #[test]
    fn operations_are_all_or_nothing(ops in prop::collection::vec(any_op(), 1..80)) {
        let mut inventory = Inventory::new();

        for op in ops {
            let before = inventory.clone();
            let result = match &op {
                Op::Add(kind, n) => inventory.add(*kind, *n).map(|_| ()),
                Op::Remove(kind, n) => inventory.remove(*kind, *n),
                Op::Craft(id) => {
                    let ready = requirements(*id, &inventory).can_craft;
                    let crafted = id.recipe().craft(&mut inventory).map(|_| ());
                    if ready {
                        // Only an output that does not fit may still fail.
                        if crafted.is_ok() {
                            for input in id.recipe().inputs {
                                let produced = match id.recipe().output {
                                    RecipeOutput::Item { kind, count } if kind == input.kind => count,
                                    _ => 0,
                                };
                                prop_assert_eq!(
                                    inventory.count(input.kind) + input.count,
                                    before.count(input.kind) + produced
                                );
                            }
                        }
                    } else {
                        prop_assert!(crafted.is_err());
                    }
                    crafted
                }
            };

            if result.is_err() {
                prop_assert_eq!(&inventory, &before, "rejected {:?} mutated inventory", op);
            }
            prop_assert!(well_formed(&inventory), "malformed after {:?}: {:?}", op, inventory);
        }
    }

    #[test]
    fn collecting_stops_at_the_stack_ceiling(kind in any_kind(), attempts in 1u32..80) {
        let mut inventory = Inventory::new();
        let mut accepted = 0;
        for _ in 0..attempts {
            if inventory.collect(kind).is_ok() {
                accepted += 1;
            }
        }
        prop_assert_eq!(accepted, attempts.min(kind.stack_cap()));
        prop_assert_eq!(inventory.count(kind), accepted);
    }
}
