//! Crafting rule set.
//!
//! Recipes are a fixed table; [`requirements`] is a pure query the HUD calls
//! before offering a craft, and [`Recipe::craft`] applies a recipe atomically.

use crate::error::ActionError;
use crate::inventory::Inventory;
use emberwild_core::ItemKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a craftable recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeId {
    /// Placed fire.
    Campfire,
    /// Empty water container.
    Waterskin,
    /// Bundle of five arrows.
    Arrows,
    /// Ranged tool.
    Bow,
    /// Hand-held light.
    Torch,
}

impl RecipeId {
    /// Every recipe, in menu order.
    pub const ALL: [RecipeId; 5] = [
        RecipeId::Campfire,
        RecipeId::Waterskin,
        RecipeId::Arrows,
        RecipeId::Bow,
        RecipeId::Torch,
    ];

    /// Stable string key (e.g. `"campfire"`).
    pub fn key(self) -> &'static str {
        match self {
            RecipeId::Campfire => "campfire",
            RecipeId::Waterskin => "waterskin",
            RecipeId::Arrows => "arrows",
            RecipeId::Bow => "bow",
            RecipeId::Torch => "torch",
        }
    }

    /// Parse a recipe key.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(raw))
    }

    /// The recipe definition.
    pub fn recipe(self) -> &'static Recipe {
        match self {
            RecipeId::Campfire => &RECIPES[0],
            RecipeId::Waterskin => &RECIPES[1],
            RecipeId::Arrows => &RECIPES[2],
            RecipeId::Bow => &RECIPES[3],
            RecipeId::Torch => &RECIPES[4],
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Crafting recipe input requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeInput {
    /// Item required for crafting.
    pub kind: ItemKind,
    /// Amount of this item required.
    pub count: u32,
}

/// What a recipe produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeOutput {
    /// Items added to the inventory.
    Item {
        /// Item produced.
        kind: ItemKind,
        /// Amount produced.
        count: u32,
    },
    /// A campfire placed in front of the player.
    PlaceCampfire,
}

/// Crafting recipe definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Recipe identifier.
    pub id: RecipeId,
    /// Items consumed.
    pub inputs: &'static [RecipeInput],
    /// Result of crafting.
    pub output: RecipeOutput,
}

const fn input(kind: ItemKind, count: u32) -> RecipeInput {
    RecipeInput { kind, count }
}

/// The recipe table, indexed in [`RecipeId::ALL`] order.
pub static RECIPES: [Recipe; 5] = [
    Recipe {
        id: RecipeId::Campfire,
        inputs: &[input(ItemKind::Wood, 3), input(ItemKind::FlintStone, 1)],
        output: RecipeOutput::PlaceCampfire,
    },
    Recipe {
        id: RecipeId::Waterskin,
        inputs: &[input(ItemKind::Wood, 2)],
        output: RecipeOutput::Item {
            kind: ItemKind::Waterskin,
            count: 1,
        },
    },
    Recipe {
        id: RecipeId::Arrows,
        inputs: &[input(ItemKind::Wood, 1)],
        output: RecipeOutput::Item {
            kind: ItemKind::Arrow,
            count: 5,
        },
    },
    Recipe {
        id: RecipeId::Bow,
        inputs: &[input(ItemKind::Wood, 3)],
        output: RecipeOutput::Item {
            kind: ItemKind::Bow,
            count: 1,
        },
    },
    Recipe {
        id: RecipeId::Torch,
        inputs: &[input(ItemKind::Wood, 1), input(ItemKind::FlintStone, 1)],
        output: RecipeOutput::Item {
            kind: ItemKind::Torch,
            count: 1,
        },
    },
];

/// Answer to "can I craft this?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// All inputs are present.
    pub can_craft: bool,
    /// Human-readable shortfall, empty when craftable.
    pub missing: String,
}

/// Pure check of a recipe against an inventory.
pub fn requirements(id: RecipeId, inventory: &Inventory) -> Requirements {
    let missing = id.recipe().shortfall(inventory);
    Requirements {
        can_craft: missing.is_empty(),
        missing: describe(&missing),
    }
}

fn describe(items: &[(ItemKind, u32)]) -> String {
    items
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Recipe {
    /// Inputs not covered by `inventory`, with the missing amount of each.
    pub fn shortfall(&self, inventory: &Inventory) -> Vec<(ItemKind, u32)> {
        self.inputs
            .iter()
            .filter_map(|input| {
                let have = inventory.count(input.kind);
                (have < input.count).then(|| (input.kind, input.count - have))
            })
            .collect()
    }

    /// Check if the given inventory contains all required inputs.
    pub fn can_craft(&self, inventory: &Inventory) -> bool {
        self.shortfall(inventory).is_empty()
    }

    /// Deduct the inputs and add any item output, all or nothing.
    ///
    /// For [`RecipeOutput::PlaceCampfire`] the caller places the fire; nothing
    /// is added to the inventory.
    pub fn craft(&self, inventory: &mut Inventory) -> Result<RecipeOutput, ActionError> {
        let missing = self.shortfall(inventory);
        if !missing.is_empty() {
            return Err(ActionError::MissingIngredients {
                missing: describe(&missing),
            });
        }

        inventory.transact(|inv| {
            for input in self.inputs {
                inv.remove(input.kind, input.count)?;
            }
            if let RecipeOutput::Item { kind, count } = self.output {
                inv.add(kind, count)?;
            }
            Ok(self.output)
        })
    }
}
