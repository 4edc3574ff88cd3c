//! Rejected player actions.
//!
//! Every variant describes an action that left the snapshot untouched.

use emberwild_core::ItemKind;
use thiserror::Error;

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No free slot for a new distinct stack.
    #[error("inventory full")]
    InventoryFull,
    /// The existing stack of this item is at its category ceiling.
    #[error("cannot carry more {0}")]
    StackFull(ItemKind),
    /// A recipe's inputs are not all present.
    #[error("missing {missing}")]
    MissingIngredients {
        /// Human-readable list such as "2 Wood, 1 Flint Stone".
        missing: String,
    },
    /// Tried to fire with no arrows.
    #[error("no arrows")]
    NoAmmunition,
    /// Tried to fire without the bow equipped.
    #[error("no bow equipped")]
    NoRangedTool,
    /// Nothing interactable within reach.
    #[error("nothing in range")]
    NothingInRange,
    /// Referenced an inventory item that does not exist.
    #[error("no such item")]
    UnknownItem,
    /// The player is dead; only a restart clears this.
    #[error("game over")]
    GameOver,
}

impl ActionError {
    /// Icon tag shown with the rejection notification.
    pub fn icon(&self) -> &'static str {
        match self {
            ActionError::InventoryFull | ActionError::StackFull(_) => "bag_full",
            ActionError::MissingIngredients { .. } => "craft_missing",
            ActionError::NoAmmunition | ActionError::NoRangedTool => "arrow",
            ActionError::NothingInRange | ActionError::UnknownItem => "warning",
            ActionError::GameOver => "skull",
        }
    }
}
