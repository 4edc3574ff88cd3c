//! Events emitted by the simulation host for logging and presentation.

use crate::campfire::CampfireId;
use crate::crafting::RecipeId;
use crate::entity::{EntityId, EntityKind};
use crate::projectile::ProjectileId;
use emberwild_core::{ItemKind, ToolKind};
use serde::Serialize;

/// Something observable that happened during a tick or action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// An arrow left the bow.
    Shot {
        /// New projectile.
        projectile: ProjectileId,
        /// Arrows left.
        ammunition: u32,
    },
    /// An entity was harvested, by hand or by arrow.
    Harvested {
        /// Depleted entity.
        entity: EntityId,
        /// Its kind.
        kind: EntityKind,
        /// Item granted.
        item: ItemKind,
    },
    /// An arrow stopped in an entity.
    ArrowStuck {
        /// Projectile.
        projectile: ProjectileId,
        /// Entity hit.
        entity: EntityId,
    },
    /// An arrow landed and can be picked up.
    ArrowGrounded {
        /// Projectile.
        projectile: ProjectileId,
    },
    /// A grounded arrow was picked up.
    ArrowCollected {
        /// Projectile.
        projectile: ProjectileId,
    },
    /// Drank from water, possibly filling a waterskin.
    Drank {
        /// Thirst restored.
        thirst: f32,
        /// A waterskin was filled.
        filled_waterskin: bool,
    },
    /// Cooked at a fire.
    Cooked {
        /// Input.
        raw: ItemKind,
        /// Output.
        cooked: ItemKind,
    },
    /// A recipe was crafted.
    Crafted {
        /// Recipe.
        recipe: RecipeId,
    },
    /// A campfire was placed.
    CampfirePlaced {
        /// Fire id.
        id: CampfireId,
        /// Ground x.
        x: f32,
        /// Ground z.
        z: f32,
    },
    /// A campfire ran out of fuel.
    CampfireExtinguished {
        /// Fire id.
        id: CampfireId,
    },
    /// An item was eaten or drunk.
    Consumed {
        /// Item.
        item: ItemKind,
    },
    /// A tool was equipped or put away.
    ToolToggled {
        /// Tool.
        tool: ToolKind,
        /// Now active.
        active: bool,
    },
    /// An action was refused.
    Rejected {
        /// Action name.
        action: &'static str,
        /// Player-facing reason.
        reason: String,
    },
    /// A new day began.
    DayRolled {
        /// The new day.
        day: u32,
    },
    /// Health reached zero.
    GameOver {
        /// Day of death.
        day: u32,
        /// Time of death.
        time: u32,
    },
    /// Advisory text arrived.
    Advisory {
        /// The advice.
        text: String,
    },
    /// The game was restarted.
    Restarted,
}

impl SimEvent {
    /// Stable name of the event variant.
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::Shot { .. } => "shot",
            SimEvent::Harvested { .. } => "harvested",
            SimEvent::ArrowStuck { .. } => "arrow_stuck",
            SimEvent::ArrowGrounded { .. } => "arrow_grounded",
            SimEvent::ArrowCollected { .. } => "arrow_collected",
            SimEvent::Drank { .. } => "drank",
            SimEvent::Cooked { .. } => "cooked",
            SimEvent::Crafted { .. } => "crafted",
            SimEvent::CampfirePlaced { .. } => "campfire_placed",
            SimEvent::CampfireExtinguished { .. } => "campfire_extinguished",
            SimEvent::Consumed { .. } => "consumed",
            SimEvent::ToolToggled { .. } => "tool_toggled",
            SimEvent::Rejected { .. } => "rejected",
            SimEvent::DayRolled { .. } => "day_rolled",
            SimEvent::GameOver { .. } => "game_over",
            SimEvent::Advisory { .. } => "advisory",
            SimEvent::Restarted => "restarted",
        }
    }
}
