//! World interaction resolver.
//!
//! Casts the player's view ray against nearby visible entities and lit
//! campfires, picks the nearest hit inside the hard cutoff and dispatches the
//! action for its kind.

use crate::campfire::{Campfire, CampfireId};
use crate::entity::{EntityId, EntityKind, World};
use crate::error::ActionError;
use crate::snapshot::{GameSnapshot, PlayerPose};
use emberwild_core::ItemKind;
use emberwild_physics::{horizontal_distance, nearest_hit, Cylinder, Ray};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Hits further than this along the view ray are ignored.
pub const INTERACT_CUTOFF: f32 = 8.0;

/// Candidate distance for campfires.
pub const FIRE_REACH: f32 = 10.0;

/// Thirst restored by drinking or filling at a water source.
pub const WATER_DRINK: f32 = 20.0;

const CAMPFIRE_RADIUS: f32 = 0.8;
const CAMPFIRE_HEIGHT: f32 = 0.8;

/// What the player is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    /// A generated world entity.
    Entity {
        /// Entity id.
        id: EntityId,
        /// Entity kind.
        kind: EntityKind,
    },
    /// A lit campfire (the fire-source kind).
    Campfire(CampfireId),
}

/// The current interaction target, used for prompting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionTarget {
    /// What was hit.
    pub subject: Subject,
    /// Distance along the view ray.
    pub distance: f32,
}

impl InteractionTarget {
    /// Prompt text such as "Chop Tree".
    pub fn prompt(&self) -> String {
        match self.subject {
            Subject::Entity { kind, .. } => format!("{} {}", kind.verb(), kind.name()),
            Subject::Campfire(_) => "Cook at Campfire".to_string(),
        }
    }
}

/// Result of a successful interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// Drank directly from a water source.
    Drank {
        /// Thirst restored.
        thirst: f32,
    },
    /// Filled an empty waterskin (and drank).
    FilledWaterskin {
        /// Thirst restored.
        thirst: f32,
    },
    /// Cooked one raw item at a fire.
    Cooked {
        /// Item consumed.
        raw: ItemKind,
        /// Item produced.
        cooked: ItemKind,
    },
    /// At a fire with nothing to cook.
    NothingToCook,
    /// Harvested and depleted an entity.
    Harvested {
        /// The depleted entity.
        entity: EntityId,
        /// Its kind.
        kind: EntityKind,
        /// Item granted.
        item: ItemKind,
    },
}

fn campfire_shape(fire: &Campfire) -> Cylinder {
    Cylinder::new(fire.position, CAMPFIRE_RADIUS, CAMPFIRE_HEIGHT)
}

/// Find the nearest interactable along the view ray.
///
/// Returns `None` when nothing is hit within [`INTERACT_CUTOFF`]; the caller
/// clears its current target in that case.
pub fn acquire_target(
    world: &World,
    campfires: &[Campfire],
    pose: &PlayerPose,
) -> Option<InteractionTarget> {
    let ray = Ray::new(pose.position, pose.view_direction)?;

    let entities = world
        .within_reach(pose.position)
        .map(|entity| {
            (
                Subject::Entity {
                    id: entity.id,
                    kind: entity.kind,
                },
                entity.shape(),
            )
        });
    let fires = campfires
        .iter()
        .filter(|fire| fire.is_lit())
        .filter(|fire| horizontal_distance(fire.position, pose.position) <= FIRE_REACH)
        .map(|fire| (Subject::Campfire(fire.id), campfire_shape(fire)));

    nearest_hit(&ray, entities.chain(fires), INTERACT_CUTOFF)
        .map(|(subject, distance)| InteractionTarget { subject, distance })
}

/// Harvest an entity into the inventory and deplete it.
///
/// A full inventory rejects the harvest and leaves the entity standing.
pub fn harvest(
    snapshot: &mut GameSnapshot,
    world: &mut World,
    id: EntityId,
) -> Result<InteractionOutcome, ActionError> {
    let entity = world
        .get(id)
        .filter(|entity| entity.visible)
        .ok_or(ActionError::NothingInRange)?;
    let kind = entity.kind;
    let item = kind.harvest_yield().ok_or(ActionError::NothingInRange)?;

    snapshot.inventory.collect(item)?;
    world.deplete(id);
    debug!(entity = id, ?kind, %item, "Harvested");
    Ok(InteractionOutcome::Harvested {
        entity: id,
        kind,
        item,
    })
}

/// Apply the action for `target`.
pub fn interact(
    snapshot: &mut GameSnapshot,
    world: &mut World,
    target: &InteractionTarget,
) -> Result<InteractionOutcome, ActionError> {
    snapshot.ensure_alive()?;
    match target.subject {
        Subject::Campfire(id) => {
            let lit = snapshot
                .campfires
                .iter()
                .any(|fire| fire.id == id && fire.is_lit());
            if !lit {
                return Err(ActionError::NothingInRange);
            }
            Ok(match snapshot.cook()? {
                Some((raw, cooked)) => InteractionOutcome::Cooked { raw, cooked },
                None => InteractionOutcome::NothingToCook,
            })
        }
        Subject::Entity {
            kind: EntityKind::WaterSource,
            ..
        } => Ok(drink_or_fill(snapshot)),
        Subject::Entity { id, .. } => harvest(snapshot, world, id),
    }
}

/// Fill an empty waterskin if one is carried, otherwise drink. Either way thirst
/// rises by [`WATER_DRINK`] exactly once.
fn drink_or_fill(snapshot: &mut GameSnapshot) -> InteractionOutcome {
    let empty = snapshot
        .inventory
        .find(ItemKind::Waterskin)
        .map(|item| item.id);
    let filled = match empty {
        Some(id) => match snapshot.inventory.relabel(id, ItemKind::FullWaterskin) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "Could not fill waterskin");
                false
            }
        },
        None => false,
    };
    snapshot.stats.adjust(0.0, 0.0, WATER_DRINK);

    if filled {
        InteractionOutcome::FilledWaterskin {
            thirst: WATER_DRINK,
        }
    } else {
        InteractionOutcome::Drank {
            thirst: WATER_DRINK,
        }
    }
}
