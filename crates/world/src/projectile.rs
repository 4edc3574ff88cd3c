//! Projectile physics for arrows.
//!
//! Arrows live in an id-indexed arena owned by the simulation host. Each
//! physics tick integrates flying arrows with semi-implicit Euler, sweeps the
//! travelled segment against visible entities, grounds arrows that drop below
//! the floor and hands grounded arrows back to a nearby player.

use crate::entity::{EntityId, EntityKind, World};
use crate::error::ActionError;
use crate::interaction::{harvest, InteractionOutcome};
use crate::snapshot::{GameSnapshot, PlayerPose};
use emberwild_core::{ItemKind, ToolKind};
use emberwild_physics::{horizontal_distance, nearest_hit, Ray};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Launch speed in units per second.
pub const MUZZLE_SPEED: f32 = 110.0;

/// Downward acceleration in units per second squared.
pub const GRAVITY: f32 = 16.0;

/// Fixed physics timestep.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Arrows below this height are grounded.
pub const GROUND_FLOOR: f32 = 0.1;

/// Grounded arrows this close (horizontally) to the player are picked up.
pub const PICKUP_RADIUS: f32 = 4.5;

/// Flying arrows older than this are discarded.
pub const MAX_FLIGHT_TICKS: u32 = 600;

/// Arrows stuck in an entity are discarded after this many ticks.
pub const STUCK_LINGER_TICKS: u32 = 300;

/// Arrows spawn this far ahead of the camera.
const SPAWN_OFFSET: f32 = 0.5;

/// Identifier of a projectile in the arena.
pub type ProjectileId = u64;

/// Flight state. Both stuck states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    /// In the air.
    Flying,
    /// Embedded in an entity.
    StuckInEntity {
        /// The entity that was struck.
        entity: EntityId,
    },
    /// Resting on the ground, collectible as ammunition.
    Grounded,
}

/// A fired arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Arena id.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec3,
    /// Current velocity; zero once stuck.
    pub velocity: Vec3,
    /// Unit orientation, aligned with velocity while flying.
    pub heading: Vec3,
    /// Flight state.
    pub state: ProjectileState,
    /// Ticks since spawn.
    pub age: u32,
    /// Ticks since the arrow stopped.
    pub rest_ticks: u32,
}

impl Projectile {
    fn new(id: ProjectileId, position: Vec3, direction: Vec3) -> Self {
        let heading = direction.try_normalize().unwrap_or(Vec3::Z);
        Self {
            id,
            position,
            velocity: heading * MUZZLE_SPEED,
            heading,
            state: ProjectileState::Flying,
            age: 0,
            rest_ticks: 0,
        }
    }

    /// Check if the arrow has stopped.
    pub fn is_stuck(&self) -> bool {
        self.state != ProjectileState::Flying
    }

    /// The entity this arrow is embedded in, if any.
    pub fn struck_entity(&self) -> Option<EntityId> {
        match self.state {
            ProjectileState::StuckInEntity { entity } => Some(entity),
            _ => None,
        }
    }

    fn stop(&mut self, state: ProjectileState) {
        self.state = state;
        self.velocity = Vec3::ZERO;
    }
}

/// Something that happened to a projectile during a physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileEvent {
    /// The arrow hit an entity.
    StuckInEntity {
        /// Projectile id.
        id: ProjectileId,
        /// Entity struck.
        entity: EntityId,
        /// Its kind.
        kind: EntityKind,
        /// Item granted when the hit harvested the entity.
        harvested: Option<ItemKind>,
    },
    /// The arrow landed.
    Grounded {
        /// Projectile id.
        id: ProjectileId,
        /// Resting position.
        position: Vec3,
    },
    /// A grounded arrow went back into the inventory.
    Collected {
        /// Projectile id.
        id: ProjectileId,
    },
    /// The arrow was discarded.
    Expired {
        /// Projectile id.
        id: ProjectileId,
    },
}

/// Owned collection of live projectiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileArena {
    projectiles: BTreeMap<ProjectileId, Projectile>,
    next_id: ProjectileId,
}

impl ProjectileArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live projectiles.
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Check if no projectiles are live.
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Look up a projectile.
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Live projectiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> + '_ {
        self.projectiles.values()
    }

    /// Number of arrows lying on the ground.
    pub fn grounded_count(&self) -> usize {
        self.iter()
            .filter(|p| p.state == ProjectileState::Grounded)
            .count()
    }

    /// Drop every projectile.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Fire an arrow from the player's camera.
    ///
    /// Requires the bow to be the active tool and at least one arrow carried.
    /// Consumes one arrow on success.
    pub fn fire(
        &mut self,
        snapshot: &mut GameSnapshot,
        pose: &PlayerPose,
    ) -> Result<ProjectileId, ActionError> {
        snapshot.ensure_alive()?;
        if snapshot.active_tool != Some(ToolKind::Bow) {
            return Err(ActionError::NoRangedTool);
        }
        if snapshot.ammunition() == 0 {
            return Err(ActionError::NoAmmunition);
        }
        snapshot.inventory.remove(ItemKind::Arrow, 1)?;

        let direction = pose.view_direction.try_normalize().unwrap_or(Vec3::Z);
        let id = self.spawn(pose.position + direction * SPAWN_OFFSET, direction);
        debug!(id, ammunition = snapshot.ammunition(), "Arrow fired");
        Ok(id)
    }

    /// Insert a flying arrow without any ammunition check.
    pub fn spawn(&mut self, position: Vec3, direction: Vec3) -> ProjectileId {
        self.next_id += 1;
        let id = self.next_id;
        self.projectiles
            .insert(id, Projectile::new(id, position, direction));
        id
    }

    /// Advance every projectile by `dt` seconds.
    pub fn step(
        &mut self,
        dt: f32,
        world: &mut World,
        snapshot: &mut GameSnapshot,
        player_position: Vec3,
    ) -> Vec<ProjectileEvent> {
        let mut events = Vec::new();

        for projectile in self.projectiles.values_mut() {
            projectile.age = projectile.age.saturating_add(1);
            match projectile.state {
                ProjectileState::Flying => {
                    if let Some(event) = integrate(projectile, dt, world, snapshot) {
                        events.push(event);
                    }
                }
                _ => projectile.rest_ticks = projectile.rest_ticks.saturating_add(1),
            }
        }

        let mut removed = Vec::new();
        for projectile in self.projectiles.values() {
            let expired = match projectile.state {
                ProjectileState::Flying => projectile.age >= MAX_FLIGHT_TICKS,
                ProjectileState::StuckInEntity { entity } => {
                    projectile.rest_ticks >= STUCK_LINGER_TICKS
                        || !world.get(entity).is_some_and(|e| e.visible)
                }
                ProjectileState::Grounded => false,
            };
            if expired {
                removed.push(projectile.id);
                events.push(ProjectileEvent::Expired { id: projectile.id });
                continue;
            }

            let collectible = projectile.state == ProjectileState::Grounded
                && !snapshot.game_over
                && horizontal_distance(projectile.position, player_position) <= PICKUP_RADIUS;
            if collectible {
                match snapshot.inventory.collect(ItemKind::Arrow) {
                    Ok(_) => {
                        removed.push(projectile.id);
                        events.push(ProjectileEvent::Collected { id: projectile.id });
                    }
                    Err(err) => debug!(id = projectile.id, %err, "Arrow left on the ground"),
                }
            }
        }
        for id in removed {
            self.projectiles.remove(&id);
        }

        events
    }
}

fn integrate(
    projectile: &mut Projectile,
    dt: f32,
    world: &mut World,
    snapshot: &mut GameSnapshot,
) -> Option<ProjectileEvent> {
    let previous = projectile.position;
    projectile.velocity.y -= GRAVITY * dt;
    projectile.position += projectile.velocity * dt;
    if let Some(heading) = projectile.velocity.try_normalize() {
        projectile.heading = heading;
    }

    if let Some((ray, travelled)) = Ray::segment(previous, projectile.position) {
        if let Some((entity, t)) = nearest_hit(&ray, world.obstacles(), travelled) {
            projectile.position = ray.at(t);
            projectile.stop(ProjectileState::StuckInEntity { entity });
            let kind = world.get(entity).map(|e| e.kind)?;
            let harvested = if kind == EntityKind::Fauna && !snapshot.game_over {
                match harvest(snapshot, world, entity) {
                    Ok(InteractionOutcome::Harvested { item, .. }) => Some(item),
                    Ok(_) => None,
                    Err(err) => {
                        debug!(entity, %err, "Arrow hit could not be harvested");
                        None
                    }
                }
            } else {
                None
            };
            return Some(ProjectileEvent::StuckInEntity {
                id: projectile.id,
                entity,
                kind,
                harvested,
            });
        }
    }

    if projectile.position.y < GROUND_FLOOR {
        projectile.position.y = GROUND_FLOOR;
        let flat = Vec3::new(projectile.heading.x, 0.0, projectile.heading.z);
        projectile.heading = flat.try_normalize().unwrap_or(Vec3::X);
        projectile.stop(ProjectileState::Grounded);
        return Some(ProjectileEvent::Grounded {
            id: projectile.id,
            position: projectile.position,
        });
    }

    None
}
