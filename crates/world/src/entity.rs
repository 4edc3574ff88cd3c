//! Harvestable and interactive world entities.
//!
//! Placement is owned by world generation; the core only reads positions and
//! flips visibility when something is harvested.

use emberwild_core::ItemKind;
use emberwild_physics::{horizontal_distance, Cylinder};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of a world entity.
pub type EntityId = u64;

/// Kinds of entity the player can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Chopped for wood.
    Tree,
    /// Gathered for apples.
    FruitTree,
    /// Foraged for berries.
    Bush,
    /// Mined for flint.
    Rock,
    /// Pond or stream; never depleted.
    WaterSource,
    /// Wildlife; harvested for meat.
    Fauna,
}

impl EntityKind {
    /// Collision radius used for picking and projectile hits.
    pub fn radius(self) -> f32 {
        match self {
            EntityKind::Tree => 0.6,
            EntityKind::FruitTree => 0.7,
            EntityKind::Bush => 0.8,
            EntityKind::Rock => 0.9,
            EntityKind::WaterSource => 2.5,
            EntityKind::Fauna => 0.6,
        }
    }

    /// Height of the collision cylinder.
    pub fn height(self) -> f32 {
        match self {
            EntityKind::Tree => 6.0,
            EntityKind::FruitTree => 4.0,
            EntityKind::Bush => 1.2,
            EntityKind::Rock => 1.0,
            EntityKind::WaterSource => 0.3,
            EntityKind::Fauna => 1.3,
        }
    }

    /// How far away the entity is considered for interaction.
    pub fn reach(self) -> f32 {
        match self {
            EntityKind::Fauna => 10.0,
            _ => 12.0,
        }
    }

    /// Item granted when harvested, `None` for water.
    pub fn harvest_yield(self) -> Option<ItemKind> {
        match self {
            EntityKind::Tree => Some(ItemKind::Wood),
            EntityKind::FruitTree => Some(ItemKind::Apple),
            EntityKind::Bush => Some(ItemKind::Berries),
            EntityKind::Rock => Some(ItemKind::FlintStone),
            EntityKind::Fauna => Some(ItemKind::RawMeat),
            EntityKind::WaterSource => None,
        }
    }

    /// Name shown in prompts and notifications.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Tree => "Tree",
            EntityKind::FruitTree => "Fruit Tree",
            EntityKind::Bush => "Bush",
            EntityKind::Rock => "Rock",
            EntityKind::WaterSource => "Water",
            EntityKind::Fauna => "Animal",
        }
    }

    /// Verb shown in the interaction prompt.
    pub fn verb(self) -> &'static str {
        match self {
            EntityKind::Tree => "Chop",
            EntityKind::FruitTree => "Gather",
            EntityKind::Bush => "Forage",
            EntityKind::Rock => "Mine",
            EntityKind::WaterSource => "Drink",
            EntityKind::Fauna => "Harvest",
        }
    }
}

/// A placed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEntity {
    /// Unique id.
    pub id: EntityId,
    /// What the entity is.
    pub kind: EntityKind,
    /// Ground position.
    pub position: Vec3,
    /// `false` once harvested; hidden entities are neither targets nor obstacles.
    pub visible: bool,
}

impl WorldEntity {
    /// Create a visible entity standing at `(x, z)`.
    pub fn new(id: EntityId, kind: EntityKind, x: f32, z: f32) -> Self {
        Self {
            id,
            kind,
            position: Vec3::new(x, 0.0, z),
            visible: true,
        }
    }

    /// Collision shape of the entity.
    pub fn shape(&self) -> Cylinder {
        Cylinder::new(self.position, self.kind.radius(), self.kind.height())
    }
}

/// The set of entities produced by world generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    entities: Vec<WorldEntity>,
}

impl World {
    /// Wrap a generated entity list.
    pub fn new(entities: Vec<WorldEntity>) -> Self {
        Self { entities }
    }

    /// All entities, visible or not.
    pub fn entities(&self) -> &[WorldEntity] {
        &self.entities
    }

    /// Look up an entity.
    pub fn get(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Visible entities only.
    pub fn visible(&self) -> impl Iterator<Item = &WorldEntity> + '_ {
        self.entities.iter().filter(|entity| entity.visible)
    }

    /// Visible entities within their interaction reach of `position`.
    pub fn within_reach(&self, position: Vec3) -> impl Iterator<Item = &WorldEntity> + '_ {
        self.visible()
            .filter(move |entity| horizontal_distance(entity.position, position) <= entity.kind.reach())
    }

    /// Collision shapes of every visible entity.
    pub fn obstacles(&self) -> impl Iterator<Item = (EntityId, Cylinder)> + '_ {
        self.visible().map(|entity| (entity.id, entity.shape()))
    }

    /// Hide an entity after harvesting. Returns `false` if it was already hidden or missing.
    pub fn deplete(&mut self, id: EntityId) -> bool {
        match self.entities.iter_mut().find(|entity| entity.id == id) {
            Some(entity) if entity.visible => {
                entity.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Make a depleted entity available again (driven by an outside respawn policy).
    pub fn respawn(&mut self, id: EntityId) -> bool {
        match self.entities.iter_mut().find(|entity| entity.id == id) {
            Some(entity) if !entity.visible => {
                entity.visible = true;
                true
            }
            _ => false,
        }
    }

    /// Restore every depleted entity.
    pub fn respawn_all(&mut self) {
        for entity in &mut self.entities {
            entity.visible = true;
        }
    }

    /// Number of entities still visible.
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }
}
