//! The aggregate game state and the actions that mutate it.
//!
//! `GameSnapshot` is owned by exactly one writer (the simulation host). Every
//! action either succeeds or returns an [`ActionError`] with the snapshot left
//! untouched.

use crate::campfire::{burn_fuel, Campfire, CampfireId};
use crate::crafting::{RecipeId, RecipeOutput};
use crate::error::ActionError;
use crate::inventory::{Inventory, ItemId};
use crate::survival::{self, PlayerStats, SurvivalTuning, TickReport};
use crate::time::Clock;
use emberwild_core::{ItemKind, ToolKind};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Camera height above the ground.
pub const EYE_HEIGHT: f32 = 1.6;

/// Thirst restored by drinking a full waterskin.
pub const WATERSKIN_DRINK: f32 = 40.0;

/// Player position and view direction as last published by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Camera position.
    pub position: Vec3,
    /// Unit view direction.
    pub view_direction: Vec3,
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            view_direction: Vec3::Z,
        }
    }
}

/// Player-facing settings carried with the save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether the advisory collaborator is consulted.
    pub advisory_enabled: bool,
    /// Save automatically when the session ends.
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            advisory_enabled: true,
            autosave: true,
        }
    }
}

/// Result of consuming an inventory item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsumeOutcome {
    /// Food eaten.
    Ate {
        /// What was eaten.
        kind: ItemKind,
        /// Hunger restored.
        hunger: f32,
        /// Health change (negative for raw meat).
        health: f32,
    },
    /// A full waterskin was emptied.
    Drank {
        /// Thirst restored.
        thirst: f32,
    },
    /// A tool was equipped or put away.
    ToggledTool {
        /// The tool.
        tool: ToolKind,
        /// `true` if it is now the active tool.
        active: bool,
    },
    /// The item has no use on its own.
    NoEffect,
}

/// Result of a successful craft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CraftOutcome {
    /// Items added to the inventory.
    Item {
        /// What was made.
        kind: ItemKind,
        /// How many.
        count: u32,
    },
    /// A campfire was placed in front of the player.
    Campfire {
        /// Id of the new fire.
        id: CampfireId,
        /// Where it was placed.
        position: Vec3,
    },
}

/// What one survival tick did to the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurvivalOutcome {
    /// Stat simulator report.
    pub report: TickReport,
    /// This tick moved the snapshot into game-over.
    pub entered_game_over: bool,
    /// Campfires that burned out this tick.
    pub extinguished: Vec<CampfireId>,
}

/// Complete mutable game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Physiological stats.
    pub stats: PlayerStats,
    /// Carried items.
    pub inventory: Inventory,
    /// Day and time of day.
    pub clock: Clock,
    /// Placed fires.
    #[serde(default)]
    pub campfires: Vec<Campfire>,
    /// Last published pose.
    #[serde(default)]
    pub pose: PlayerPose,
    /// Player settings.
    #[serde(default)]
    pub settings: Settings,
    /// Tool currently in hand.
    #[serde(default)]
    pub active_tool: Option<ToolKind>,
    /// Terminal flag; only a restart clears it.
    #[serde(default)]
    pub game_over: bool,
    #[serde(default = "first_campfire_id")]
    next_campfire_id: CampfireId,
}

fn first_campfire_id() -> CampfireId {
    1
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSnapshot {
    /// Fresh state for a new game.
    pub fn new() -> Self {
        Self {
            stats: PlayerStats::default(),
            inventory: Inventory::new(),
            clock: Clock::default(),
            campfires: Vec::new(),
            pose: PlayerPose::default(),
            settings: Settings::default(),
            active_tool: None,
            game_over: false,
            next_campfire_id: first_campfire_id(),
        }
    }

    /// Restore invariants after loading from an untrusted record.
    pub fn normalize(&mut self) {
        self.inventory.sort();
        self.stats.clamp();
        self.clock = Clock::new(self.clock.day, self.clock.time);
        self.campfires.retain(Campfire::is_lit);
        let highest = self.campfires.iter().map(|fire| fire.id).max().unwrap_or(0);
        self.next_campfire_id = self.next_campfire_id.max(highest + 1);
        if let Some(tool) = self.active_tool {
            if !self.inventory.has(tool.item(), 1) {
                self.active_tool = None;
            }
        }
        if self.stats.is_dead() {
            self.game_over = true;
        }
    }

    /// Arrows carried.
    pub fn ammunition(&self) -> u32 {
        self.inventory.count(ItemKind::Arrow)
    }

    /// Fail with [`ActionError::GameOver`] once the player has died.
    pub fn ensure_alive(&self) -> Result<(), ActionError> {
        if self.game_over {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Use an inventory item.
    pub fn consume(&mut self, id: ItemId) -> Result<ConsumeOutcome, ActionError> {
        self.ensure_alive()?;
        let kind = self.inventory.get(id).ok_or(ActionError::UnknownItem)?.kind;

        if let Some(tool) = kind.tool() {
            let active = self.active_tool != Some(tool);
            self.active_tool = active.then_some(tool);
            debug!(?tool, active, "Toggled tool");
            return Ok(ConsumeOutcome::ToggledTool { tool, active });
        }

        if kind == ItemKind::FullWaterskin {
            self.inventory.relabel(id, ItemKind::Waterskin)?;
            self.stats.adjust(0.0, 0.0, WATERSKIN_DRINK);
            return Ok(ConsumeOutcome::Drank {
                thirst: WATERSKIN_DRINK,
            });
        }

        let Some(effect) = kind.food_effect() else {
            return Ok(ConsumeOutcome::NoEffect);
        };
        self.inventory.remove(kind, 1)?;
        self.stats.adjust(effect.health, effect.hunger, 0.0);
        debug!(%kind, hunger = effect.hunger, health = effect.health, "Ate");
        Ok(ConsumeOutcome::Ate {
            kind,
            hunger: effect.hunger,
            health: effect.health,
        })
    }

    /// Cook one raw item. Callers check that a lit fire is being targeted.
    pub fn cook(&mut self) -> Result<Option<(ItemKind, ItemKind)>, ActionError> {
        self.ensure_alive()?;
        self.inventory.cook_at_fire()
    }

    /// Craft a recipe, placing a campfire ahead of `pose` for fire outputs.
    pub fn craft(
        &mut self,
        recipe: RecipeId,
        pose: &PlayerPose,
        tuning: &SurvivalTuning,
    ) -> Result<CraftOutcome, ActionError> {
        self.ensure_alive()?;
        match recipe.recipe().craft(&mut self.inventory)? {
            RecipeOutput::Item { kind, count } => Ok(CraftOutcome::Item { kind, count }),
            RecipeOutput::PlaceCampfire => {
                let id = self.next_campfire_id;
                self.next_campfire_id += 1;
                let position = Campfire::placement(pose.position, pose.view_direction);
                self.campfires
                    .push(Campfire::new(id, position, tuning.campfire_fuel));
                info!(id, x = position.x, z = position.z, "Campfire placed");
                Ok(CraftOutcome::Campfire { id, position })
            }
        }
    }

    /// Run one survival tick for a player standing at `player_position`.
    ///
    /// Stats and clock are handled by [`survival::tick`]; campfires then burn
    /// one unit of fuel. The day counter is left to the caller.
    pub fn survival_tick(
        &mut self,
        player_position: Vec3,
        tuning: &SurvivalTuning,
    ) -> SurvivalOutcome {
        if self.game_over {
            return SurvivalOutcome {
                report: TickReport {
                    game_over: true,
                    ..TickReport::default()
                },
                ..SurvivalOutcome::default()
            };
        }

        let report = survival::tick(
            &mut self.stats,
            &mut self.clock,
            &self.campfires,
            player_position,
            tuning,
        );
        if report.game_over {
            self.game_over = true;
            info!(day = self.clock.day, time = self.clock.time, "Game over");
            return SurvivalOutcome {
                report,
                entered_game_over: true,
                extinguished: Vec::new(),
            };
        }

        let extinguished = burn_fuel(&mut self.campfires);
        for id in &extinguished {
            info!(id, "Campfire burned out");
        }
        SurvivalOutcome {
            report,
            entered_game_over: false,
            extinguished,
        }
    }
}
