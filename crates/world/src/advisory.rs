//! Rate-limited advisory text.
//!
//! An [`Advisor`] turns a read-only [`SnapshotSummary`] into a short hint. The
//! runtime decides when it may be asked; failures are logged and dropped and
//! nothing it returns feeds back into the simulation.

use crate::snapshot::GameSnapshot;
use crate::time::DAY_LENGTH;
use emberwild_core::ToolKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Read-only view of the snapshot handed to an advisor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    /// Current day.
    pub day: u32,
    /// Time of day.
    pub time: u32,
    /// Night flag.
    pub is_night: bool,
    /// Health.
    pub health: f32,
    /// Hunger.
    pub hunger: f32,
    /// Thirst.
    pub thirst: f32,
    /// Temperature.
    pub temperature: f32,
    /// Standing near a lit fire.
    pub warming: bool,
    /// Lit campfires in the world.
    pub campfires: usize,
    /// Arrows carried.
    pub ammunition: u32,
    /// Tool in hand.
    pub active_tool: Option<ToolKind>,
    /// `(item name, count)` in display order.
    pub inventory: Vec<(String, u32)>,
}

impl SnapshotSummary {
    /// Summarize `snapshot`.
    pub fn from_snapshot(snapshot: &GameSnapshot, warming: bool) -> Self {
        Self {
            day: snapshot.clock.day,
            time: snapshot.clock.time,
            is_night: snapshot.clock.is_night(),
            health: snapshot.stats.health,
            hunger: snapshot.stats.hunger,
            thirst: snapshot.stats.thirst,
            temperature: snapshot.stats.temperature,
            warming,
            campfires: snapshot.campfires.len(),
            ammunition: snapshot.ammunition(),
            active_tool: snapshot.active_tool,
            inventory: snapshot
                .inventory
                .items()
                .iter()
                .map(|item| (item.kind.display_name().to_string(), item.count))
                .collect(),
        }
    }

    /// The lowest of health, hunger, thirst and temperature.
    pub fn lowest_stat(&self) -> f32 {
        self.health
            .min(self.hunger)
            .min(self.thirst)
            .min(self.temperature)
    }
}

/// External text collaborator.
pub trait Advisor {
    /// Produce a short hint for the player.
    fn advise(&mut self, summary: &SnapshotSummary) -> anyhow::Result<String>;
}

/// Cadence settings for advisory calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Master switch.
    pub enabled: bool,
    /// Clock units between calls.
    pub interval: u32,
    /// Clock units between calls while a stat is low.
    pub critical_interval: u32,
    /// A stat below this switches to `critical_interval`.
    pub threshold: f32,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 50,
            critical_interval: 20,
            threshold: 25.0,
        }
    }
}

/// Gate deciding when an advisor may be consulted.
#[derive(Debug, Clone)]
pub struct AdvisoryRuntime {
    config: AdvisoryConfig,
    last_call: Option<u64>,
}

/// Monotonic clock position in units since day 1, time 0.
pub fn absolute_time(day: u32, time: u32) -> u64 {
    u64::from(day.saturating_sub(1)) * u64::from(DAY_LENGTH) + u64::from(time)
}

impl AdvisoryRuntime {
    /// Create a runtime; the first call happens one interval after the first poll.
    pub fn new(config: AdvisoryConfig) -> Self {
        Self {
            config,
            last_call: None,
        }
    }

    /// Current cadence settings.
    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Forget the last call (used on restart).
    pub fn reset(&mut self) {
        self.last_call = None;
    }

    /// Check if the advisor may be called at `now` given `summary`.
    pub fn is_due(&self, now: u64, summary: &SnapshotSummary) -> bool {
        let Some(last) = self.last_call else {
            return false;
        };
        let interval = if summary.lowest_stat() < self.config.threshold {
            self.config.critical_interval
        } else {
            self.config.interval
        };
        now.saturating_sub(last) >= u64::from(interval.max(1))
    }

    /// Consult `advisor` if the cadence allows. Returns the trimmed advice, if any.
    pub fn poll(
        &mut self,
        snapshot: &GameSnapshot,
        warming: bool,
        advisor: &mut dyn Advisor,
    ) -> Option<String> {
        if !self.config.enabled {
            return None;
        }
        let now = absolute_time(snapshot.clock.day, snapshot.clock.time);
        if self.last_call.is_none() {
            self.last_call = Some(now);
            return None;
        }
        let summary = SnapshotSummary::from_snapshot(snapshot, warming);
        if !self.is_due(now, &summary) {
            return None;
        }

        self.last_call = Some(now);
        match advisor.advise(&summary) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    debug!(day = summary.day, time = summary.time, "Advisory received");
                    Some(text.to_string())
                }
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Advisor failed; skipping");
                None
            }
        }
    }
}
