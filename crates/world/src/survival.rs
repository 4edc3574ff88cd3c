//! Survival stat simulator.
//!
//! Runs once per survival tick (one simulated second): hunger and thirst
//! decay, body temperature drifts with the day/night cycle and recovers near
//! a lit campfire, and health drops while any need is critical.

use crate::campfire::{nearest_lit, warmth_fraction, Campfire};
use crate::time::Clock;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Upper bound of every stat.
pub const STAT_MAX: f32 = 100.0;

/// Player physiological stats, each clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Zero or below is terminal.
    pub health: f32,
    /// Satiation; decays every tick.
    pub hunger: f32,
    /// Hydration; decays every tick.
    pub thirst: f32,
    /// Body temperature proxy.
    pub temperature: f32,
    /// Stamina reserve.
    pub energy: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: STAT_MAX,
            hunger: STAT_MAX,
            thirst: STAT_MAX,
            temperature: 70.0,
            energy: STAT_MAX,
        }
    }
}

impl PlayerStats {
    /// Clamp every stat into `[0, 100]`, mapping NaN to 0.
    pub fn clamp(&mut self) {
        for value in [
            &mut self.health,
            &mut self.hunger,
            &mut self.thirst,
            &mut self.temperature,
            &mut self.energy,
        ] {
            *value = if value.is_nan() {
                0.0
            } else {
                (*value).clamp(0.0, STAT_MAX)
            };
        }
    }

    /// Apply additive deltas and re-clamp.
    pub fn adjust(&mut self, health: f32, hunger: f32, thirst: f32) {
        self.health += health;
        self.hunger += hunger;
        self.thirst += thirst;
        self.clamp();
    }

    /// Check if the player is dead.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Tunable survival rates. All per-tick values assume a one-second tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalTuning {
    /// Hunger lost per tick.
    pub hunger_decay: f32,
    /// Thirst lost per tick.
    pub thirst_decay: f32,
    /// Temperature change per tick at night.
    pub night_temperature_delta: f32,
    /// Temperature change per tick during the day.
    pub day_temperature_delta: f32,
    /// Campfire warmth reaches this far.
    pub fire_radius: f32,
    /// Inside this distance warmth is at full strength.
    pub fire_saturation_radius: f32,
    /// Temperature gained per tick at full warmth.
    pub max_warmth_gain: f32,
    /// Health recovered per tick while warming with no critical need.
    pub fire_health_regen: f32,
    /// Hunger below this is critical.
    pub critical_hunger: f32,
    /// Thirst below this is critical.
    pub critical_thirst: f32,
    /// Temperature below this is critical.
    pub critical_temperature: f32,
    /// Health lost per tick while any need is critical.
    pub critical_damage: f32,
    /// Burn time of a freshly crafted campfire, in ticks.
    pub campfire_fuel: u32,
}

impl Default for SurvivalTuning {
    fn default() -> Self {
        Self {
            hunger_decay: 0.1,
            thirst_decay: 0.15,
            night_temperature_delta: -0.25,
            day_temperature_delta: -0.08,
            fire_radius: 8.0,
            fire_saturation_radius: 1.0,
            max_warmth_gain: 0.6,
            fire_health_regen: 0.2,
            critical_hunger: 5.0,
            critical_thirst: 5.0,
            critical_temperature: 15.0,
            critical_damage: 0.5,
            campfire_fuel: 600,
        }
    }
}

impl SurvivalTuning {
    /// Warmth bonus per tick at `distance` from a fire.
    pub fn warmth_bonus(&self, distance: f32) -> f32 {
        warmth_fraction(distance, self.fire_radius, self.fire_saturation_radius)
            * self.max_warmth_gain
    }

    /// Check if any need is past its critical threshold.
    pub fn is_critical(&self, stats: &PlayerStats) -> bool {
        stats.hunger < self.critical_hunger
            || stats.thirst < self.critical_thirst
            || stats.temperature < self.critical_temperature
    }
}

/// What happened during one survival tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Health was already at or below zero; nothing was mutated.
    pub game_over: bool,
    /// A lit campfire is within reach of the player.
    pub warming: bool,
    /// Critical-condition damage was applied.
    pub critical: bool,
    /// Time of day wrapped past midnight.
    pub day_wrapped: bool,
    /// Net temperature change applied (before clamping).
    pub temperature_delta: f32,
}

/// Advance stats and clock by one survival tick.
pub fn tick(
    stats: &mut PlayerStats,
    clock: &mut Clock,
    campfires: &[Campfire],
    player_position: Vec3,
    tuning: &SurvivalTuning,
) -> TickReport {
    if stats.is_dead() {
        return TickReport {
            game_over: true,
            ..TickReport::default()
        };
    }

    stats.hunger = (stats.hunger - tuning.hunger_decay).max(0.0);
    stats.thirst = (stats.thirst - tuning.thirst_decay).max(0.0);

    let mut temperature_delta = if clock.is_night() {
        tuning.night_temperature_delta
    } else {
        tuning.day_temperature_delta
    };

    let warming = match nearest_lit(campfires, player_position) {
        Some((_, distance)) if distance < tuning.fire_radius => {
            temperature_delta += tuning.warmth_bonus(distance);
            true
        }
        _ => false,
    };
    stats.temperature += temperature_delta;
    stats.clamp();

    let critical = tuning.is_critical(stats);
    if critical {
        stats.health -= tuning.critical_damage;
    } else if warming {
        stats.health += tuning.fire_health_regen;
    }
    stats.clamp();

    let day_wrapped = clock.advance();

    TickReport {
        game_over: false,
        warming,
        critical,
        day_wrapped,
        temperature_delta,
    }
}
