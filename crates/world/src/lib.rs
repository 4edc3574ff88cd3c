#![warn(missing_docs)]
//! Survival simulation core: inventory, crafting, survival stats, world
//! interaction and projectile physics, hosted behind a single-writer
//! [`SimulationHost`].

mod advisory;
mod campfire;
mod crafting;
mod entity;
mod error;
mod event;
mod host;
mod inventory;
mod notification;
mod projectile;
mod snapshot;
mod time;

pub mod interaction;
pub mod persist;
pub mod survival;

pub use advisory::*;
pub use campfire::*;
pub use crafting::*;
pub use entity::*;
pub use error::*;
pub use event::*;
pub use host::*;
pub use inventory::*;
pub use notification::*;
pub use projectile::*;
pub use snapshot::*;
pub use time::*;

pub use interaction::{InteractionOutcome, InteractionTarget, Subject};
pub use survival::{PlayerStats, SurvivalTuning, TickReport, STAT_MAX};
