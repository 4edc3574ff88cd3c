//! Micro-worldtest harness for deterministic, tick-based snapshot tests.
//!
//! A micro-worldtest steps a tiny simulation for a fixed number of ticks and
//! captures selected state each tick. The report is compared against a golden
//! JSON file on disk.

use crate::snapshot::{assert_json_snapshot, canonical_json};
use anyhow::Result;
use emberwild_core::SimTick;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Human-readable name (written into the report).
    pub name: String,
    /// Number of ticks to step (report includes the initial snapshot at tick 0).
    pub ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// Single snapshot frame captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Frames captured by [`record_frames`].
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestReport<S> {
    /// Test name.
    pub name: String,
    /// `ticks + 1` frames, starting at tick 0.
    pub frames: Vec<MicroWorldtestFrame<S>>,
}

impl<S: Serialize> MicroWorldtestReport<S> {
    /// Canonical JSON form, suitable for equality checks between runs.
    pub fn to_canonical_json(&self) -> Result<String> {
        canonical_json(self)
    }
}

/// Step `state` for `ticks` ticks and capture a snapshot before the first
/// step and after each one.
pub fn record_frames<State, Snapshot, StepFn, SnapFn>(
    name: impl Into<String>,
    ticks: u64,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> MicroWorldtestReport<Snapshot>
where
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(MicroWorldtestFrame {
        tick: tick.0,
        snapshot: snapshot(tick, &state),
    });

    for _ in 0..ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroWorldtestFrame {
            tick: tick.0,
            snapshot: snapshot(tick, &state),
        });
    }

    MicroWorldtestReport {
        name: name.into(),
        frames,
    }
}

/// Run a micro-worldtest and assert (or record) the golden at `config.snapshot_path`.
pub fn run_micro_worldtest<State, Snapshot, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    state: State,
    step: StepFn,
    snapshot: SnapFn,
) -> Result<()>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let report = record_frames(config.name, config.ticks, state, step, snapshot);
    assert_json_snapshot(config.snapshot_path, &report)
}
