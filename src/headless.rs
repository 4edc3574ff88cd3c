use crate::advisor::FieldNotesAdvisor;
use crate::config::SimConfig;
use crate::scripted_input::{ScriptedAction, ScriptedInputPlayer};
use crate::world_gen;
use anyhow::Result;
use emberwild_testkit::{EventRecord, JsonlSink};
use emberwild_world::{persist, ActionError, GameSnapshot, PlayerPose, SimulationHost};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Frame length of the headless loop.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Survival ticks simulated when neither a tick limit nor a script bounds the run.
pub const DEFAULT_MAX_TICKS: u64 = 600;

pub struct HeadlessConfig {
    pub sim: SimConfig,
    pub world_seed: u64,
    pub max_ticks: Option<u64>,
    pub save_path: Option<PathBuf>,
    pub scripted_input: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
}

/// Final state printed when the run ends.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub world_seed: u64,
    pub survival_ticks: u64,
    pub day: u32,
    pub time: u32,
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub temperature: f32,
    pub items: u32,
    pub campfires: usize,
    pub game_over: bool,
    pub events: u64,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let snapshot = match cfg.save_path.as_deref() {
        Some(path) if path.exists() => persist::load_or_fresh(path),
        _ => GameSnapshot::new(),
    };
    let world = world_gen::generate(cfg.world_seed, &cfg.sim.world_gen);
    let mut host = SimulationHost::new(
        snapshot,
        world,
        cfg.sim.survival.clone(),
        cfg.sim.host.clone(),
    )
    .with_advisor(
        cfg.sim.advisory.clone(),
        Box::new(FieldNotesAdvisor::new(cfg.world_seed)),
    );

    let mut script = cfg
        .scripted_input
        .as_deref()
        .map(ScriptedInputPlayer::from_path)
        .transpose()?;
    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let max_ticks = match (cfg.max_ticks, script.is_some()) {
        (Some(limit), _) => Some(limit),
        (None, true) => None,
        (None, false) => Some(DEFAULT_MAX_TICKS),
    };
    info!(
        seed = cfg.world_seed,
        max_ticks = ?max_ticks,
        scripted = script.is_some(),
        "Headless run started"
    );

    let mut events_written = 0;
    loop {
        if max_ticks.is_some_and(|limit| host.survival_ticks().0 >= limit) {
            break;
        }
        if max_ticks.is_none() && script.as_ref().map_or(true, |s| s.finished()) {
            break;
        }
        if host.snapshot().game_over && script.as_ref().map_or(true, |s| s.finished()) {
            info!("Player died; ending run");
            break;
        }

        if let Some(player) = script.as_mut() {
            let frame = player.advance(FRAME_DT);
            if frame.position.is_some() || frame.look.is_some() {
                let live = *host.live_pose();
                host.set_pose(PlayerPose {
                    position: frame.position.unwrap_or(live.position),
                    view_direction: frame.look.unwrap_or(live.view_direction),
                });
            }
            for action in frame.actions {
                apply_action(&mut host, &action);
            }
        }

        host.advance(FRAME_DT);

        let events = host.drain_events();
        if let Some(sink) = sink.as_mut() {
            let tick = host.survival_ticks();
            for event in &events {
                sink.write(&EventRecord {
                    tick,
                    kind: event.name(),
                    payload: event,
                })?;
            }
        }
        events_written += events.len() as u64;
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    let survival_ticks = host.survival_ticks().0;
    let snapshot = host.teardown();
    if let Some(path) = cfg.save_path.as_deref() {
        if snapshot.settings.autosave {
            persist::save_snapshot(path, &snapshot)?;
        } else {
            info!(path = %path.display(), "Autosave disabled; not saving");
        }
    }

    Ok(RunSummary {
        world_seed: cfg.world_seed,
        survival_ticks,
        day: snapshot.clock.day,
        time: snapshot.clock.time,
        health: snapshot.stats.health,
        hunger: snapshot.stats.hunger,
        thirst: snapshot.stats.thirst,
        temperature: snapshot.stats.temperature,
        items: snapshot.inventory.total_count(),
        campfires: snapshot.campfires.len(),
        game_over: snapshot.game_over,
        events: events_written,
    })
}

fn apply_action(host: &mut SimulationHost, action: &ScriptedAction) {
    let result: Result<(), ActionError> = match action {
        ScriptedAction::Interact => host.interact().map(drop),
        ScriptedAction::Fire => host.fire().map(drop),
        ScriptedAction::Cook => host.cook().map(drop),
        ScriptedAction::Craft { recipe } => host.craft(*recipe).map(drop),
        ScriptedAction::Consume { item } => {
            match host.snapshot().inventory.find(*item).map(|stack| stack.id) {
                Some(id) => host.consume(id).map(drop),
                None => Err(ActionError::UnknownItem),
            }
        }
        ScriptedAction::Restart => {
            host.restart();
            Ok(())
        }
    };
    if let Err(err) = result {
        debug!(?action, %err, "Scripted action rejected");
    }
}
