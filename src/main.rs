//! emberwild - A deterministic wilderness survival simulation
//!
//! Headless runner: generates a world, drives the simulation host at a fixed
//! frame rate and optionally replays scripted input, logs events and saves.

mod advisor;
mod config;
mod headless;
mod scripted_input;
mod world_gen;

use anyhow::Result;
use config::SimConfig;
use rand::RngCore;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting emberwild v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let sim = match cli.config.as_deref() {
        Some(path) => SimConfig::load_from_path(path),
        None => SimConfig::load(),
    };

    let world_seed = cli.world_seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    info!(world_seed, "World seed selected");

    if cli.no_save && cli.save_path.is_some() {
        tracing::warn!("--no-save overrides --save-path");
    }
    let save_path = if cli.no_save { None } else { cli.save_path };

    let summary = headless::run(headless::HeadlessConfig {
        sim,
        world_seed,
        max_ticks: cli.max_ticks,
        save_path,
        scripted_input: cli.scripted_input,
        event_log: cli.event_log,
    })?;

    println!("{}", serde_json::to_string(&summary)?);
    info!("emberwild shutting down");
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    world_seed: Option<u64>,
    max_ticks: Option<u64>,
    save_path: Option<PathBuf>,
    no_save: bool,
    scripted_input: Option<PathBuf>,
    event_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--world-seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.world_seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--world-seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--world-seed requires an integer");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--save-path" => {
                    if let Some(path) = args.next() {
                        opts.save_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-path requires a file path");
                    }
                }
                "--no-save" => opts.no_save = true,
                "--scripted-input" => {
                    if let Some(path) = args.next() {
                        opts.scripted_input = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scripted-input requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}
