#![warn(missing_docs)]
//! Deterministic testing surfaces: event logs, canonical JSON snapshots and
//! tick-stepped micro-worldtests.

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use emberwild_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub use micro_worldtest::*;
pub use snapshot::*;

/// One line of an event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize> {
    /// Survival tick when the event occurred.
    pub tick: SimTick,
    /// Event name, duplicated from the payload for grepping.
    pub kind: &'a str,
    /// Structured payload.
    pub payload: &'a P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: BufWriter<File>,
    written: u64,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        debug!(path = %path.display(), "Event log opened");
        Ok(Self {
            file: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write<P: Serialize>(&mut self, event: &EventRecord<'_, P>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush().context("Failed to flush event log")
    }
}

/// Read back a JSONL file written by [`JsonlSink`].
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open event log {}", path.display()))?;
    let mut out = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line)
            .with_context(|| format!("Malformed line {} in {}", index + 1, path.display()))?;
        out.push(value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "emberwild-{name}-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn jsonl_sink_round_trips_lines() {
        let path = temp_path("events").join("log.jsonl");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        let payload = json!({ "event": "harvested", "item": "Wood" });
        sink.write(&EventRecord {
            tick: SimTick(3),
            kind: "harvested",
            payload: &payload,
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            tick: SimTick(4),
            kind: "day_rolled",
            payload: &json!({ "day": 2 }),
        })
        .expect("write succeeds");
        assert_eq!(sink.written(), 2);
        sink.flush().expect("flush");

        let lines = read_jsonl(&path).expect("readable");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["tick"], 3);
        assert_eq!(lines[0]["payload"]["item"], "Wood");
        assert_eq!(lines[1]["kind"], "day_rolled");
    }

    #[test]
    fn read_jsonl_reports_bad_line() {
        let path = temp_path("bad.jsonl");
        fs::write(&path, "{\"ok\":1}\nnot json\n").expect("write");
        let err = read_jsonl(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
