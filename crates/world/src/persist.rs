//! Save and restore of [`GameSnapshot`] as versioned JSON.
//!
//! Loaded state is untrusted: the inventory is re-sorted and stats are
//! re-clamped before the snapshot is handed back.

use crate::snapshot::GameSnapshot;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Current save format version.
pub const SAVE_VERSION: u16 = 1;

#[derive(Serialize)]
struct SaveFileRef<'a> {
    version: u16,
    snapshot: &'a GameSnapshot,
}

#[derive(Deserialize)]
struct SaveFile {
    version: u16,
    snapshot: GameSnapshot,
}

/// Write `snapshot` to `path` as pretty JSON, creating parent directories.
pub fn save_snapshot(path: &Path, snapshot: &GameSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create save directory {}", parent.display()))?;
    }
    let record = SaveFileRef {
        version: SAVE_VERSION,
        snapshot,
    };
    let json = serde_json::to_string_pretty(&record).context("Failed to serialize snapshot")?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    info!(path = %path.display(), day = snapshot.clock.day, "Saved snapshot");
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<GameSnapshot> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let save: SaveFile = serde_json::from_str(&raw).context("Failed to parse save file")?;
    if save.version != SAVE_VERSION {
        anyhow::bail!(
            "Unsupported save version: expected {}, got {}",
            SAVE_VERSION,
            save.version
        );
    }
    let mut snapshot = save.snapshot;
    snapshot.normalize();
    Ok(snapshot)
}

/// Load `path`, falling back to a fresh snapshot when it is missing or malformed.
pub fn load_or_fresh(path: &Path) -> GameSnapshot {
    if !path.exists() {
        info!(path = %path.display(), "No save found; starting fresh");
        return GameSnapshot::new();
    }
    match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{err:#}"), "Discarding unreadable save");
            GameSnapshot::new()
        }
    }
}
