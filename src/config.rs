use crate::world_gen::WorldGenConfig;
use emberwild_world::{AdvisoryConfig, HostConfig, SurvivalTuning};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/sim.toml";

/// Everything tunable about a run, read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub survival: SurvivalTuning,
    pub host: HostConfig,
    pub world_gen: WorldGenConfig,
    pub advisory: AdvisoryConfig,
}

impl SimConfig {
    /// Load from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SimConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SimConfig::default()
            }
        }
    }

    /// Replace values the host cannot run with by their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = HostConfig::default();
        if !(self.host.survival_interval.is_finite() && self.host.survival_interval > 0.0) {
            warn!(
                value = self.host.survival_interval,
                "survival_interval must be positive"
            );
            self.host.survival_interval = defaults.survival_interval;
        }
        if self.host.physics_rate == 0 {
            warn!("physics_rate must be positive");
            self.host.physics_rate = defaults.physics_rate;
        }
        if !(self.host.max_frame_delta.is_finite() && self.host.max_frame_delta > 0.0) {
            self.host.max_frame_delta = defaults.max_frame_delta;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "emberwild-config-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_file(
            r#"
[survival]
hunger_decay = 0.5

[world_gen]
trees = 3

[advisory]
enabled = false
"#,
        );
        let cfg = SimConfig::load_from_path(&path);
        assert_eq!(cfg.survival.hunger_decay, 0.5);
        assert_eq!(cfg.survival.thirst_decay, SurvivalTuning::default().thirst_decay);
        assert_eq!(cfg.world_gen.trees, 3);
        assert!(!cfg.advisory.enabled);
        assert_eq!(cfg.host, HostConfig::default());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        assert_eq!(SimConfig::load_from_path(&path), SimConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_file("[survival\nhunger_decay = ");
        assert_eq!(SimConfig::load_from_path(&path), SimConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("emberwild-config-does-not-exist.toml");
        assert_eq!(SimConfig::load_from_path(&path), SimConfig::default());
    }

    #[test]
    fn unusable_host_rates_are_reset() {
        let path = temp_file("[host]\nsurvival_interval = 0.0\nphysics_rate = 0\n");
        let cfg = SimConfig::load_from_path(&path);
        assert_eq!(cfg.host, HostConfig::default());
    }
}
