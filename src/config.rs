//! Reads the optional settings file that tunes a monitoring run.
//!

use std::path::Path;
use std::time::Duration;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE: &str = "procpulse.toml";

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_plot_file() -> String {
    "procpulse_plot.png".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Delay between consecutive resource probe reads, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Where the rendered chart lands when plotting is requested.
    #[serde(default = "default_plot_file")]
    pub plot_file: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            plot_file: default_plot_file(),
        }
    }
}

impl PulseConfig {
    /// Load settings from `file_path`, overlaid with `PROCPULSE_*` environment
    /// variables. A missing file is not an error; defaults apply.
    pub fn load(file_path: &Path) -> Result<PulseConfig> {
        let raw = config::Config::builder()
            .add_source(config::File::from(file_path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix("PROCPULSE"))
            .build()?;
        Ok(raw.try_deserialize()?)
    }

    pub fn poll_interval(&self) -> Duration {
        // A zero interval would spin the sampler.
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PulseConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.poll_interval_ms, 10);
        assert_eq!(config.plot_file, "procpulse_plot.png");
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procpulse.toml");
        fs::write(&path, "poll_interval_ms = 50\nplot_file = \"out.png\"\n").unwrap();
        let config = PulseConfig::load(&path).unwrap();
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.plot_file, "out.png");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = PulseConfig {
            poll_interval_ms: 0,
            ..PulseConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
