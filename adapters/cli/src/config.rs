use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tunables read from an optional TOML file next to the binary.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Delay between reaching the goal and installing the next maze.
    pub goal_pause_ms: u64,
    /// Quiet period after the last viewport change before reacting to it.
    pub resize_debounce_ms: u64,
    /// Minimum swipe travel in pixels before a gesture counts as a step.
    pub swipe_min_distance_px: f32,
    /// Generation attempts before a build is reported as failed.
    pub generation_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goal_pause_ms: 1_000,
            resize_debounce_ms: 250,
            swipe_min_distance_px: 30.0,
            generation_attempts: 3,
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    pub(crate) const fn goal_pause(&self) -> Duration {
        Duration::from_millis(self.goal_pause_ms)
    }

    pub(crate) const fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = Config::load(None).expect("defaults always load");

        assert_eq!(config, Config::default());
        assert_eq!(config.goal_pause(), Duration::from_secs(1));
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn partial_files_override_only_named_fields() {
        let config: Config =
            toml::from_str("goal_pause_ms = 400\nswipe_min_distance_px = 12.5\n")
                .expect("partial config parses");

        assert_eq!(config.goal_pause_ms, 400);
        assert_eq!(config.swipe_min_distance_px, 12.5);
        assert_eq!(config.resize_debounce_ms, Config::default().resize_debounce_ms);
        assert_eq!(
            config.generation_attempts,
            Config::default().generation_attempts
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<Config>("goal_pause_ms = 400\ntile_size = 64\n");

        assert!(result.is_err(), "typos in config keys should not pass silently");
    }

    #[test]
    fn explicit_missing_files_are_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/maze-wander.toml")));

        assert!(result.is_err());
    }
}
