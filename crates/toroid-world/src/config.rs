//! Simulation settings, loaded from JSON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toroid_core::{Axes, Coord};
use toroid_paths::{PathfinderConfig, Strategy};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Settings for a headless snake run. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lattice cells per axis.
    pub count: Coord,
    pub ticks: u64,
    pub strategy: Strategy,
    pub seed: u64,
    /// Axes on which the world wraps.
    pub wrap: Axes,
    pub spawn: Coord,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            count: Coord::new(10, 10, 10),
            ticks: 500,
            strategy: Strategy::JumpPointSearch,
            seed: 0,
            wrap: Axes::ALL,
            spawn: Coord::ZERO,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pathfinder settings for this run.
    pub fn pathfinder(&self) -> PathfinderConfig {
        PathfinderConfig {
            strategy: self.strategy,
            wrap: self.wrap,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = SimConfig::from_json(
            r#"{"count": {"x": 8, "y": 8, "z": 1}, "strategy": "a_star", "wrap": {"x": false, "y": true, "z": false}}"#,
        )
        .unwrap();
        assert_eq!(cfg.count, Coord::new(8, 8, 1));
        assert_eq!(cfg.strategy, Strategy::AStar);
        assert_eq!(cfg.wrap, Axes::Y);
        assert_eq!(cfg.ticks, 500);
        assert_eq!(cfg.pathfinder().wrap, Axes::Y);
    }

    #[test]
    fn bad_json_is_parse_error() {
        assert!(matches!(
            SimConfig::from_json("{\"ticks\": -1}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
