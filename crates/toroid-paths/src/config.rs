use toroid_core::Axes;

/// Search strategy used by [`Pathfinder::search`](crate::Pathfinder::search).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Expand one neighbour per direction.
    AStar,
    /// Scan straight along each direction and expand where the scan stops.
    #[default]
    JumpPointSearch,
}

/// Construction-time settings for a [`Pathfinder`](crate::Pathfinder).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    pub strategy: Strategy,
    /// Axes summed by the default Manhattan cost and heuristic.
    pub metric: Axes,
    /// Axes on which movement wraps around; moves off the others are
    /// dropped.
    pub wrap: Axes,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::JumpPointSearch,
            metric: Axes::XY,
            wrap: Axes::ALL,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: PathfinderConfig = serde_json::from_str(r#"{"strategy":"a_star"}"#).unwrap();
        assert_eq!(cfg.strategy, Strategy::AStar);
        assert_eq!(cfg.metric, Axes::XY);
        assert_eq!(cfg.wrap, Axes::ALL);
    }

    #[test]
    fn roundtrip() {
        let cfg = PathfinderConfig {
            wrap: Axes::Y,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PathfinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
