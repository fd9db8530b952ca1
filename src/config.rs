use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::aoi::BoundingBox;
use crate::signals::score::{BlendWeights, ScoreWeights};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub stream: StreamConfig,
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
    pub aoi: Option<AoiConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StreamConfig {
    pub total_secs: u64,
    pub interval_ms: u64,
    pub seed: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub blend: BlendWeights,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: String,
}

/// How an AOI restricts the leaderboard: hard filter, or soft ranking that
/// keeps out-of-area vendors at the bottom.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AoiMode {
    #[default]
    Filter,
    Rank,
}

/// Optional area of interest for the final leaderboard. Bounds are always
/// required; a GeoJSON file (drawn-map export) refines the shape beyond the
/// rectangle.
#[derive(Debug, Deserialize, Clone)]
pub struct AoiConfig {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    #[serde(default)]
    pub mode: AoiMode,
    #[serde(default)]
    pub geojson: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            total_secs: 60,
            interval_ms: 2000,
            seed: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: "data/runs".into(),
        }
    }
}

impl StreamConfig {
    pub fn total(&self) -> Duration {
        Duration::from_secs(self.total_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl AoiConfig {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox {
            south: self.south,
            west: self.west,
            north: self.north,
            east: self.east,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_tuning() {
        let config = Config::default();
        assert_eq!(config.stream.total_secs, 60);
        assert_eq!(config.stream.interval_ms, 2000);
        assert_eq!(config.scoring.weights.bad_penalty, 12.0);
        assert_eq!(config.scoring.weights.good_credit, 6.0);
        assert_eq!(config.scoring.weights.neutral_penalty, 4.0);
        assert_eq!(config.scoring.blend.ethics, 0.40);
        assert_eq!(config.store.dir, "data/runs");
        assert!(config.aoi.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [stream]
            total_secs = 10

            [scoring.weights]
            bad_penalty = 15.0
            "#,
        )
        .unwrap();
        assert_eq!(config.stream.total_secs, 10);
        assert_eq!(config.stream.interval_ms, 2000);
        assert_eq!(config.scoring.weights.bad_penalty, 15.0);
        assert_eq!(config.scoring.weights.good_credit, 6.0);
    }

    #[test]
    fn aoi_section_parses_to_bounds() {
        let config: Config = toml::from_str(
            r#"
            [aoi]
            south = -30.0
            west = 20.0
            north = -20.0
            east = 30.0
            "#,
        )
        .unwrap();
        let aoi = config.aoi.unwrap();
        assert_eq!(aoi.mode, AoiMode::Filter);
        assert!(aoi.geojson.is_none());
        let bounds = aoi.bounds();
        assert_eq!(bounds.south, -30.0);
        assert_eq!(bounds.east, 30.0);
    }

    #[test]
    fn aoi_mode_rank_parses() {
        let config: Config = toml::from_str(
            r#"
            [aoi]
            south = -30.0
            west = 20.0
            north = -20.0
            east = 30.0
            mode = "rank"
            geojson = "aoi.json"
            "#,
        )
        .unwrap();
        let aoi = config.aoi.unwrap();
        assert_eq!(aoi.mode, AoiMode::Rank);
        assert_eq!(aoi.geojson.as_deref(), Some("aoi.json"));
    }
}
