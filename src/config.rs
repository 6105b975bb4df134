// Configuration loading and parsing (league.toml, strategy.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::streaming::quality::{QualitySettings, TierTables, TierThresholds};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub streaming: StreamingConfig,
    pub tiers: TierTables,
    pub db_path: String,
    pub data_paths: DataPaths,
}

impl Config {
    /// Classifier settings assembled from the tier tables and streaming
    /// section.
    pub fn quality_settings(&self) -> QualitySettings {
        QualitySettings {
            tables: self.tiers,
            fallback_games: self.streaming.fallback_games_played,
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// League provider identifier (e.g. "yahoo").
    pub provider: String,
    /// The user's fantasy team ID. Optional; only used for labeling output.
    #[serde(default)]
    pub team_id: Option<String>,
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    streaming: StreamingConfig,
    tiers: TierTables,
    database: DatabaseSection,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StreamingConfig {
    /// Fantasy weeks covered by the evaluation window.
    pub weeks: u32,
    /// Cap on returned opportunities.
    pub max_recommendations: usize,
    /// Games-played substitute when the schedule can't answer.
    pub fallback_games_played: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub schedule: String,
    pub roster: String,
    pub available: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/strategy.toml`, relative to the given `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- strategy.toml (required) ---
    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy_file: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        streaming: strategy_file.streaming,
        tiers: strategy_file.tiers,
        db_path: strategy_file.database.path,
        data_paths: strategy_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.streaming.weeks == 0 {
        return Err(ConfigError::ValidationError {
            field: "streaming.weeks".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.streaming.max_recommendations == 0 {
        return Err(ConfigError::ValidationError {
            field: "streaming.max_recommendations".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.streaming.fallback_games_played == 0 {
        return Err(ConfigError::ValidationError {
            field: "streaming.fallback_games_played".into(),
            message: "must be greater than 0".into(),
        });
    }

    // Tier cutpoints must be strictly decreasing within each table so every
    // tier has a non-empty ppg band.
    validate_thresholds("tiers.skater", &config.tiers.skater)?;
    validate_thresholds("tiers.goalie", &config.tiers.goalie)?;

    Ok(())
}

fn validate_thresholds(field: &str, t: &TierThresholds) -> Result<(), ConfigError> {
    let ordered: &[(&str, f64)] = &[
        ("elite", t.elite),
        ("high_end", t.high_end),
        ("mid_tier", t.mid_tier),
        ("streamable", t.streamable),
    ];
    for pair in ordered.windows(2) {
        let (upper_name, upper) = pair[0];
        let (lower_name, lower) = pair[1];
        if upper <= lower {
            return Err(ConfigError::ValidationError {
                field: format!("{field}.{lower_name}"),
                message: format!(
                    "{lower_name} ({lower}) must be strictly below {upper_name} ({upper})"
                ),
            });
        }
    }
    if t.streamable <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: format!("{field}.streamable"),
            message: format!("must be > 0, got {}", t.streamable),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
