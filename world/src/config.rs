//! Match configuration loaded from TOML.

use std::{fs, io, path::Path};

use ascifight_core::ActorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAP_SIZE: u32 = 15;
const DEFAULT_WALLS: usize = 10;
const DEFAULT_SEED: u64 = 0x5eed_a5c1_f16f_0001;
const DEFAULT_SPAWN_RADIUS: u32 = 2;
const DEFAULT_WALL_EXCLUSION_RADIUS: u32 = 3;
const DEFAULT_MAX_PATH_STEPS: u32 = 100;

/// Largest supported board edge length.
pub const MAX_MAP_SIZE: u32 = 1024;

/// Tunable parameters of a single match.
///
/// The value is handed to the board on construction; nothing reads it from
/// process-wide state afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Edge length of the square board.
    pub map_size: u32,
    /// Number of walls placed at match start.
    pub walls: usize,
    /// Actor roster every team fields, in ident order.
    pub actors: Vec<ActorKind>,
    /// Seed for every random placement and roll.
    pub seed: u64,
    /// Square radius around a base in which actors spawn.
    pub spawn_radius: u32,
    /// Square radius around every base kept free of walls.
    pub wall_exclusion_radius: u32,
    /// Maximum number of expansion rounds for the path planner.
    pub max_path_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            walls: DEFAULT_WALLS,
            actors: vec![
                ActorKind::Generalist,
                ActorKind::Runner,
                ActorKind::Attacker,
                ActorKind::Blocker,
            ],
            seed: DEFAULT_SEED,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            wall_exclusion_radius: DEFAULT_WALL_EXCLUSION_RADIUS,
            max_path_steps: DEFAULT_MAX_PATH_STEPS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    game: GameConfig,
}

impl GameConfig {
    /// Parses a configuration document with a `[game]` table.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        file.game.validate()?;
        Ok(file.game)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size == 0 {
            return Err(ConfigError::InvalidMapSize);
        }
        if self.map_size > MAX_MAP_SIZE {
            return Err(ConfigError::MapTooLarge {
                size: self.map_size,
                maximum: MAX_MAP_SIZE,
            });
        }
        Ok(())
    }
}

/// Failures while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    /// The contents are not valid configuration TOML.
    #[error("failed to parse config toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// `map_size` is zero.
    #[error("map_size must be positive")]
    InvalidMapSize,
    /// `map_size` exceeds [`MAX_MAP_SIZE`].
    #[error("map_size {size} exceeds the maximum of {maximum}")]
    MapTooLarge {
        /// Configured edge length.
        size: u32,
        /// Largest supported edge length.
        maximum: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn game_table_overrides_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [game]
            map_size = 20
            walls = 4
            actors = ["Runner", "Runner", "Blocker"]
            seed = 7
            "#,
        )
        .expect("config parses");

        assert_eq!(config.map_size, 20);
        assert_eq!(config.walls, 4);
        assert_eq!(
            config.actors,
            vec![ActorKind::Runner, ActorKind::Runner, ActorKind::Blocker]
        );
        assert_eq!(config.seed, 7);
        assert_eq!(config.spawn_radius, DEFAULT_SPAWN_RADIUS);
        assert_eq!(config.max_path_steps, DEFAULT_MAX_PATH_STEPS);
    }

    #[test]
    fn zero_map_size_is_rejected() {
        let result = GameConfig::from_toml_str("[game]\nmap_size = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidMapSize)));
    }

    #[test]
    fn oversized_map_is_rejected() {
        let result = GameConfig::from_toml_str("[game]\nmap_size = 100000\n");
        assert!(matches!(result, Err(ConfigError::MapTooLarge { size: 100_000, .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = GameConfig::from_toml_str("[game]\nmapsize = 12\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = GameConfig::load("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
