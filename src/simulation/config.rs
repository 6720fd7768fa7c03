use crate::simulation::error::ConfigError;
use crate::simulation::params::{
    DEFAULT_COLUMNS, DEFAULT_INTERVAL, DEFAULT_MAX_MOVES, DEFAULT_MUTATION_CHANCE,
    DEFAULT_POPULATION_SIZE, DEFAULT_ROWS,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// User-facing options for one maze + search run.
///
/// Missing keys in a TOML file fall back to [`SimulationConfig::default`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Requested row count, normalized by the carver.
    pub rows: i32,
    /// Requested column count, normalized by the carver.
    pub columns: i32,
    /// Forwarded to the renderer only; carving ignores it.
    pub disable_cell_visual: bool,
    pub population_size: usize,
    pub max_moves: u32,
    /// Reserved: no operator consumes it.
    pub mutation_chance: f64,
    /// Seconds between ticks.
    pub interval: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            disable_cell_visual: false,
            population_size: DEFAULT_POPULATION_SIZE,
            max_moves: DEFAULT_MAX_MOVES,
            mutation_chance: DEFAULT_MUTATION_CHANCE,
            interval: DEFAULT_INTERVAL,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML for this struct.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Checks the search parameters.
    ///
    /// Rows and columns are deliberately not checked here.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::Invalid(
                "max_moves must be at least 1".to_string(),
            ));
        }
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "interval must be a positive number of seconds, got {}",
                self.interval
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(ConfigError::Invalid(format!(
                "mutation_chance must be within [0, 1], got {}",
                self.mutation_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimulationConfig::from_toml_str("rows = 7\nseed = 42\n").unwrap();
        assert_eq!(config.rows, 7);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.columns, DEFAULT_COLUMNS);
        assert_eq!(config.population_size, DEFAULT_POPULATION_SIZE);
    }

    #[test]
    fn test_validate_rejects_zero_population() {
        let config = SimulationConfig {
            population_size: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_accepts_odd_dimensions() {
        let config = SimulationConfig {
            rows: 3,
            columns: -5,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
