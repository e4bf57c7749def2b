// Configuration module for reading Boxes.toml
// Grid size, time budget and worker count are fixed for the whole run

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Side;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub grid: GridConfig,
    pub search: SearchConfig,
    pub report: ReportConfig,
}

/// Board dimensions in boxes
#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
}

/// Search budget and parallelism
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub time_budget_secs: u64,
    pub workers: usize,
    pub first_side: Side,
}

/// JSONL run report
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Boxes.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed and validated configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Boxes.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Boxes.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Boxes.toml
    pub fn default_hardcoded() -> Self {
        Config {
            grid: GridConfig {
                rows: 15,
                columns: 20,
            },
            search: SearchConfig {
                time_budget_secs: 5,
                workers: 1,
                first_side: Side::Player,
            },
            report: ReportConfig {
                enabled: false,
                log_file_path: "boxes_report.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Boxes.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Rejects values the engine cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.rows == 0 || self.grid.columns == 0 {
            return Err(format!(
                "Invalid grid geometry: {}x{} (rows and columns must be positive)",
                self.grid.rows, self.grid.columns
            ));
        }
        if self.search.workers == 0 {
            return Err("Worker count must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardcoded_defaults_are_valid() {
        let config = Config::default_hardcoded();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.rows, 15);
        assert_eq!(config.grid.columns, 20);
        assert_eq!(config.search.time_budget_secs, 5);
        assert_eq!(config.search.first_side, Side::Player);
    }

    #[test]
    fn test_boxes_toml_can_be_parsed() {
        let result = Config::from_file("Boxes.toml");
        assert!(result.is_ok(), "Failed to parse Boxes.toml: {:?}", result.err());
    }

    #[test]
    fn test_boxes_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file("Boxes.toml").expect("Boxes.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.grid.rows, hardcoded_config.grid.rows);
        assert_eq!(file_config.grid.columns, hardcoded_config.grid.columns);
        assert_eq!(
            file_config.search.time_budget_secs,
            hardcoded_config.search.time_budget_secs
        );
        assert_eq!(file_config.search.workers, hardcoded_config.search.workers);
        assert_eq!(file_config.search.first_side, hardcoded_config.search.first_side);
        assert_eq!(file_config.report.enabled, hardcoded_config.report.enabled);
        assert_eq!(
            file_config.report.log_file_path,
            hardcoded_config.report.log_file_path
        );
    }

    #[test]
    fn test_zero_rows_rejected() {
        let toml = r#"
            [grid]
            rows = 0
            columns = 3

            [search]
            time_budget_secs = 1
            workers = 2
            first_side = "player"

            [report]
            enabled = false
            log_file_path = "r.jsonl"
        "#;
        let result = Config::from_toml_str(toml);
        assert!(result.unwrap_err().contains("Invalid grid geometry"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_hardcoded();
        config.search.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_opponent_first_side_parses() {
        let toml = r#"
            [grid]
            rows = 2
            columns = 2

            [search]
            time_budget_secs = 0
            workers = 4
            first_side = "opponent"

            [report]
            enabled = true
            log_file_path = "r.jsonl"
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.search.first_side, Side::Opponent);
        assert_eq!(config.search.workers, 4);
    }

    #[test]
    fn test_missing_file_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
