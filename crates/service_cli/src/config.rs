//! Simulator configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file (`[parameters]` and `[output]` tables)
//! 3. `TRS_*` environment variables
//! 4. Command line flags
//!
//! ```toml
//! [parameters]
//! notional = 1000000.0
//! financing_rate = 0.05
//! period_years = 1.0
//! collateral = 200000.0
//! move_start = -0.20
//! move_stop = 0.21
//! move_step = 0.05
//!
//! [output]
//! dir = "."
//! ```

use std::path::{Path, PathBuf};

use pricer_trs::{MoveGrid, ScenarioParameters, MAX_GRID_POINTS};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Root directory for `data/` and `images/`
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Scenario inputs
    #[serde(default)]
    pub parameters: ScenarioParameters,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Individually optional settings from the environment or the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub notional: Option<f64>,
    pub financing_rate: Option<f64>,
    pub period_years: Option<f64>,
    pub collateral: Option<f64>,
    pub move_start: Option<f64>,
    pub move_stop: Option<f64>,
    pub move_step: Option<f64>,
    pub output_dir: Option<PathBuf>,
}

const ENV_NOTIONAL: &str = "TRS_NOTIONAL";
const ENV_FINANCING_RATE: &str = "TRS_FINANCING_RATE";
const ENV_PERIOD_YEARS: &str = "TRS_PERIOD_YEARS";
const ENV_COLLATERAL: &str = "TRS_COLLATERAL";
const ENV_MOVE_START: &str = "TRS_MOVE_START";
const ENV_MOVE_STOP: &str = "TRS_MOVE_STOP";
const ENV_MOVE_STEP: &str = "TRS_MOVE_STEP";
const ENV_OUTPUT_DIR: &str = "TRS_OUTPUT_DIR";

impl Overrides {
    /// Read overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |var: &'static str| -> Result<Option<f64>, ConfigError> {
            let Some(raw) = lookup(var) else {
                return Ok(None);
            };
            match raw.trim().parse::<f64>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(ConfigError::Env { var, value: raw }),
            }
        };

        Ok(Self {
            notional: number(ENV_NOTIONAL)?,
            financing_rate: number(ENV_FINANCING_RATE)?,
            period_years: number(ENV_PERIOD_YEARS)?,
            collateral: number(ENV_COLLATERAL)?,
            move_start: number(ENV_MOVE_START)?,
            move_stop: number(ENV_MOVE_STOP)?,
            move_step: number(ENV_MOVE_STEP)?,
            output_dir: lookup(ENV_OUTPUT_DIR).map(PathBuf::from),
        })
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!(path = %path.display(), "Loading configuration file");
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        Ok(self.with_overrides(&Overrides::from_env()?))
    }

    /// Replace every setting that `overrides` provides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        let p = &mut self.parameters;
        let numeric = [
            (&mut p.notional, overrides.notional),
            (&mut p.financing_rate, overrides.financing_rate),
            (&mut p.period_years, overrides.period_years),
            (&mut p.collateral, overrides.collateral),
            (&mut p.move_start, overrides.move_start),
            (&mut p.move_stop, overrides.move_stop),
            (&mut p.move_step, overrides.move_step),
        ];
        for (slot, value) in numeric {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(dir) = &overrides.output_dir {
            self.output.dir = dir.clone();
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let p = &self.parameters;

        let finite_checks = [
            ("notional", p.notional),
            ("financing_rate", p.financing_rate),
            ("period_years", p.period_years),
            ("collateral", p.collateral),
            ("move_start", p.move_start),
            ("move_stop", p.move_stop),
            ("move_step", p.move_step),
        ];
        for (name, value) in finite_checks {
            if !value.is_finite() {
                errors.push(format!("{} must be finite (got {})", name, value));
            }
        }

        if p.collateral.is_finite() && p.collateral <= 0.0 {
            errors.push(format!(
                "collateral must be greater than 0 (got {})",
                p.collateral
            ));
        }

        if p.move_start.is_finite() && p.move_stop.is_finite() && p.move_step.is_finite() {
            let points = MoveGrid::new(p.move_start, p.move_stop, p.move_step).len();
            if points > MAX_GRID_POINTS {
                errors.push(format!(
                    "move range produces {} scenarios, exceeding the maximum ({})",
                    points, MAX_GRID_POINTS
                ));
            }
        }

        if self.output.dir.as_os_str().is_empty() {
            errors.push("output dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error reading {}: {message}", .path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment variable does not hold a number
    #[error("Invalid value '{value}' for {var}")]
    Env {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// One or more settings are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.parameters, ScenarioParameters::default());
        assert_eq!(config.output.dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config: SimConfig = toml::from_str(
            r#"
            [parameters]
            notional = 2000000
            financing_rate = 0.04
            period_years = 0.5
            collateral = 400000.0
            move_start = -0.1
            move_stop = 0.11
            move_step = 0.01

            [output]
            dir = "runs/latest"
            "#,
        )
        .unwrap();

        assert_eq!(config.parameters.notional, 2_000_000.0);
        assert_eq!(config.parameters.financing_rate, 0.04);
        assert_eq!(config.parameters.period_years, 0.5);
        assert_eq!(config.parameters.move_step, 0.01);
        assert_eq!(config.output.dir, PathBuf::from("runs/latest"));
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config: SimConfig = toml::from_str("[parameters]\ncollateral = 100000.0\n").unwrap();
        assert_eq!(config.parameters.collateral, 100_000.0);
        assert_eq!(config.parameters.notional, 1_000_000.0);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_unknown_table_rejected() {
        let result: Result<SimConfig, _> = toml::from_str("[pricing]\nmodel = \"hw\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_misspelled_parameter_rejected() {
        let result: Result<SimConfig, _> = toml::from_str("[parameters]\nnotionl = 5.0\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("notionl"));
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trs.toml");
        std::fs::write(&path, "[parameters]\nnotional = \"lots\"\n").unwrap();

        assert!(matches!(SimConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let overrides = Overrides::from_lookup(lookup_from(&[
            ("TRS_NOTIONAL", "5000000"),
            ("TRS_MOVE_START", " -0.5 "),
            ("TRS_OUTPUT_DIR", "/tmp/trs"),
        ]))
        .unwrap();

        let config = SimConfig::default().with_overrides(&overrides);
        assert_eq!(config.parameters.notional, 5_000_000.0);
        assert_eq!(config.parameters.move_start, -0.5);
        assert_eq!(config.parameters.collateral, 200_000.0);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/trs"));
    }

    #[test]
    fn test_env_rejects_non_numeric() {
        let err = Overrides::from_lookup(lookup_from(&[("TRS_COLLATERAL", "plenty")])).unwrap_err();
        match err {
            ConfigError::Env { var, value } => {
                assert_eq!(var, "TRS_COLLATERAL");
                assert_eq!(value, "plenty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_later_layer_wins() {
        let from_env = Overrides {
            notional: Some(3.0),
            collateral: Some(7.0),
            ..Overrides::default()
        };
        let from_cli = Overrides {
            notional: Some(9.0),
            ..Overrides::default()
        };

        let config = SimConfig::default()
            .with_overrides(&from_env)
            .with_overrides(&from_cli);
        assert_eq!(config.parameters.notional, 9.0);
        assert_eq!(config.parameters.collateral, 7.0);
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let mut config = SimConfig::default();
        config.parameters.notional = f64::NAN;
        config.parameters.collateral = 0.0;
        config.output.dir = PathBuf::new();

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("notional"));
                assert!(errors[1].contains("collateral"));
                assert!(errors[2].contains("output dir"));
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        let mut config = SimConfig::default();
        config.parameters.move_step = 1e-12;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_grid_is_valid() {
        let mut config = SimConfig::default();
        config.parameters.move_step = -0.05;
        assert!(config.validate().is_ok());
    }
}
