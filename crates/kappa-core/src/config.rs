//! Kappa configuration
//!
//! Engine and server parameters in one place. Loaded from TOML at startup,
//! falls back to defaults if no config file exists. Command-line flags are
//! applied on top by the binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KappaConfig {
    /// Scoring parameters.
    pub engine: EngineConfig,
    /// Session server parameters.
    pub server: ServerConfig,
}

/// Scoring parameters, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Scales the bigram-variance penalty in the stability metric. Must be > 0.
    pub sensitivity: f64,
    /// Correction pivot for the coherence score, in (0, 1).
    pub threshold: f64,
    /// Number of recent results used by `get_trends`.
    pub trend_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Answer messages with an unrecognized `type` with an error frame
    /// instead of dropping them.
    pub reject_unknown_types: bool,
}

// ============================================================
// Defaults
// ============================================================

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.75,
            threshold: 0.618,
            trend_window: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8765,
            reject_unknown_types: false,
        }
    }
}

// ============================================================
// Validation
// ============================================================

impl EngineConfig {
    pub fn new(sensitivity: f64, threshold: f64) -> Result<Self> {
        let config = Self {
            sensitivity,
            threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(Error::config(format!(
                "sensitivity must be a finite value > 0, got {}",
                self.sensitivity
            )));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::config(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if self.trend_window == 0 {
            return Err(Error::config("trend_window must be >= 1"));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============================================================
// Loading
// ============================================================

impl KappaConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {} - using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load config from a TOML file the user named explicitly.
    ///
    /// Unlike [`KappaConfig::load`], a missing or malformed file is an error.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = KappaConfig::default();
        assert_eq!(c.engine.sensitivity, 0.75);
        assert_eq!(c.engine.threshold, 0.618);
        assert_eq!(c.engine.trend_window, 10);
        assert_eq!(c.server.bind_addr(), "localhost:8765");
        assert!(!c.server.reject_unknown_types);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = KappaConfig::from_toml("[engine]\nthreshold = 0.5\n").unwrap();
        assert_eq!(c.engine.threshold, 0.5);
        assert_eq!(c.engine.sensitivity, 0.75);
        assert_eq!(c.server.port, 8765);
    }

    #[test]
    fn strict_load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(KappaConfig::load_strict(&missing), Err(Error::Io(_))));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[engine]\nthreshold = \"0.9\"\nsensitivity = 5.0\n").unwrap();
        assert!(matches!(KappaConfig::load_strict(&bad), Err(Error::Toml(_))));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[engine]\nsensitivity = 5.0\n").unwrap();
        assert_eq!(KappaConfig::load_strict(&good).unwrap().engine.sensitivity, 5.0);
    }

    #[test]
    fn threshold_bounds_are_exclusive() {
        assert!(EngineConfig::new(0.75, 0.0).is_err());
        assert!(EngineConfig::new(0.75, 1.0).is_err());
        assert!(EngineConfig::new(0.75, 0.999).is_ok());
    }

    #[test]
    fn sensitivity_must_be_positive() {
        assert!(EngineConfig::new(0.0, 0.5).is_err());
        assert!(EngineConfig::new(-1.0, 0.5).is_err());
        assert!(EngineConfig::new(f64::NAN, 0.5).is_err());
    }
}
