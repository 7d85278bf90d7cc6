//! Effective configuration: TOML file first, then command-line overrides.

use anyhow::Context;
use kappa_core::KappaConfig;
use std::path::Path;

/// Read when no `--config` is given. Missing or unreadable means defaults.
pub const DEFAULT_CONFIG_FILE: &str = "kappa.toml";

/// Values given on the command line. `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sensitivity: Option<f64>,
    pub threshold: Option<f64>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Overrides {
    pub fn apply(&self, config: &mut KappaConfig) {
        if let Some(sensitivity) = self.sensitivity {
            config.engine.sensitivity = sensitivity;
        }
        if let Some(threshold) = self.threshold {
            config.engine.threshold = threshold;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Load the config, apply `overrides`, and validate the result.
///
/// An explicit `path` must exist and parse. Without one, [`DEFAULT_CONFIG_FILE`]
/// in the working directory is used if present.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<KappaConfig> {
    let mut config = match path {
        Some(path) => KappaConfig::load_strict(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => KappaConfig::load(Path::new(DEFAULT_CONFIG_FILE)),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
