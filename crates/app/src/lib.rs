//! SpellVox application: a replay harness and probe tooling around the
//! consensus engine.

use anyhow::Context;
use std::path::Path;

use spellvox_consensus::types::SessionConfig;

pub mod runtime;

/// Load the session configuration from a TOML file, or fall back to
/// defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config: SessionConfig = toml::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            tracing::info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(SessionConfig::default()),
    }
}
