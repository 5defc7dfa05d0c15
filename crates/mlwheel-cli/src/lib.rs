//! Helpers behind the `mlwheel` binary: config loading and the demo runners.
pub mod demo;

use std::path::Path;

use anyhow::{Context, Result};
use mlwheel_core::config::MathConfig;

/// Load a [`MathConfig`] from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MathConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: MathConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
