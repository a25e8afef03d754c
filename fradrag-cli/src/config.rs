//! Deduction configuration loading.
//!
//! The TOML file lists only the values that differ from the built-in
//! defaults:
//!
//! ```toml
//! standard_tax_rate = 0.22
//! bsu_cap = 27500
//! donation_cap = "25000"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fradrag_core::DeductionConfig;
use tracing::{debug, info};

/// Reads and validates the config at `path`, or returns the defaults when
/// no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DeductionConfig> {
    let Some(path) = path else {
        debug!("no config file given; using default deduction config");
        return Ok(DeductionConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file '{}'", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;

    info!(path = %path.display(), "loaded deduction config");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<DeductionConfig> {
    let config: DeductionConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
