//! Album configuration module.
//!
//! Handles loading, validating, and merging `album.toml`. Stock defaults
//! reproduce the classic A4 album; a user file only needs the keys it wants
//! to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [page]
//! width = 210.0             # Page width in mm
//! height = 297.0            # Page height in mm
//! margin = 15.0             # Uniform margin in mm
//!
//! [captions]
//! include_photo_titles = true
//! include_photo_descriptions = true
//! include_date_taken = true
//!
//! [layout]
//! image_fraction = 0.2356902356902357   # Image frame height / page height (70/297)
//! band_gap = 10.0           # Gap between the page middle and each band
//! text_gap = 5.0            # Frame bottom to first caption baseline
//! title_advance = 6.0
//! date_advance = 5.0
//! description_line_height = 4.5
//! default_aspect_ratio = [4, 3]
//!
//! [processing]
//! max_threads = 4           # Image probing workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::layout::{LayoutSettings, PageGeometry};
use crate::types::AlbumOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILENAME: &str = "album.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Album configuration loaded from `album.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlbumConfig {
    /// Page size and margin.
    pub page: PageGeometry,
    /// Which caption blocks appear under each photo.
    pub captions: CaptionsConfig,
    /// Vertical rhythm of content pages.
    pub layout: LayoutSettings,
    /// Image probing parallelism.
    pub processing: ProcessingConfig,
}

impl AlbumConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.page.validate().map_err(ConfigError::Validation)?;
        self.layout.validate().map_err(ConfigError::Validation)?;
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Album options for a given cover, with caption flags from config.
    pub fn album_options(&self, title: &str, subtitle: Option<&str>) -> AlbumOptions {
        AlbumOptions {
            title: title.to_string(),
            subtitle: subtitle.map(String::from),
            include_photo_titles: self.captions.include_photo_titles,
            include_photo_descriptions: self.captions.include_photo_descriptions,
            include_date_taken: self.captions.include_date_taken,
        }
    }
}

/// Caption toggles applied to every album built with this config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionsConfig {
    pub include_photo_titles: bool,
    pub include_photo_descriptions: bool,
    pub include_date_taken: bool,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        let options = AlbumOptions::default();
        Self {
            include_photo_titles: options.include_photo_titles,
            include_photo_descriptions: options.include_photo_descriptions,
            include_date_taken: options.include_date_taken,
        }
    }
}

/// Parallel image probing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of probing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AlbumConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `album.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `album.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AlbumConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AlbumConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `album.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<AlbumConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `album.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# PhotoChronicle Album Configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Lengths are millimetres.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[page]
# A4 portrait.
width = 210.0
height = 297.0
# Uniform margin. Must be less than half the width and half the height.
margin = 15.0

# ---------------------------------------------------------------------------
# Captions under each photo
# ---------------------------------------------------------------------------
[captions]
# Bold title line (skipped for photos without a title).
include_photo_titles = true
# Word-wrapped description (skipped for photos without one).
include_photo_descriptions = true
# "Taken: June 10, 2023" line.
include_date_taken = true

# ---------------------------------------------------------------------------
# Content page layout
# ---------------------------------------------------------------------------
[layout]
# Image frame height as a fraction of the page height. The frame shrinks if
# the band cannot otherwise fit a title, a date and one description line.
# The default is 70/297: a 70 mm frame on A4.
image_fraction = 0.2356902356902357

# Gap between the middle of the page and each of the two photo bands.
band_gap = 10.0

# Distance from the bottom of the image frame to the first caption baseline.
text_gap = 5.0

# Baseline advances after the title and date lines.
title_advance = 6.0
date_advance = 5.0

# Baseline distance between wrapped description lines.
description_line_height = 4.5

# Aspect ratio [width, height] assumed for photos whose size is unknown.
default_aspect_ratio = [4, 3]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-probing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
