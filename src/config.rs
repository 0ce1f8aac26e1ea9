//! Batch configuration module.
//!
//! Handles loading, validating, and merging the optional settings file
//! passed with `--config`. Sizing (`--scale`, `--max-width`, `--max-height`)
//! is always given on the command line; the file only covers how images are
//! encoded and how the batch behaves.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 85          # JPEG quality (1-100)
//! optimize = true       # Maximum PNG compression
//! filter = "lanczos3"   # lanczos3 | catmull-rom | gaussian | triangle | nearest
//!
//! [processing]
//! order = "name"        # name | listing (raw directory order)
//! on_error = "abort"    # abort | continue
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [processing]
//! on_error = "continue"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::ResampleFilter;
use crate::scan::FileOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Batch configuration loaded from a TOML file.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Encoding settings.
    pub output: OutputConfig,
    /// Batch behavior.
    pub processing: ProcessingConfig,
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1 = worst, 100 = best). Ignored for PNG.
    pub quality: u32,
    /// Use the slowest, smallest PNG compression.
    pub optimize: bool,
    /// Resampling filter.
    pub filter: ResampleFilter,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            optimize: true,
            filter: ResampleFilter::Lanczos3,
        }
    }
}

/// What happens when one file fails to decode or encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop the batch at the first failure.
    #[default]
    Abort,
    /// Record the failure and move on to the next file.
    Continue,
}

/// Batch behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    pub order: FileOrder,
    pub on_error: OnError,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ResizeConfig::default())?)
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ResizeConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, or stock defaults when no file is given.
///
/// An explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<ResizeConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("batch-scale.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_config_values() {
        let config = ResizeConfig::default();
        assert_eq!(config.output.quality, 85);
        assert!(config.output.optimize);
        assert_eq!(config.output.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.processing.order, FileOrder::Name);
        assert_eq!(config.processing.on_error, OnError::Abort);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ResizeConfig::default());
    }

    #[test]
    fn load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[output]
quality = 70
optimize = false
filter = "catmull-rom"

[processing]
order = "listing"
on_error = "continue"
"#,
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.quality, 70);
        assert!(!config.output.optimize);
        assert_eq!(config.output.filter, ResampleFilter::CatmullRom);
        assert_eq!(config.processing.order, FileOrder::Listing);
        assert_eq!(config.processing.on_error, OnError::Continue);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[output]
quality = 60
"#,
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.quality, 60);
        assert!(config.output.optimize);
        assert_eq!(config.output.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.processing, ProcessingConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[output]
qualty = 60
"#,
        );

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_section_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[threads]\ncount = 4\n");

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn invalid_toml_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[output\nquality = ");

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn quality_out_of_range_rejected() {
        let tmp = TempDir::new().unwrap();
        for bad in ["0", "101"] {
            let path = write_config(tmp.path(), &format!("[output]\nquality = {bad}\n"));
            assert!(
                matches!(load_config(Some(&path)), Err(ConfigError::Validation(_))),
                "quality {bad} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn merge_overlay_overrides_nested_keys() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();

        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }
}
