//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Dimensions, PolicyError, SizingPolicy, calculate_target_dimensions};
use super::params::{Quality, ResampleFilter, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Encoder settings shared by every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSettings {
    pub quality: Quality,
    pub optimize: bool,
    pub filter: ResampleFilter,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            optimize: true,
            filter: ResampleFilter::default(),
        }
    }
}

/// Plan a resize operation without executing it.
///
/// Computes the target size for `original` under `policy` and bundles it
/// with the encoder settings.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    original: Dimensions,
    policy: &SizingPolicy,
    settings: &ResizeSettings,
) -> std::result::Result<ResizeParams, PolicyError> {
    let target = calculate_target_dimensions(original, policy)?;

    Ok(ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: target.width,
        height: target.height,
        quality: settings.quality,
        optimize: settings.optimize,
        filter: settings.filter,
    })
}
