//! Batch resizing.
//!
//! Takes every eligible image directly inside the input directory, computes
//! its target size from the [`SizingPolicy`], and writes the resized image to
//! the output directory under the same file name.
//!
//! ## Per-file pipeline
//!
//! ```text
//! identify → calculate target → resample (Lanczos3) → encode → rename into place
//! ```
//!
//! Files are processed one at a time. Each decoded buffer lives only for the
//! duration of its own `resize` call.
//!
//! ## Failures
//!
//! Targets above [`MAX_TARGET_PIXELS`] fail before anything is decoded.
//! With [`OnError::Abort`] (the default) the first per-file failure stops
//! the batch and is returned as [`ProcessError::Image`]. With
//! [`OnError::Continue`] the failure is reported as a
//! [`ProcessEvent::ImageFailed`], recorded in the [`BatchReport`], and the
//! batch moves on.
//!
//! ## Progress
//!
//! Progress is reported through an optional channel of [`ProcessEvent`]s;
//! the caller decides how (or whether) to display them.

use crate::config::{OnError, ResizeConfig};
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, PolicyError, Quality, ResizeSettings, RustBackend,
    SizingPolicy, get_dimensions, plan_resize,
};
use crate::scan::{self, FileOrder, ImageFile, ScanError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Configuration error: {0}")]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    InputDir(#[from] ScanError),
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file_name}: {source}")]
    Image {
        file_name: String,
        #[source]
        source: ImageError,
    },
}

/// Why a single file could not be resized.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Size(#[from] PolicyError),
    #[error("target size {target} exceeds the limit of {} pixels", MAX_TARGET_PIXELS)]
    TooLarge { target: Dimensions },
}

/// Largest target accepted before resampling: an RGBA8 buffer of this many
/// pixels matches the `image` crate's default 512 MiB allocation limit.
pub const MAX_TARGET_PIXELS: u64 = 512 * 1024 * 1024 / 4;

fn check_target_size(target: Dimensions) -> Result<(), ImageError> {
    if u64::from(target.width) * u64::from(target.height) > MAX_TARGET_PIXELS {
        return Err(ImageError::TooLarge { target });
    }
    Ok(())
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub policy: SizingPolicy,
    pub settings: ResizeSettings,
    pub order: FileOrder,
    pub on_error: OnError,
    /// Identify and plan only; nothing is written.
    pub dry_run: bool,
}

impl ProcessConfig {
    pub fn new(policy: SizingPolicy) -> Self {
        Self::from_resize_config(policy, &ResizeConfig::default())
    }

    /// Build a ProcessConfig from the loaded config file values.
    pub fn from_resize_config(policy: SizingPolicy, config: &ResizeConfig) -> Self {
        Self {
            policy,
            settings: ResizeSettings {
                quality: Quality::new(config.output.quality),
                optimize: config.output.optimize,
                filter: config.output.filter,
            },
            order: config.processing.order,
            on_error: config.processing.on_error,
            dry_run: false,
        }
    }
}

/// Progress event emitted during processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Scan finished; `image_count` eligible files will be processed.
    BatchStarted {
        input_dir: String,
        image_count: usize,
    },
    /// Target size computed, about to resample and encode.
    ImageStarted {
        file_name: String,
        original: Dimensions,
        target: Dimensions,
    },
    /// Output written.
    ImageSaved { output_path: String },
    /// File skipped after an error (continue mode only).
    ImageFailed { file_name: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedImage {
    pub file_name: String,
    pub original: Dimensions,
    pub target: Dimensions,
    pub output_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedImage {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedImage>,
    pub dry_run: bool,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn process(
    input_dir: &Path,
    output_dir: &Path,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, input_dir, output_dir, config, progress)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output_dir: &Path,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    config.policy.validate()?;

    let emit = |event: ProcessEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };

    if !config.dry_run {
        std::fs::create_dir_all(output_dir).map_err(|source| ProcessError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let files = scan::scan(input_dir, config.order)?;
    emit(ProcessEvent::BatchStarted {
        input_dir: input_dir.display().to_string(),
        image_count: files.len(),
    });

    let mut report = BatchReport {
        dry_run: config.dry_run,
        ..BatchReport::default()
    };

    for file in &files {
        match process_image(backend, file, output_dir, config, &emit) {
            Ok(processed) => report.processed.push(processed),
            Err(ProcessError::Image { file_name, source })
                if config.on_error == OnError::Continue =>
            {
                let error = source.to_string();
                emit(ProcessEvent::ImageFailed {
                    file_name: file_name.clone(),
                    error: error.clone(),
                });
                report.failed.push(FailedImage { file_name, error });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

/// Resize a single file, tagging backend failures with its name.
fn process_image(
    backend: &impl ImageBackend,
    file: &ImageFile,
    output_dir: &Path,
    config: &ProcessConfig,
    emit: &impl Fn(ProcessEvent),
) -> Result<ProcessedImage, ProcessError> {
    let image_error = |source: ImageError| ProcessError::Image {
        file_name: file.display_name(),
        source,
    };

    let output_path = output_dir.join(&file.file_name);
    let original =
        get_dimensions(backend, &file.path).map_err(|e| image_error(ImageError::from(e)))?;
    let params = plan_resize(
        &file.path,
        &output_path,
        original,
        &config.policy,
        &config.settings,
    )
    .map_err(|e| image_error(ImageError::from(e)))?;
    let target = Dimensions::new(params.width, params.height);
    check_target_size(target).map_err(image_error)?;

    emit(ProcessEvent::ImageStarted {
        file_name: file.display_name(),
        original,
        target,
    });

    let output_path = output_path.display().to_string();
    if !config.dry_run {
        backend
            .resize(&params)
            .map_err(|e| image_error(ImageError::from(e)))?;
        emit(ProcessEvent::ImageSaved {
            output_path: output_path.clone(),
        });
    }

    Ok(ProcessedImage {
        file_name: file.display_name(),
        original,
        target,
        output_path,
    })
}
