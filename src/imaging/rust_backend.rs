//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG) | `image::ImageReader::decode` |
//! | Resize | `image::DynamicImage::resize_exact` with the configured filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the given quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, best compression when optimizing |
//! | Write | `tempfile::NamedTempFile` in the output directory, then `persist` |
//!
//! The format of a file is sniffed from its content, so a PNG saved with a
//! `.jpg` name still decodes. The output format always follows the output
//! file's extension.

use super::backend::{BackendError, ImageBackend};
use super::calculations::Dimensions;
use super::params::{Quality, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output encodings this backend can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Picks the encoder from the text after the last dot, so a file named
    /// just `.png` still counts as PNG.
    fn from_path(path: &Path) -> Result<Self, BackendError> {
        let ext = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(BackendError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Encode `img` into `writer` in the given format.
fn encode_into<W: Write>(
    img: &DynamicImage,
    format: OutputFormat,
    writer: W,
    quality: Quality,
    optimize: bool,
) -> image::ImageResult<()> {
    match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; flatten to RGB first.
            let encoder = JpegEncoder::new_with_quality(writer, quality.value());
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
        }
        OutputFormat::Png => {
            let compression = if optimize {
                CompressionType::Best
            } else {
                CompressionType::Default
            };
            let encoder = PngEncoder::new_with_quality(writer, compression, PngFilter::Adaptive);
            img.write_with_encoder(encoder)
        }
    }
}

/// Save a DynamicImage to the given path, inferring format from extension.
///
/// The image is encoded into a temp file beside the target and renamed over
/// it only after encoding succeeds, so a failure never leaves a truncated
/// output behind.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    quality: Quality,
    optimize: bool,
) -> Result<(), BackendError> {
    let format = OutputFormat::from_path(path)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".batch-scale-").suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_into(img, format, &mut writer, quality, optimize)
            .map_err(|e| encode_error(path, e))?;
        writer.flush()?;
    }

    tmp.persist(path).map_err(|e| BackendError::Io(e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = if img.width() == params.width && img.height() == params.height {
            img
        } else {
            img.resize_exact(params.width, params.height, params.filter.into())
        };
        save_image(&resized, &params.output, params.quality, params.optimize)
    }
}
