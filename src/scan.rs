//! Input directory scanning.
//!
//! Lists the immediate children of the input directory and keeps the files
//! the batch can process. Nothing below the top level is visited.
//!
//! ## Eligibility
//!
//! A file is eligible when its name, compared case-insensitively, ends with a
//! dot and one of [`ELIGIBLE_EXTENSIONS`]. That includes a file named just
//! `.png`, which has no extension as far as [`Path::extension`] is concerned.
//! Directories are skipped even if their name
//! looks like an image (`holiday.jpg/`), as is everything else.
//!
//! ## Ordering
//!
//! Raw directory order is platform-dependent. [`FileOrder::Name`] (the
//! default) sorts by file name so runs and logs are reproducible;
//! [`FileOrder::Listing`] keeps whatever order the OS returned.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions (lowercase, without dot) the batch processes.
pub const ELIGIBLE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read input directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Order in which eligible files are processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOrder {
    #[default]
    Name,
    Listing,
}

/// An eligible image found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Bare file name, reused verbatim for the output.
    pub file_name: OsString,
    /// Full path to the source file.
    pub path: PathBuf,
}

impl ImageFile {
    /// File name for display; lossy for non-UTF-8 names.
    pub fn display_name(&self) -> String {
        self.file_name.to_string_lossy().into_owned()
    }
}

/// Whether a path's file name ends with one of the eligible image extensions.
pub fn is_eligible(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .is_some_and(|(_, ext)| {
            ELIGIBLE_EXTENSIONS
                .iter()
                .any(|eligible| ext.eq_ignore_ascii_case(eligible))
        })
}

/// List eligible image files directly inside `dir`.
pub fn scan(dir: &Path, order: FileOrder) -> Result<Vec<ImageFile>, ScanError> {
    let read_err = |source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();

        // Follows symlinks, so a link to an image counts as a file.
        if !path.is_file() || !is_eligible(&path) {
            continue;
        }

        files.push(ImageFile {
            file_name: entry.file_name(),
            path,
        });
    }

    if order == FileOrder::Name {
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    }

    Ok(files)
}
