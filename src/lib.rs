//! # batch-scale
//!
//! Resize a directory of PNG/JPEG images for the web, either by a percentage
//! or to fit within a maximum width and/or height, and write the results to
//! an output directory under their original file names.
//!
//! ```text
//! batch-scale photos/ web/ --scale 50
//! batch-scale photos/ web/ --max-width 1280
//! batch-scale photos/ web/ --max-width 1280 --max-height 720
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Dimension math, sizing policy, and the `image`-crate backend |
//! | [`scan`] | Lists eligible images directly inside the input directory |
//! | [`process`] | Batch driver: identify → calculate → resize → write, per file |
//! | [`config`] | Optional TOML settings (quality, filter, ordering, error policy) |
//! | [`output`] | CLI output formatting for progress events and summaries |
//!
//! # Design Decisions
//!
//! ## Bounding Never Upscales
//!
//! `--max-width`/`--max-height` shrink an image just enough to fit every
//! given limit and leave smaller images alone. Re-running on already
//! processed output is therefore a no-op. `--scale` is a plain multiplier
//! and will upscale above 100.
//!
//! ## Integer Ratios
//!
//! Scale factors are exact fractions, so `--max-width 1000` on a 3000px wide
//! image yields exactly 1000px, never 999 from float rounding. Results are
//! truncated toward zero and never smaller than 1px.
//!
//! ## Fail-Fast by Default
//!
//! The first unreadable or unwritable image stops the batch with an error
//! naming the file. `--continue-on-error` (or `on_error = "continue"` in the
//! config file) records the failure and carries on; the run still exits
//! non-zero.
//!
//! ## Atomic Writes
//!
//! Outputs are encoded into a temp file in the output directory and renamed
//! into place, so an interrupted or failed encode never leaves a truncated
//! image under the real name.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
