//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Scaling 2 images from photos/
//! Processing: a.png | Original size: 2000x1000 -> New size: 1000x500
//! Saved: web/a.png
//! Processing: b.jpg | Original size: 800x600 -> New size: 800x600
//! Saved: web/b.jpg
//! Done: 2 resized
//! ```
//!
//! In dry-run mode only the `Processing:` lines appear and the summary reads
//! `Dry run: 2 planned`. Failures recorded in continue mode print as
//! `Failed: <file>: <error>`.
//!
//! # Architecture
//!
//! Format functions return `Vec<String>` (or `String`) for testability and are
//! pure, with no I/O. `main.rs` does the printing.

use crate::process::{BatchReport, ProcessEvent};

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted {
            input_dir,
            image_count,
        } => vec![format!(
            "Scaling {} from {}",
            plural(*image_count, "image"),
            input_dir
        )],
        ProcessEvent::ImageStarted {
            file_name,
            original,
            target,
        } => vec![format!(
            "Processing: {} | Original size: {} -> New size: {}",
            file_name, original, target
        )],
        ProcessEvent::ImageSaved { output_path } => vec![format!("Saved: {}", output_path)],
        ProcessEvent::ImageFailed { file_name, error } => {
            vec![format!("Failed: {}: {}", file_name, error)]
        }
    }
}

/// One-line summary of a finished batch.
pub fn format_summary(report: &BatchReport) -> String {
    let done = report.processed.len();
    if report.dry_run {
        return format!("Dry run: {done} planned");
    }
    match report.failed.len() {
        0 => format!("Done: {done} resized"),
        failed => format!("Done: {done} resized, {failed} failed"),
    }
}

/// Lines listing every failed file, for printing after the summary.
pub fn format_failures(report: &BatchReport) -> Vec<String> {
    report
        .failed
        .iter()
        .map(|f| format!("    {}: {}", f.file_name, f.error))
        .collect()
}
