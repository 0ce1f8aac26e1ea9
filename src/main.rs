use batch_scale::config::{self, OnError};
use batch_scale::imaging::{Quality, SizingPolicy};
use batch_scale::output;
use batch_scale::process::{self, BatchReport, ProcessConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Target size. `--scale` excludes the other two; the max flags combine.
#[derive(clap::Args)]
#[group(required = true, multiple = true)]
struct SizingArgs {
    /// Scale percentage (e.g. 50 for 50%)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with_all = ["max_width", "max_height"])]
    scale: Option<u32>,

    /// Maximum width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_width: Option<u32>,

    /// Maximum height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_height: Option<u32>,
}

#[derive(Parser)]
#[command(name = "batch-scale")]
#[command(about = "Batch scale images for web use")]
#[command(long_about = "\
Batch scale images for web use

Resizes every .png, .jpg and .jpeg file directly inside INPUT_DIR and writes
the result to OUTPUT_DIR under the same name. Subdirectories are ignored.

Sizing (pick one):
  --scale 50                      50% of the original size
  --max-width 1280                fit within 1280px wide
  --max-height 720                fit within 720px high
  --max-width 1280 --max-height 720   fit within a 1280x720 box

Max sizes never upscale: images already within bounds are re-encoded at their
original size. JPEGs are encoded at quality 85 unless configured otherwise.")]
#[command(version)]
struct Cli {
    /// Input folder with images
    input_dir: PathBuf,

    /// Output folder for scaled images (created if missing)
    output_dir: PathBuf,

    #[command(flatten)]
    sizing: SizingArgs,

    /// TOML settings file (quality, filter, ordering, error handling)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JPEG quality, 1-100 (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Keep going when an image fails, and report failures at the end
    #[arg(long)]
    continue_on_error: bool,

    /// Show what would be resized without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Only print the summary and errors
    #[arg(short, long)]
    quiet: bool,

    /// Write a JSON report of the batch to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            println!("{}", output::format_summary(&report));
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                for line in output::format_failures(&report) {
                    eprintln!("{}", line);
                }
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let policy = SizingPolicy::from_options(
        cli.sizing.scale,
        cli.sizing.max_width,
        cli.sizing.max_height,
    )
    .map_err(process::ProcessError::from)?;

    let resize_config = config::load_config(cli.config.as_deref())?;
    let mut process_config = ProcessConfig::from_resize_config(policy, &resize_config);
    if let Some(quality) = cli.quality {
        process_config.settings.quality = Quality::new(quality);
    }
    if cli.continue_on_error {
        process_config.on_error = OnError::Continue;
    }
    process_config.dry_run = cli.dry_run;

    let report = if cli.quiet {
        process::process(&cli.input_dir, &cli.output_dir, &process_config, None)?
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_process_event(&event) {
                    println!("{}", line);
                }
            }
        });
        let result = process::process(&cli.input_dir, &cli.output_dir, &process_config, Some(tx));
        printer.join().unwrap();
        result?
    };

    if let Some(report_path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, json)?;
    }

    Ok(report)
}
