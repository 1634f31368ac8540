//! Extract command - process a receipt directory into one CSV table.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use recx_core::pipeline::FileReport;
use recx_core::{load_schema, Pipeline, ReceiptKind};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Schema spreadsheet (default from config: schema.xlsx)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Receipt directory (default from config: receipts)
    #[arg(short, long)]
    receipts: Option<PathBuf>,

    /// Output CSV file (default from config: final_output.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let schema_path = args.schema.unwrap_or(config.input.schema_path);
    let receipts = args.receipts.unwrap_or(config.input.receipts_dir);
    let output = args.output.unwrap_or(config.output.path);

    // Schema problems abort before any receipt is touched
    let schema = load_schema(&schema_path)
        .map_err(|e| anyhow::anyhow!("Failed to load schema {}: {}", schema_path.display(), e))?;
    info!("Loaded {} schema columns from {}", schema.len(), schema_path.display());

    if !receipts.is_dir() {
        anyhow::bail!("Receipt directory not found: {}", receipts.display());
    }

    let pipeline = Pipeline::new(&config.extraction)?;
    let file_count = Pipeline::receipt_files(&receipts)?.len();

    let pb = ProgressBar::new(file_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let summary = pipeline.run_with(&schema, &receipts, &output, |report: &FileReport| {
        if report.kind == ReceiptKind::Pdf {
            let name = report
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.suspend(|| {
                println!(
                    "{} Extracted from PDF: {} rows from {}",
                    style("ℹ").blue(),
                    report.rows,
                    name
                );
            });
        }
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    println!(
        "{} Parsed {} rows from '{}'. Output saved to '{}'",
        style("✓").green(),
        summary.rows,
        receipts.display(),
        summary.output_path.display()
    );

    debug!(
        "{} html, {} pdf files in {:?}",
        summary.html_files,
        summary.pdf_files,
        start.elapsed()
    );

    Ok(())
}
