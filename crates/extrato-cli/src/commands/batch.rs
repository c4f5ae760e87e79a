//! Batch processing command for multiple selection requests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use extrato_core::{ExtratoConfig, ParseResponse, TransactionAssembler};

use super::parse::{format_response, OutputFormat};
use super::{checked_tolerance, load_config, read_request};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Request files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Override the vertical tolerance
    #[arg(short, long)]
    tolerance: Option<f64>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    response: Option<ParseResponse>,
    error: Option<String>,
    processing_time_ms: u64,
    processed_at: DateTime<Local>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = Arc::new(load_config(config_path)?);
    let tolerance = checked_tolerance(args.tolerance)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let jobs = args.jobs.max(1);
    let mut tasks = JoinSet::new();
    let mut results: Vec<(usize, ProcessResult)> = Vec::new();

    for (index, path) in files.into_iter().enumerate() {
        // At most `jobs` files in flight; a failure stops further dispatch
        while tasks.len() >= jobs {
            if let Some(joined) = tasks.join_next().await {
                results.push(check_result(joined?, args.continue_on_error)?);
                overall_pb.inc(1);
            }
        }

        let config = Arc::clone(&config);
        tasks.spawn_blocking(move || {
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &config, tolerance);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;

            let (response, error) = match outcome {
                Ok(response) => (Some(response), None),
                Err(e) => (None, Some(format!("{:#}", e))),
            };

            (
                index,
                ProcessResult {
                    path,
                    response,
                    error,
                    processing_time_ms,
                    processed_at: Local::now(),
                },
            )
        });
    }

    while let Some(joined) = tasks.join_next().await {
        results.push(check_result(joined?, args.continue_on_error)?);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    let successful: Vec<_> = results.iter().filter(|r| r.response.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(response) = &result.response {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("selection");

                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_response(response, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let transactions: usize = successful
        .iter()
        .filter_map(|r| r.response.as_ref())
        .map(|r| r.count)
        .sum();

    println!();
    println!(
        "{} Processed {} files ({} transactions) in {:?}",
        style("✓").green(),
        results.len(),
        transactions,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Pass a finished file through, or stop the batch on its error.
fn check_result(
    (index, result): (usize, ProcessResult),
    continue_on_error: bool,
) -> anyhow::Result<(usize, ProcessResult)> {
    if let Some(error_msg) = &result.error {
        if continue_on_error {
            warn!("Failed to process {}: {}", result.path.display(), error_msg);
        } else {
            error!("Failed to process {}: {}", result.path.display(), error_msg);
            anyhow::bail!(
                "Processing failed for {}: {}",
                result.path.display(),
                error_msg
            );
        }
    }

    Ok((index, result))
}

fn process_single_file(
    path: &Path,
    config: &ExtratoConfig,
    tolerance: Option<f64>,
) -> anyhow::Result<ParseResponse> {
    let mut request = read_request(path)?;
    if tolerance.is_some() {
        request.vertical_tolerance = tolerance;
    }

    Ok(TransactionAssembler::from_config(config).process(&request))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "transactions",
        "total",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let processed_at = result.processed_at.to_rfc3339();

        if let Some(response) = &result.response {
            wtr.write_record([
                filename,
                "success",
                &response.count.to_string(),
                &response.total().to_string(),
                &result.processing_time_ms.to_string(),
                &processed_at,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                &result.processing_time_ms.to_string(),
                &processed_at,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
