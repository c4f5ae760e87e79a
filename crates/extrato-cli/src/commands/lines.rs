//! Lines command - show how words were grouped before parsing.

use std::path::PathBuf;

use clap::Args;
use console::style;

use extrato_core::{FieldParser, TransactionAssembler};

use super::{checked_tolerance, load_config, read_request};

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Request file: {"words": [...]}
    #[arg(required = true)]
    input: PathBuf,

    /// Override the vertical tolerance
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Mark which lines parse as transactions
    #[arg(long)]
    mark: bool,
}

pub async fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut request = read_request(&args.input)?;

    if let Some(tolerance) = checked_tolerance(args.tolerance)? {
        request.vertical_tolerance = Some(tolerance);
    }

    let lines = TransactionAssembler::from_config(&config).lines(&request);
    let parser = FieldParser::new();

    for line in &lines {
        if args.mark {
            let marker = if parser.extract_fields(&line.text).is_some() {
                style("✓").green()
            } else {
                style("·").dim()
            };
            println!("{} {:>8.2}  {}", marker, line.base_top, line.text);
        } else {
            println!("{:>8.2}  {}", line.base_top, line.text);
        }
    }

    Ok(())
}
