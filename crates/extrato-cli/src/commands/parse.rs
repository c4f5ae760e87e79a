//! Parse command - extract transactions from a single selection request.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use extrato_core::{ParseResponse, TransactionAssembler};

use super::{checked_tolerance, load_config, read_request};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Request file: {"words": [{"text", "x0", "top"}, ...]}
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Override the vertical tolerance
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Print the total of all values
    #[arg(long)]
    show_total: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let mut request = read_request(&args.input)?;

    if let Some(tolerance) = checked_tolerance(args.tolerance)? {
        request.vertical_tolerance = Some(tolerance);
    }

    info!(
        "Processing {} words from {}",
        request.words.len(),
        args.input.display()
    );

    let response = TransactionAssembler::from_config(&config).process(&request);

    emit(&response, args.format, args.output.as_ref())?;

    if args.show_total {
        eprintln!(
            "{} {} transactions, total {}",
            style("ℹ").blue(),
            response.count,
            response.total()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Write a response to a file or stdout.
pub fn emit(
    response: &ParseResponse,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let rendered = format_response(response, format)?;

    if let Some(output_path) = output {
        fs::write(output_path, &rendered)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

pub fn format_response(response: &ParseResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

fn format_csv(response: &ParseResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["id", "date", "description", "installment", "value"])?;

    for tx in &response.transactions {
        wtr.write_record([
            &tx.id.to_string(),
            &tx.date,
            &tx.description,
            &tx.installment,
            &tx.value,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &ParseResponse) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transactions: {}\n", response.count));

    for tx in &response.transactions {
        let date = if tx.date.is_empty() { "-" } else { tx.date.as_str() };
        output.push_str(&format!("  {:<10} {}", date, tx.description));
        if !tx.installment.is_empty() {
            output.push_str(&format!(" ({})", tx.installment));
        }
        output.push_str(&format!("  {}\n", tx.value));
    }

    output.push_str(&format!("Total: {}\n", response.total()));

    output
}
