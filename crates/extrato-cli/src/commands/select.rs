//! Select command - pick words out of a page text map and extract them.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use extrato_core::{
    ParseRequest, ParseResponse, Region, ScreenRect, TextMapSource, TransactionAssembler,
    WordSource,
};

use super::{checked_tolerance, load_config};
use super::parse::{emit, OutputFormat};

/// Arguments for the select command.
#[derive(Args)]
pub struct SelectArgs {
    /// Text map produced by the word extractor
    #[arg(required = true)]
    input: PathBuf,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Region in page units: x0,top,x1,bottom (default: whole page)
    #[arg(short, long, conflicts_with = "screen")]
    region: Option<String>,

    /// Rectangle drawn on the displayed page image: x,y,width,height
    #[arg(long)]
    screen: Option<String>,

    /// On-screen position of the page image's top-left corner: x,y
    #[arg(long, default_value = "0,0")]
    origin: String,

    /// Width the page image was displayed at (screen units)
    #[arg(long, requires = "screen")]
    display_width: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Override the vertical tolerance
    #[arg(short, long)]
    tolerance: Option<f64>,
}

pub async fn run(args: SelectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let tolerance = checked_tolerance(args.tolerance)?;

    let source = TextMapSource::from_path(&args.input)?;
    let page = source.page_words(args.page)?;

    info!(
        "Page {} of {}: {} words",
        page.page,
        source.page_count(),
        page.words.len()
    );

    let words = if let Some(region) = &args.region {
        let region: Region = region.parse()?;
        page.select(&region)
    } else if let Some(screen) = &args.screen {
        let rect = parse_screen_rect(screen)?;
        if !rect.is_selection(config.selection.min_box_size) {
            warn!(
                "Selection {}x{} is not larger than {}, ignoring",
                rect.width, rect.height, config.selection.min_box_size
            );
            eprintln!("{} Selection too small, nothing extracted", style("ℹ").blue());
            return emit(&ParseResponse::empty(), args.format, args.output.as_ref());
        }

        let origin = parse_numbers(&args.origin, 2, "origin")?;
        let scale = match args.display_width {
            Some(width) => page.display_scale(width),
            None => 1.0,
        };

        let region = Region::from_screen(&rect, (origin[0], origin[1]), scale)?;
        page.select(&region)
    } else {
        page.words.clone()
    };

    let request = ParseRequest {
        words,
        vertical_tolerance: tolerance,
    };

    let response = if request.words.is_empty() {
        ParseResponse::empty()
    } else {
        TransactionAssembler::from_config(&config).process(&request)
    };

    emit(&response, args.format, args.output.as_ref())
}

fn parse_screen_rect(s: &str) -> anyhow::Result<ScreenRect> {
    let v = parse_numbers(s, 4, "screen")?;
    Ok(ScreenRect {
        x: v[0],
        y: v[1],
        width: v[2],
        height: v[3],
    })
}

fn parse_numbers(s: &str, count: usize, name: &str) -> anyhow::Result<Vec<f64>> {
    let values = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid --{} `{}`: {}", name, s, e))?;

    if values.len() != count {
        anyhow::bail!("--{} expects {} comma-separated numbers, got `{}`", name, count, s);
    }

    Ok(values)
}
