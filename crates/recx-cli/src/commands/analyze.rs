//! Analyze command - extract fields from a single receipt's OCR text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use recx_core::{AnalysisReport, ExtractionResult, ReceiptAnalyzer};

use super::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// OCR text file, or "-" to read standard input
    #[arg(default_value = "-")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip item name extraction
    #[arg(long)]
    no_items: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Show which lines the fields came from
    #[arg(long)]
    explain: bool,
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
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_items {
        config.extraction.extract_items = false;
    }
    let analyzer = ReceiptAnalyzer::with_config(&config.extraction)?;

    let text = read_input(&args.input).await?;
    info!("Analyzing {} bytes of OCR text", text.len());

    let report = analyzer.analyze_with_report(&text);

    if args.explain {
        print_explanation(&report);
    }

    let output = format_result(&args.input, &report.result, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(tokio::fs::read_to_string(&path).await?)
}

fn print_explanation(report: &AnalysisReport) {
    eprintln!("{} {} lines", style("ℹ").blue(), report.line_count);

    match &report.date_source {
        Some(source) => eprintln!(
            "{} date from line {} ({:?} pass, {:?} tier): {}",
            style("ℹ").blue(),
            source.source.line + 1,
            source.pass,
            source.tier,
            source.source.text
        ),
        None => eprintln!("{} no date found", style("ℹ").blue()),
    }

    match &report.total_source {
        Some(source) => eprintln!(
            "{} total from line {}: {}",
            style("ℹ").blue(),
            source.line + 1,
            source.text
        ),
        None => eprintln!("{} no total found", style("ℹ").blue()),
    }

    for warning in &report.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

/// Render one result in the requested format.
pub fn format_result(
    label: &str,
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(&[(label, result)]),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Render results as CSV, one row per input.
pub fn format_csv(rows: &[(&str, &ExtractionResult)]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["file", "date", "calendar_date", "total_amount", "items"])?;

    for (label, result) in rows {
        wtr.write_record([
            label.to_string(),
            result.date.clone().unwrap_or_default(),
            result.calendar_date().map(|d| d.to_string()).unwrap_or_default(),
            result.total_amount.map(|a| a.to_string()).unwrap_or_default(),
            result.items().join("|"),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Render a result as a short human-readable summary.
pub fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    match (&result.date, result.calendar_date()) {
        (Some(date), Some(calendar)) => output.push_str(&format!("Date:  {} ({})\n", date, calendar)),
        (Some(date), None) => output.push_str(&format!("Date:  {}\n", date)),
        (None, _) => output.push_str("Date:  -\n"),
    }

    match result.total_amount {
        Some(total) => output.push_str(&format!("Total: {}\n", total)),
        None => output.push_str("Total: -\n"),
    }

    if let Some(items) = &result.items {
        output.push_str(&format!("Items: {}\n", items.len()));
        for item in items {
            output.push_str(&format!("  - {}\n", item));
        }
    }

    output
}
