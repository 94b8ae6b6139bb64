//! Batch command - analyze many OCR text files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use recx_core::{ExtractionResult, ReceiptAnalyzer};

use super::analyze::{format_csv, format_result, OutputFormat};
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching OCR text files (e.g. "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files analyzed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip item name extraction
    #[arg(long)]
    no_items: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_items {
        config.extraction.extract_items = false;
    }
    let analyzer = Arc::new(ReceiptAnalyzer::with_config(&config.extraction)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to analyze",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    // The analyzer is stateless, so each chunk runs its files in parallel.
    for chunk in files.chunks(args.jobs.max(1)) {
        let handles: Vec<_> = chunk
            .iter()
            .cloned()
            .map(|path| {
                let analyzer = Arc::clone(&analyzer);
                tokio::task::spawn_blocking(move || {
                    let outcome = analyze_file(&path, &analyzer);
                    (path, outcome)
                })
            })
            .collect();

        for handle in handles {
            let (path, outcome) = handle.await?;
            match outcome {
                Ok(result) => results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                }),
                Err(e) => {
                    let error_msg = e.to_string();
                    if args.continue_on_error {
                        warn!("Failed to analyze {}: {}", path.display(), error_msg);
                        results.push(FileResult {
                            path,
                            result: None,
                            error: Some(error_msg),
                        });
                    } else {
                        error!("Failed to analyze {}: {}", path.display(), error_msg);
                        anyhow::bail!("Processing failed: {}", error_msg);
                    }
                }
            }
            pb.inc(1);
        }
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        let mut used_names = HashSet::new();
        for entry in &results {
            let Some(result) = &entry.result else {
                continue;
            };
            let label = entry.path.display().to_string();
            let name = unique_output_name(file_stem(&entry.path), &mut used_names);
            if name != file_stem(&entry.path) {
                warn!(
                    "Output name for {} already taken, writing {}.{} instead",
                    entry.path.display(),
                    name,
                    args.format.extension()
                );
            }
            let output_path = output_dir.join(format!("{}.{}", name, args.format.extension()));
            fs::write(&output_path, format_result(&label, result, args.format, true)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));
        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let with_date = successful.iter().filter(|r| r.result.as_ref().is_some_and(|x| x.date.is_some())).count();
    let with_total = successful
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(|x| x.total_amount.is_some()))
        .count();

    if args.output_dir.is_none() && !args.summary {
        let rows: Vec<(String, &ExtractionResult)> = successful
            .iter()
            .filter_map(|r| r.result.as_ref().map(|x| (r.path.display().to_string(), x)))
            .collect();
        let rows: Vec<(&str, &ExtractionResult)> = rows.iter().map(|(l, x)| (l.as_str(), *x)).collect();
        print!("{}", format_csv(&rows)?);
    }

    eprintln!();
    eprintln!(
        "{} Analyzed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful ({} with date, {} with total), {} failed",
        style(successful.len()).green(),
        with_date,
        with_total,
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for entry in &failed {
            eprintln!(
                "  - {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn analyze_file(path: &Path, analyzer: &ReceiptAnalyzer) -> anyhow::Result<ExtractionResult> {
    let text = fs::read_to_string(path)?;
    Ok(analyzer.analyze(&text))
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("receipt")
}

/// Pick an output name not used yet in this run: `x`, then `x-2`, `x-3`, ...
fn unique_output_name(stem: &str, used: &mut HashSet<String>) -> String {
    let mut name = stem.to_string();
    let mut counter = 2;
    while !used.insert(name.clone()) {
        name = format!("{}-{}", stem, counter);
        counter += 1;
    }
    name
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "date", "calendar_date", "total_amount", "item_count", "error"])?;

    for entry in results {
        let file = entry.path.display().to_string();
        match &entry.result {
            Some(result) => wtr.write_record([
                file,
                "ok".to_string(),
                result.date.clone().unwrap_or_default(),
                result.calendar_date().map(|d| d.to_string()).unwrap_or_default(),
                result.total_amount.map(|a| a.to_string()).unwrap_or_default(),
                result.items().len().to_string(),
                String::new(),
            ])?,
            None => wtr.write_record([
                file,
                "error".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                entry.error.clone().unwrap_or_default(),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
