//! Run command - process every pay stub in the origin directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use netpay_core::{
    BatchProcessor, BatchReport, FailurePolicy, LopdfDecryptor, LopdfTextExtractor, RenameOutcome,
};

/// Arguments for the run command.
#[derive(Args)]
pub struct BatchArgs {
    /// Abort the whole batch on the first failing document
    #[arg(long)]
    strict: bool,

    /// Fail a document when its net pay or cheque date is missing
    #[arg(long)]
    require_fields: bool,

    /// Also write a CSV summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    if !args.json {
        println!("Extracting Net Pay, Please wait....");
    }

    let config = super::load_config(config_path)?;
    let temp_dir = super::temp_dir(&config)?;

    let policy = if args.strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::ContinueOnError
    };
    let processor = BatchProcessor::new(
        &config,
        temp_dir,
        LopdfDecryptor::new(),
        LopdfTextExtractor::new(),
    )
    .with_failure_policy(policy)
    .with_required_fields(args.require_fields);

    let files = processor.list_documents()?;
    if !args.json {
        println!("{} Found {} files to process", style("ℹ").blue(), files.len());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let report = {
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || processor.run_documents(files, |_| pb.inc(1))).await??
    };
    pb.finish_and_clear();

    if let Some(path) = &args.summary {
        write_summary(path, &report)?;
        debug!("Summary written to {}", path.display());
    }

    debug!("Batch finished in {:?}", start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        if let Some(path) = &args.summary {
            println!("{} Summary written to {}", style("✓").green(), path.display());
        }
        println!("{}", report.total);
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    let failed: Vec<_> = report.failed().collect();

    println!();
    println!(
        "{} Processed {} files",
        style("✓").green(),
        report.outcomes.len()
    );
    println!(
        "   {} successful, {} failed",
        style(report.processed_count).green(),
        style(failed.len()).red()
    );

    for outcome in &report.outcomes {
        if let Some(RenameOutcome::Renamed(path)) = &outcome.rename {
            println!("  {} -> {}", file_name(&outcome.source), path.display());
        }
        for warning in &outcome.warnings {
            println!("  {} {}: {}", style("!").yellow(), file_name(&outcome.source), warning);
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.source.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    println!();
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "net_pay",
        "cheque_date",
        "renamed_to",
        "warnings",
        "error",
        "processing_time_ms",
    ])?;

    for outcome in &report.outcomes {
        let paystub = outcome.paystub.clone().unwrap_or_default();
        let status = match (&outcome.error, &outcome.rename) {
            (Some(_), _) => "error",
            (None, Some(RenameOutcome::SkippedExisting(_))) => "skipped",
            (None, Some(RenameOutcome::Renamed(_))) => "success",
            (None, None) => "not_renamed",
        };
        let renamed_to = match &outcome.rename {
            Some(RenameOutcome::Renamed(p)) => p.display().to_string(),
            _ => String::new(),
        };

        wtr.write_record([
            file_name(&outcome.source).as_str(),
            status,
            &paystub.net_pay.map(|d| format!("{:.2}", d)).unwrap_or_default(),
            &paystub.cheque_date.map(|d| d.to_string()).unwrap_or_default(),
            &renamed_to,
            &outcome.warnings.join("; "),
            outcome.error.as_deref().unwrap_or(""),
            &outcome.processing_time_ms.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
