//! Inspect command - decrypt and parse a single pay stub without renaming it.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use netpay_core::rename::paystub_file_name;
use netpay_core::{BatchProcessor, LopdfDecryptor, LopdfTextExtractor, Paystub};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Encrypted pay stub to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Inspection {
    source: PathBuf,
    #[serde(flatten)]
    paystub: Paystub,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let config = super::load_config(config_path)?;
    let temp_dir = super::temp_dir(&config)?;

    info!("Inspecting {}", args.input.display());

    let processor = BatchProcessor::new(
        &config,
        temp_dir,
        LopdfDecryptor::new(),
        LopdfTextExtractor::new(),
    );
    let input = args.input.clone();
    let parsed = tokio::task::spawn_blocking(move || processor.inspect(&input)).await??;

    let inspection = Inspection {
        source: args.input,
        file_name: parsed.paystub.cheque_date.as_ref().map(paystub_file_name),
        paystub: parsed.paystub,
        missing: parsed.missing.iter().map(ToString::to_string).collect(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inspection)?),
        OutputFormat::Text => println!("{}", format_text(&inspection)),
    }

    Ok(())
}

fn format_text(inspection: &Inspection) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pay stub: {}\n", inspection.source.display()));

    match inspection.paystub.net_pay {
        Some(amount) => output.push_str(&format!("  Net pay:     {:.2}\n", amount)),
        None => output.push_str("  Net pay:     -\n"),
    }

    match &inspection.paystub.cheque_date {
        Some(date) => {
            let calendar = date
                .to_naive_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "not a calendar date".to_string());
            output.push_str(&format!("  Cheque date: {} ({})\n", date, calendar));
        }
        None => output.push_str("  Cheque date: -\n"),
    }

    if let Some(name) = &inspection.file_name {
        output.push_str(&format!("  Would rename to: {}\n", name));
    }

    for missing in &inspection.missing {
        output.push_str(&format!("{} {}\n", style("!").yellow(), missing));
    }

    output
}
