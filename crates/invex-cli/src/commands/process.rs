//! Process command - extract fields from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use invex_core::{
    DocumentText, ExtractionConfig, ExtractionResult, InvoicePipeline, LayoutProfile, ResultMapping,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or .txt with already extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Comma-separated names of additional fields to extract
    #[arg(short, long)]
    extra_fields: Option<String>,

    /// Layout profile (tabular or labeled)
    #[arg(short, long)]
    profile: Option<LayoutProfile>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show how many fields were found and how long it took
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object
    Json,
    /// CSV with a header row
    Csv,
    /// One `name: value` line per field
    Text,
}

impl OutputFormat {
    /// File extension used for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?.extraction;
    if let Some(profile) = args.profile {
        config.profile = profile;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Extracting fields ({} profile)...", config.profile));

    let result = extract_file(&args.input, args.extra_fields.as_deref(), &config)?;

    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_fields(&result.fields, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.stats {
        eprintln!(
            "{} Found {}/{} fields in {}ms",
            style("ℹ").blue(),
            result.fields.found_count(),
            result.fields.len(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Extract fields from one file, choosing the input path by extension.
pub fn extract_file(
    path: &Path,
    extra_fields: Option<&str>,
    config: &ExtractionConfig,
) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let pipeline = InvoicePipeline::from_config(config);

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let result = pipeline.process(&data, extra_fields)?;
            if result.fields.found_count() == 0 {
                warn!("No fields found in {}", path.display());
            }
            Ok(result)
        }
        "txt" => {
            let text = DocumentText::from_text(fs::read_to_string(path)?);
            Ok(pipeline.process_text(&text, extra_fields))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Render a result mapping in the requested format.
pub fn format_fields(fields: &ResultMapping, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &ResultMapping) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(fields.keys())?;
    wtr.write_record(fields.iter().map(|(_, value)| value.as_str()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &ResultMapping) -> String {
    let width = fields.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut output = String::new();
    for (name, value) in fields.iter() {
        let label = format!("{}:", name);
        output.push_str(&format!("{:<width$}  {}\n", label, value.as_str(), width = width + 1));
    }
    output
}
