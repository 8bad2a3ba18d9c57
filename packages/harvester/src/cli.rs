//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    audit_url, benchmark_slug, validate_benchmark, ParseOptions, DEFAULT_BENCHMARK,
    DEFAULT_MAX_RESPONSE_SIZE,
};
use crate::error::{HarvesterError, Result};
use crate::harvester::{download_audit, read_audit};
use crate::output::{save_records, OutputFormat};
use crate::types::{AuditReport, ReferenceLayout};

/// Audit Harvester - Convert Tenable compliance .audit files into CSV, YAML or XLSX.
#[derive(Parser)]
#[command(name = "audit-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download an audit file from Tenable and convert it.
    Download {
        /// Benchmark name as used by the Tenable audit API
        #[arg(default_value = DEFAULT_BENCHMARK)]
        benchmark: String,

        /// Download from this URL instead of the Tenable audit API
        #[arg(long)]
        url: Option<String>,

        /// Layout of the NIST column
        #[arg(short, long, value_enum, default_value_t = LayoutArg::Joined)]
        layout: LayoutArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also keep the downloaded .audit file at this path
        #[arg(long)]
        save_audit: Option<PathBuf>,

        /// Maximum response size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_SIZE)]
        max_size: u64,
    },

    /// Convert a local .audit file.
    Convert {
        /// Path to the .audit file
        input: PathBuf,

        /// Layout of the NIST column
        #[arg(short, long, value_enum, default_value_t = LayoutArg::Joined)]
        layout: LayoutArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Output file (default: input path with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// NIST column layout as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Comma-separated on one line
    Joined,
    /// One reference per line
    Lines,
}

impl From<LayoutArg> for ReferenceLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Joined => Self::Joined,
            LayoutArg::Lines => Self::PerLine,
        }
    }
}

/// Output format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Yaml,
    Xlsx,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Xlsx => Self::Xlsx,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            benchmark,
            url,
            layout,
            format,
            output,
            save_audit,
            max_size,
        } => download_command(
            &benchmark,
            url.as_deref(),
            &ParseOptions::new().with_layout(layout.into()),
            format.into(),
            output.as_deref(),
            save_audit.as_deref(),
            max_size,
        ),
        Commands::Convert {
            input,
            layout,
            format,
            output,
        } => convert_command(
            &input,
            &ParseOptions::new().with_layout(layout.into()),
            format.into(),
            output.as_deref(),
        ),
    }
}

/// Execute the download command.
fn download_command(
    benchmark: &str,
    url: Option<&str>,
    options: &ParseOptions,
    format: OutputFormat,
    output: Option<&Path>,
    save_audit: Option<&Path>,
    max_size: u64,
) -> Result<()> {
    // Validate inputs before making HTTP requests
    validate_benchmark(benchmark)?;
    let url = url.map(String::from).unwrap_or_else(|| audit_url(benchmark));

    // Validate output directory exists (if specified) before downloading
    if let Some(output_dir) = output {
        if !output_dir.is_dir() {
            return Err(HarvesterError::InvalidOutputPath(format!(
                "Output directory does not exist: {}",
                output_dir.display()
            )));
        }
    }
    let output_path = output
        .unwrap_or(Path::new(""))
        .join(format!("{}.{}", benchmark_slug(benchmark), format.extension()));

    println!("{} {}", style("Downloading").bold(), style(benchmark).cyan());
    println!("  From: {url}");
    println!();

    let pb = spinner();
    pb.set_message("Downloading audit file...");

    let (text, report) = match download_audit(&url, max_size, options) {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    if let Some(audit_path) = save_audit {
        pb.set_message("Saving audit file...");
        if let Err(e) = std::fs::write(audit_path, text.as_bytes()) {
            pb.finish_and_clear();
            return Err(e.into());
        }
    }

    finish(&pb, &report, format, &output_path)?;

    if let Some(audit_path) = save_audit {
        println!("{} {}", style("Audit file:").green().bold(), audit_path.display());
    }

    Ok(())
}

/// Execute the convert command.
fn convert_command(
    input: &Path,
    options: &ParseOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(format.extension()));
    if output_path == input {
        return Err(HarvesterError::InvalidOutputPath(format!(
            "Output would overwrite the input file: {}",
            input.display()
        )));
    }

    println!("{} {}", style("Converting").bold(), style(input.display()).cyan());
    println!();

    let pb = spinner();
    pb.set_message("Parsing audit file...");

    let report = match read_audit(input, options) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    finish(&pb, &report, format, &output_path)
}

/// Print the summary, save the records and stop the spinner.
fn finish(pb: &ProgressBar, report: &AuditReport, format: OutputFormat, path: &Path) -> Result<()> {
    println!("  Records: {}", report.records.len());
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", style(report.warnings.len()).yellow().bold());
    }

    pb.set_message(format!("Saving {}...", format.extension().to_uppercase()));
    let saved = save_records(&report.records, format, path);
    pb.finish_and_clear();
    saved?;

    println!();
    println!("{} {}", style("Saved to:").green().bold(), path.display());
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
