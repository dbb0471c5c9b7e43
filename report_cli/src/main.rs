//! # Siteledger Report CLI
//!
//! Renders a project snapshot (JSON exported by the tracker) to a PDF
//! report, or to the laid-out page model as JSON for inspection.
//!
//! ```text
//! report_cli clinic.json -o clinic.pdf --locale fr-mr
//! report_cli clinic.json --kind materials
//! report_cli clinic.json --format layout-json
//! ```
//!
//! Errors are printed both as text and as the structured JSON form of
//! `ReportError`; the exit status is non-zero on failure.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;

use report_core::assembler::{ReportConfig, ReportGenerator, ReportKind};
use report_core::errors::{ReportError, ReportResult};
use report_core::file_io::{load_config, load_snapshot, save_report};
use report_core::format::LocaleId;
use report_core::stream::LayoutJsonEncoder;

#[derive(Parser, Debug)]
#[command(version, about = "Render a project snapshot to a report", long_about = None)]
struct Args {
    /// Project snapshot (JSON)
    snapshot: PathBuf,

    /// Output path; defaults to the snapshot path with the format's extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report to produce
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Locale for numbers, money and dates (en-us, fr-mr)
    #[arg(long)]
    locale: Option<String>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout_secs: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
    format: OutputFormat,

    /// JSON report configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Project,
    Materials,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Project => ReportKind::Project,
            KindArg::Materials => ReportKind::MaterialsList,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pdf,
    LayoutJson,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::LayoutJson => "layout.json",
        }
    }
}

fn build_config(args: &Args) -> ReportResult<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    if let Some(kind) = args.kind {
        config.kind = kind.into();
    }
    if let Some(tag) = &args.locale {
        config.locale = LocaleId::parse(tag)
            .ok_or_else(|| ReportError::invalid_input("locale", tag.as_str(), "expected en-us or fr-mr"))?;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    Ok(config)
}

async fn run(args: Args) -> ReportResult<PathBuf> {
    let config = build_config(&args)?;
    let snapshot = load_snapshot(&args.snapshot)?;
    info!(
        "loaded snapshot {} (schema {}, {} materials)",
        args.snapshot.display(),
        snapshot.version,
        snapshot.materials.len()
    );

    let mut generator = ReportGenerator::new(config)?;
    if args.format == OutputFormat::LayoutJson {
        generator = generator.with_encoder(LayoutJsonEncoder);
    }
    let bytes = generator.generate(snapshot.project.as_ref(), &snapshot.materials).await?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.snapshot.with_extension(args.format.extension()));
    save_report(&bytes, &output)?;
    Ok(output)
}

/// Drive `future` on a fresh runtime, then drop the runtime without waiting
/// on blocking workers still running (an encode abandoned after a timeout).
fn block_on_detached<F: Future>(future: F) -> ReportResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ReportError::stream_failure(format!("failed to start runtime: {e}")))?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("report_core=info,report_cli=info"))
        .init();

    let args = Args::parse();
    match block_on_detached(run(args)).and_then(|result| result) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
