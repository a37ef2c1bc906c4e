use clap::Parser;
use std::path::PathBuf;
use std::process;

use chrono::Utc;
use loadreport_cli::{ingest, load_thresholds, render};
use loadreport_common::LoadReportError;
use loadreport_engine::analyze;

/// The analysis could not be produced.
const EXIT_ANALYSIS_FAILED: i32 = 1;
/// The analysis succeeded but an artifact could not be written.
const EXIT_WRITE_FAILED: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "loadreport", about = "Analyze a JMeter JTL log and write a performance report")]
struct Args {
    /// JTL results file (CSV with a header row).
    jtl: PathBuf,

    /// Where to write the HTML report.
    output: PathBuf,

    /// Also write the full analysis as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON file overriding any of the recommendation thresholds.
    #[arg(long)]
    thresholds: Option<PathBuf>,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("loadreport_engine=info,loadreport_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let thresholds = load_thresholds(args.thresholds.as_deref()).unwrap_or_else(|e| fail(e));
    let samples = ingest::read_jtl(&args.jtl).unwrap_or_else(|e| fail(e));
    let result = analyze(&samples, &thresholds).unwrap_or_else(|e| fail(e));

    print!("{}", render::console_summary(&result));

    let mut write_failed = false;
    if let Err(e) = render::write_html(&result, &thresholds, &args.output, Utc::now()) {
        eprintln!("{e}");
        write_failed = true;
    }
    if let Some(json_path) = &args.json {
        if let Err(e) = render::write_json(&result, json_path) {
            eprintln!("{e}");
            write_failed = true;
        }
    }

    if write_failed {
        process::exit(EXIT_WRITE_FAILED);
    }
    println!("Report written to {}", args.output.display());
}

fn fail(e: LoadReportError) -> ! {
    eprintln!("Analysis failed: {e}");
    process::exit(EXIT_ANALYSIS_FAILED);
}
