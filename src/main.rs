//! summarize - one-line summaries of analytics beacons in a capture
//!
//! Reads an Adobe Assurance (`.json`) or Charles Proxy (`.chlsj`) export,
//! detects which one it is, and prints one line per analytics event.
//!
//! Usage:
//!   summarize capture.chlsj
//!   summarize assurance.json --max-events 20 --debug
//!   summarize capture.chlsj --config config/local.toml --output report.txt
//!
//! Exit codes: 0 on success, 1 when the capture is unreadable or not a
//! recognized export, 2 when the report cannot be written.

use anyhow::Context;
use beacon_summary::infra::logging::{self, LogFormat};
use beacon_summary::infra::Config;
use beacon_summary::io::{render_event_dump, write_report_file, write_terminated};
use beacon_summary::services::{Pipeline, Report};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Summarize analytics beacons captured by Adobe Assurance or Charles Proxy
#[derive(Parser, Debug)]
#[command(
    name = "summarize",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Args {
    /// Capture export to summarize
    input: PathBuf,

    /// Stop after this many events (0 for no limit)
    #[arg(short = 'n', long)]
    max_events: Option<usize>,

    /// Log per-event context data while extracting
    #[arg(short, long)]
    debug: bool,

    /// Path to TOML configuration file
    ///
    /// Falls back to the SUMMARIZE_CONFIG environment variable, then to
    /// built-in defaults.
    #[arg(short, long)]
    config: Option<String>,

    /// Analytics host to match (overrides config)
    #[arg(long)]
    target_host: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print each extracted event as labelled JSON before the report
    #[arg(long)]
    dump_events: bool,

    /// Do not print the detected format
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Config file (if any) with command line overrides applied
    ///
    /// A config file that fails to load is reported back alongside the
    /// defaults, since logging is not initialized yet.
    fn resolve_config(&self) -> (Config, Option<anyhow::Error>) {
        let (mut config, load_error) = match Config::resolve_config_path(self.config.as_deref()) {
            Some(path) => match Config::from_file(&path) {
                Ok(config) => (config, None),
                Err(e) => (Config::default(), Some(e)),
            },
            None => (Config::default(), None),
        };

        if let Some(max_events) = self.max_events {
            config = config.with_max_events(max_events);
        }
        if self.debug {
            config = config.with_debug(true);
        }
        if let Some(host) = &self.target_host {
            config = config.with_target_host(host.as_str());
        }
        (config, load_error)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, load_error) = args.resolve_config();

    let log_format = if args.log_json { LogFormat::Json } else { LogFormat::Text };
    logging::init(config.debug(), log_format);

    if let Some(e) = load_error {
        warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
    }

    info!(
        input = %args.input.display(),
        config_file = %config.config_file(),
        target_host = %config.target_host(),
        edge_bridge_event_name = %config.edge_bridge_event_name(),
        max_events = ?config.max_events(),
        debug = config.debug(),
        "config_loaded"
    );

    let pipeline = Pipeline::new(config);
    let report = match pipeline.summarize_file(&args.input) {
        Ok(report) => report,
        Err(e) => {
            debug!(input = %args.input.display(), error = %e, "summarize_failed");
            eprintln!("error: file detection failed: {}", e);
            return ExitCode::from(1);
        }
    };

    if !args.quiet {
        eprintln!("Detected file type: {}", report.format());
    }

    match emit(&args, &report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Print the optional event dump and the report
fn emit(args: &Args, report: &Report) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.dump_events {
        write_terminated(&mut out, &render_event_dump(report.batch()))
            .context("Failed to write event dump")?;
    }

    let text = report.to_text();
    match &args.output {
        Some(path) => write_report_file(path, &text)
            .with_context(|| format!("Failed to write report {}", path.display()))?,
        None => write_terminated(&mut out, &text).context("Failed to write report")?,
    }

    out.flush().context("Failed to flush stdout")
}
