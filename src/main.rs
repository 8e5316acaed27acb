// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use toast_queue::config;
use toast_queue::diagnostics::{generate_default_filename, DiagnosticsCollector};
use toast_queue::domain::notification::{AutoDismiss, Variant};
use toast_queue::notifications::{global, ShowRequest, TimerDriver, TokioClock};
use toast_queue::render::{format_state, StyleTable};

const HELP: &str = "\
toast_queue demo

Shows a few notifications on the global queue and prints every change
until the queue is empty.

USAGE:
  toast_queue [OPTIONS]

OPTIONS:
  --config <path>     Read settings from this file instead of the default location
  --count <n>         Number of notifications to show [default: 3]
  --duration <ms>     Auto-dismiss delay for every notification [default: from config]
  --export <path>     Write the diagnostics report to this JSON file, or into
                      this directory under a timestamped name
  -h, --help          Print this help
";

/// Pause between two demo notifications.
const SHOW_INTERVAL: Duration = Duration::from_millis(250);
/// Poll interval while waiting for the queue to drain.
const DRAIN_POLL: Duration = Duration::from_millis(100);

struct Flags {
    config: Option<PathBuf>,
    count: usize,
    duration_ms: Option<u64>,
    export: Option<PathBuf>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config: args.opt_value_from_str("--config")?,
        count: args.opt_value_from_str("--count")?.unwrap_or(3),
        duration_ms: args.opt_value_from_str("--duration")?,
        export: args.opt_value_from_str("--export")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("[WARN] Ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(flags))
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("[ERROR] {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    match run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(flags: Flags) -> toast_queue::error::Result<()> {
    let config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let mut collector = DiagnosticsCollector::new(config.diagnostics_capacity());
    global::init_with_clock(config.manager_settings(), TokioClock);
    global::set_diagnostics(collector.handle());

    let table = StyleTable::default();
    let subscription = global::subscribe(move |state| {
        println!("{}\n", format_state(state, &table));
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(drive(&mut collector, flags.count, flags.duration_ms));
    subscription.unsubscribe();

    collector.process_pending();
    if let Some(mut path) = flags.export {
        if path.is_dir() {
            path.push(generate_default_filename());
        }
        let written = collector.export_to_file(&path)?;
        println!("Diagnostics report written to {}", written.display());
    }
    Ok(())
}

async fn drive(collector: &mut DiagnosticsCollector, count: usize, duration_ms: Option<u64>) {
    let driver = TimerDriver::install();

    let scenario = async {
        for index in 0..count {
            let mut request = ShowRequest::with_variant(
                demo_variant(index),
                format!("Notification {}", index + 1),
            );
            if let Some(ms) = duration_ms {
                request.duration = Some(AutoDismiss::from_millis(ms));
            }
            global::show(request);
            tokio::time::sleep(SHOW_INTERVAL).await;
            collector.process_pending();
        }

        while !global::snapshot().is_empty() {
            // Only persistent notifications left: nothing would ever remove them.
            if global::next_deadline().is_none() {
                global::dismiss(None);
            }
            tokio::time::sleep(DRAIN_POLL).await;
            collector.process_pending();
        }
        driver.shutdown();
    };

    tokio::join!(driver.run(), scenario);
}

fn demo_variant(index: usize) -> Variant {
    match index % 5 {
        0 => Variant::Default,
        1 => Variant::Success,
        2 => Variant::Destructive,
        3 => Variant::Info,
        _ => Variant::Warning,
    }
}
