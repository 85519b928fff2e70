//! Mousewatch CLI
//!
//! Background sensor that flags pointer-movement patterns consistent with
//! automated (non-human) control.

use clap::{Parser, Subcommand};
use mousewatch::{
    collector::{check_permission, Collector, CollectorConfig},
    config::Config,
    core::MovementTracker,
    stats::create_shared_stats_with_persistence,
    VERSION,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mousewatch")]
#[command(version = VERSION)]
#[command(about = "Pointer-movement anomaly sensor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start watching pointer movement
    Start {
        /// Cursor polling interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Where to write the suspicious-pattern report at shutdown
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show current status and cumulative statistics
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            interval_ms,
            output,
        } => {
            cmd_start(interval_ms, output);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_start(interval_ms: Option<u64>, output: Option<PathBuf>) {
    println!("Mousewatch v{VERSION}");
    println!();

    if !check_permission() {
        eprintln!("Error: cannot read the cursor position on this system.");
        eprintln!("Check that the process runs inside an active desktop session.");
        std::process::exit(1);
    }

    // Load configuration, then apply CLI overrides
    let mut config = Config::load().unwrap_or_default();
    if let Some(ms) = interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(path) = output {
        config.report_path = path;
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    println!("Starting movement analysis...");
    println!("  Poll interval: {}ms", config.poll_interval_ms);
    println!(
        "  Periodic target: {}s (\u{00b1}{}s)",
        config.periodic_threshold_secs, config.periodic_tolerance_secs
    );
    println!(
        "  Continuous-movement threshold: {}s",
        config.continuous_movement_threshold_secs
    );
    println!("  Minimum movement distance: {}", config.min_movement_distance);
    println!("  History capacity: {}", config.history_capacity);
    println!("  Report path: {:?}", config.report_path);
    println!();
    println!("Press Ctrl+C to stop and save results");
    println!();

    // Set up session stats
    let stats = create_shared_stats_with_persistence(config.data_path.join("stats.json"));

    // Create collector and tracker
    let mut collector = Collector::new(CollectorConfig {
        poll_interval: Duration::from_millis(config.poll_interval_ms),
    });
    let mut tracker = MovementTracker::with_stats(&config, stats.clone());
    println!("Session ID: {}", tracker.session_id());

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc_handler(r);

    if let Err(e) = collector.start() {
        eprintln!("Error starting collector: {e}");
        std::process::exit(1);
    }

    // Main sampling loop
    let receiver = collector.receiver().clone();

    while running.load(Ordering::SeqCst) {
        // Receive with timeout so the Ctrl+C flag is observed promptly
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(sample) => {
                tracker.on_sample_at(sample.x, sample.y, sample.timestamp);
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Collector disconnected unexpectedly");
                break;
            }
        }
    }

    // Stop collection and flush
    println!();
    println!("Shutting down and saving results...");
    collector.stop();

    let report = tracker.shutdown();
    match report.write_to(&config.report_path) {
        Ok(()) => {
            println!(
                "Results saved to {:?} ({} pattern(s), {:.1}s runtime)",
                config.report_path,
                report.patterns.len(),
                report.total_runtime
            );
        }
        Err(e) => {
            eprintln!("Error writing report: {e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = stats.save() {
        eprintln!("Warning: Could not save session stats: {e}");
    }

    println!();
    println!("{}", stats.summary());
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Mousewatch Status");
    println!("=================");
    println!();

    let has_permission = check_permission();
    println!(
        "Cursor access: {}",
        if has_permission {
            "available"
        } else {
            "unavailable"
        }
    );
    println!();

    println!("Configuration:");
    println!("  Poll interval: {}ms", config.poll_interval_ms);
    println!(
        "  Periodic target: {}s (\u{00b1}{}s)",
        config.periodic_threshold_secs, config.periodic_tolerance_secs
    );
    println!(
        "  Continuous-movement threshold: {}s",
        config.continuous_movement_threshold_secs
    );
    println!("  Report path: {:?}", config.report_path);
    println!();

    // Load and show cumulative stats if available
    let stats_path = config.data_path.join("stats.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(samples) = stats.get("samples_observed") {
                    println!("  Samples observed: {samples}");
                }
                if let Some(admitted) = stats.get("events_admitted") {
                    println!("  Movement events admitted: {admitted}");
                }
                if let Some(patterns) = stats.get("patterns_detected") {
                    println!("  Suspicious patterns detected: {patterns}");
                }
            }
        }
    } else {
        println!("No previous session data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}
