//! Demonstration of the mousewatch analysis engine.
//!
//! This demo replays two synthetic pointer traces through the tracker
//! instead of capturing live input:
//!
//! 1. A mechanical jiggler that nudges the cursor every 30 seconds
//! 2. A slow sweep that keeps the cursor moving for over five minutes
//!
//! Run with: cargo run --example replay_demo

use chrono::{Duration, Utc};
use mousewatch::{Config, MovementTracker, PatternCategory};

fn main() {
    let config = Config::default();
    let mut tracker = MovementTracker::new(&config);
    let base = Utc::now();
    let at = |secs: f64| base + Duration::milliseconds((secs * 1000.0) as i64);

    println!("Replaying a 30-second jiggler trace...");

    // Nudge back and forth between two corners every ~30s. The spacing
    // wobbles a little, like a cheap timer, but stays inside tolerance.
    let corners = [(100.0, 100.0), (100.0, 140.0), (140.0, 140.0), (140.0, 100.0)];
    let mut t = 0.0;
    for step in 0..8 {
        let (x, y) = corners[step % corners.len()];
        tracker.on_sample_at(x, y, at(t));
        t += 30.0 + 0.05 * (step % 3) as f64;
    }

    println!();
    println!("Replaying a sustained slow sweep...");

    // Resume after the jiggler trace: march right for 320 seconds.
    for step in 0..20 {
        let x = 200.0 + 10.0 * step as f64;
        let y = if step % 2 == 0 { 300.0 } else { 307.0 };
        tracker.on_sample_at(x, y, at(t));
        t += 16.0;
    }

    let report = tracker.shutdown();

    println!();
    println!("Detected {} suspicious pattern(s):", report.patterns.len());
    let periodic = report
        .patterns
        .iter()
        .filter(|p| p.category == PatternCategory::Periodic)
        .count();
    let sustained = report
        .patterns
        .iter()
        .filter(|p| p.category == PatternCategory::SustainedMovement)
        .count();
    println!("  Periodic: {periodic}");
    println!("  Continuous: {sustained}");

    println!();
    println!("Report document:");
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "Error".to_string())
    );
}
