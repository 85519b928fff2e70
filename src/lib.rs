//! Mousewatch - pointer-movement anomaly sensor.
//!
//! This library watches a stream of pointer-position samples and flags
//! behavioral patterns consistent with automated (non-human) control:
//! perfectly periodic movement bursts, unnaturally sustained continuous
//! motion, machine-straight trajectories, and in-place jitter.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Mousewatch                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌─────────┐   ┌─────────┐   │
//! │  │ Collector │──▶│ Admission │──▶│ History │──▶│Detectors│   │
//! │  │ (poller)  │   │  filter   │   │ (FIFO)  │   │  (x4)   │   │
//! │  └───────────┘   └───────────┘   └─────────┘   └────┬────┘   │
//! │        │                                            ▼        │
//! │  ┌───────────┐                              ┌─────────────┐  │
//! │  │  Session  │                              │  Detection  │  │
//! │  │   stats   │                              │     log     │  │
//! │  └───────────┘                              └─────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! At shutdown the detection log and the elapsed runtime are flushed into a
//! JSON report (see [`report::PatternReport`]).
//!
//! # Example
//!
//! ```
//! use mousewatch::{Config, MovementTracker};
//!
//! let config = Config::default();
//! let mut tracker = MovementTracker::new(&config);
//!
//! // Feed raw position samples; the tracker admits, buffers and analyzes.
//! tracker.on_sample(100.0, 200.0);
//! tracker.on_sample(140.0, 220.0);
//!
//! // Flush once at the end of the session.
//! let report = tracker.shutdown();
//! assert!(report.total_runtime >= 0.0);
//! ```

pub mod collector;
pub mod config;
pub mod core;
pub mod report;
pub mod stats;

// Re-export key types at crate root for convenience
pub use collector::{Collector, CollectorConfig, CollectorError, PointerSample};
pub use config::{Config, ConfigError};
pub use core::{
    DetectionLog, DetectionRecord, Evidence, MovementEvent, MovementHistory, MovementTracker,
    PatternCategory,
};
pub use report::{MovementSummary, PatternReport, ReportError};
pub use stats::{SessionStats, SharedSessionStats, StatsSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
