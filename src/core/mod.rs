//! Core movement-analysis engine.
//!
//! The pipeline per raw sample: admission filter, bounded history append,
//! then every detector re-runs over the current history and any matches land
//! in the detection log.

pub mod detectors;
pub mod event;
pub mod history;
pub mod log;
pub mod session;

// Re-export commonly used types
pub use detectors::{
    JitterDetector, LinearTrajectoryDetector, PeriodicIntervalDetector, SustainedMovementDetector,
};
pub use event::{AdmissionFilter, MovementEvent};
pub use history::MovementHistory;
pub use log::{DetectionLog, DetectionRecord, Evidence, PatternCategory};
pub use session::MovementTracker;
