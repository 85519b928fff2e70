//! Session controller: the per-sample analysis pipeline and shutdown flush.

use crate::config::Config;
use crate::core::detectors::{
    JitterDetector, LinearTrajectoryDetector, PeriodicIntervalDetector, SustainedMovementDetector,
};
use crate::core::event::AdmissionFilter;
use crate::core::history::MovementHistory;
use crate::core::log::DetectionLog;
use crate::report::{MovementSummary, PatternReport};
use crate::stats::SharedSessionStats;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Owns all mutable session state and runs the analysis pipeline.
///
/// One instance per run. Samples are expected strictly sequentially; the
/// struct is `Send`, so a host delivering samples and the shutdown trigger
/// from different threads can wrap it in a single `Mutex` unchanged.
pub struct MovementTracker {
    filter: AdmissionFilter,
    history: MovementHistory,
    log: DetectionLog,
    periodic: PeriodicIntervalDetector,
    sustained: SustainedMovementDetector,
    linear: LinearTrajectoryDetector,
    jitter: JitterDetector,
    stats: Option<SharedSessionStats>,
    session_id: Uuid,
    session_start: DateTime<Utc>,
    running: bool,
    /// Report cached by the first `shutdown` call; later calls return it as-is.
    outcome: Option<PatternReport>,
}

impl MovementTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: AdmissionFilter::new(config.min_movement_distance),
            history: MovementHistory::new(config.history_capacity),
            log: DetectionLog::new(),
            periodic: PeriodicIntervalDetector::new(
                config.periodic_threshold_secs,
                config.periodic_tolerance_secs,
            ),
            sustained: SustainedMovementDetector::new(config.continuous_movement_threshold_secs),
            linear: LinearTrajectoryDetector::new(config.linearity_threshold),
            jitter: JitterDetector::new(
                config.jitter_ratio_threshold,
                config.jitter_displacement_threshold,
                config.jitter_path_length_threshold,
            ),
            stats: None,
            session_id: Uuid::new_v4(),
            session_start: Utc::now(),
            running: true,
            outcome: None,
        }
    }

    /// Attach shared session counters updated as samples flow through.
    pub fn with_stats(config: &Config, stats: SharedSessionStats) -> Self {
        let mut tracker = Self::new(config);
        tracker.stats = Some(stats);
        tracker
    }

    /// Feed one raw position sample, stamped with the current wall clock.
    pub fn on_sample(&mut self, x: f64, y: f64) {
        self.on_sample_at(x, y, Utc::now());
    }

    /// Feed one raw position sample with an explicit timestamp.
    ///
    /// Timestamps must be non-decreasing across calls.
    pub fn on_sample_at(&mut self, x: f64, y: f64, now: DateTime<Utc>) {
        if !self.running {
            return;
        }

        if let Some(ref stats) = self.stats {
            stats.record_sample();
        }

        let Some(event) = self.filter.admit(x, y, now) else {
            return;
        };

        if let Some(ref stats) = self.stats {
            stats.record_admitted();
        }

        self.history.append(event);
        if self.history.len() < 3 {
            return;
        }

        let before = self.log.len();

        for record in self.periodic.detect(&self.history) {
            self.log.append(record);
        }
        if let Some(record) = self.sustained.detect(&self.history) {
            self.log.append(record);
        }
        if let Some(record) = self.linear.detect(&self.history) {
            self.log.append(record);
        }
        if let Some(record) = self.jitter.detect(&self.history) {
            self.log.append(record);
        }

        if let Some(ref stats) = self.stats {
            stats.record_patterns((self.log.len() - before) as u64);
        }
    }

    /// Stop the session and produce the final report.
    ///
    /// The first call computes and caches the report; repeated calls return
    /// the same report without recomputing anything.
    pub fn shutdown(&mut self) -> PatternReport {
        if let Some(ref report) = self.outcome {
            return report.clone();
        }

        self.running = false;
        let total_runtime = (Utc::now() - self.session_start).num_milliseconds() as f64 / 1000.0;
        let report = PatternReport::new(
            self.session_id,
            self.log.records().to_vec(),
            total_runtime,
            MovementSummary::from_history(&self.history),
        );

        self.outcome = Some(report.clone());
        report
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn history(&self) -> &MovementHistory {
        &self.history
    }

    pub fn log(&self) -> &DetectionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_config() -> Config {
        Config::default()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn at(secs: f64) -> DateTime<Utc> {
        base() + Duration::milliseconds((secs * 1000.0).round() as i64)
    }

    #[test]
    fn test_sub_threshold_samples_leave_history_unchanged() {
        let mut tracker = MovementTracker::new(&test_config());

        tracker.on_sample_at(0.0, 0.0, at(0.0));
        tracker.on_sample_at(2.0, 0.0, at(1.0));
        tracker.on_sample_at(4.0, 0.0, at(2.0));

        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_samples_after_shutdown_are_ignored() {
        let mut tracker = MovementTracker::new(&test_config());

        tracker.on_sample_at(0.0, 0.0, at(0.0));
        tracker.on_sample_at(10.0, 0.0, at(1.0));
        assert_eq!(tracker.history().len(), 1);

        tracker.shutdown();
        tracker.on_sample_at(20.0, 0.0, at(2.0));
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut tracker = MovementTracker::new(&test_config());
        tracker.on_sample_at(0.0, 0.0, at(0.0));
        tracker.on_sample_at(10.0, 0.0, at(1.0));

        let first = tracker.shutdown();
        let second = tracker.shutdown();

        assert_eq!(first.total_runtime, second.total_runtime);
        assert_eq!(first.patterns.len(), second.patterns.len());
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_detectors_gated_until_three_events() {
        let mut tracker = MovementTracker::new(&test_config());

        // Two admitted events 30s apart would already tempt a buggy periodic
        // scan; the gate must hold it back.
        tracker.on_sample_at(0.0, 0.0, at(0.0));
        tracker.on_sample_at(10.0, 0.0, at(30.0));
        tracker.on_sample_at(10.0, 10.0, at(60.0));

        assert_eq!(tracker.history().len(), 2);
        assert!(tracker.log().is_empty());
    }
}
