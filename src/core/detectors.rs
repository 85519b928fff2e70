//! Pattern detectors over the movement history.
//!
//! All detectors are stateless: each call re-evaluates the current history
//! snapshot and returns records for whatever qualifies right now. Because the
//! session re-runs them on every admitted event, the same underlying pattern
//! can be reported more than once as the history grows; that is accepted
//! reporting noise, not state the detectors try to track.

use crate::core::event::MovementEvent;
use crate::core::history::MovementHistory;
use crate::core::log::{DetectionRecord, Evidence, PatternCategory};
use chrono::{DateTime, Utc};

/// How many of the most recent events the windowed detectors inspect.
const RECENT_WINDOW: usize = 20;

fn secs_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (b - a).num_milliseconds() as f64 / 1000.0
}

/// Flags runs of near-constant inter-event spacing at a target period.
#[derive(Debug, Clone)]
pub struct PeriodicIntervalDetector {
    target_secs: f64,
    tolerance_secs: f64,
}

impl PeriodicIntervalDetector {
    pub fn new(target_secs: f64, tolerance_secs: f64) -> Self {
        Self {
            target_secs,
            tolerance_secs,
        }
    }

    /// Scan the full history for windows of three consecutive intervals that
    /// all lie within tolerance of the target period. Every qualifying window
    /// yields its own record.
    pub fn detect(&self, history: &MovementHistory) -> Vec<DetectionRecord> {
        if history.len() < 3 {
            return Vec::new();
        }

        let timestamps: Vec<DateTime<Utc>> = history.snapshot().map(|e| e.timestamp).collect();
        let intervals: Vec<f64> = timestamps
            .windows(2)
            .map(|pair| secs_between(pair[0], pair[1]))
            .collect();

        let mut records = Vec::new();
        for window in intervals.windows(3) {
            let all_near_target = window
                .iter()
                .all(|interval| (interval - self.target_secs).abs() < self.tolerance_secs);

            if all_near_target {
                records.push(DetectionRecord::new(
                    PatternCategory::Periodic,
                    format!(
                        "Detected regular movement every {} seconds (\u{00b1}{}s)",
                        self.target_secs, self.tolerance_secs
                    ),
                    Evidence::Intervals(window.to_vec()),
                ));
            }
        }

        records
    }
}

/// Flags nonzero displacement sustained across a long recent window.
#[derive(Debug, Clone)]
pub struct SustainedMovementDetector {
    threshold_secs: f64,
}

impl SustainedMovementDetector {
    pub fn new(threshold_secs: f64) -> Self {
        Self { threshold_secs }
    }

    pub fn detect(&self, history: &MovementHistory) -> Option<DetectionRecord> {
        if history.len() < 2 {
            return None;
        }

        let recent: Vec<&MovementEvent> = history.recent(RECENT_WINDOW).collect();
        let total_time = secs_between(recent[0].timestamp, recent[recent.len() - 1].timestamp);
        if total_time < self.threshold_secs {
            return None;
        }

        let total_distance: f64 = recent.iter().map(|e| e.distance).sum();
        if total_distance <= 0.0 {
            return None;
        }

        Some(DetectionRecord::new(
            PatternCategory::SustainedMovement,
            format!("Detected continuous movement for {total_time:.1} seconds"),
            Evidence::Sustained {
                total_distance,
                duration: total_time,
            },
        ))
    }
}

/// Flags trajectories that track a straight line too closely.
///
/// Least-squares fit of y on x over the recent window; a mean squared error
/// below the threshold is machine-like. Human hands do not draw clean lines.
#[derive(Debug, Clone)]
pub struct LinearTrajectoryDetector {
    mse_threshold: f64,
}

impl LinearTrajectoryDetector {
    pub fn new(mse_threshold: f64) -> Self {
        Self { mse_threshold }
    }

    pub fn detect(&self, history: &MovementHistory) -> Option<DetectionRecord> {
        let points: Vec<&MovementEvent> = history.recent(RECENT_WINDOW).collect();
        if points.len() < 3 {
            return None;
        }

        let n = points.len() as f64;
        let sum_x: f64 = points.iter().map(|p| p.x).sum();
        let sum_y: f64 = points.iter().map(|p| p.y).sum();
        let sum_xy: f64 = points.iter().map(|p| p.x * p.y).sum();
        let sum_x2: f64 = points.iter().map(|p| p.x * p.x).sum();

        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);

        let mse = if slope.is_finite() {
            let intercept = (sum_y - slope * sum_x) / n;
            points
                .iter()
                .map(|p| (p.y - (slope * p.x + intercept)).powi(2))
                .sum::<f64>()
                / n
        } else {
            // Vertical line: qualifies only when every x coincides.
            let first_x = points[0].x;
            if points.iter().all(|p| p.x == first_x) {
                0.0
            } else {
                return None;
            }
        };

        if mse >= self.mse_threshold {
            return None;
        }

        Some(DetectionRecord::new(
            PatternCategory::LinearMovement,
            format!(
                "Detected near-perfect linear trajectory across {} events",
                points.len()
            ),
            Evidence::Linear {
                mse,
                points: points.len(),
            },
        ))
    }
}

/// Flags long paths with almost no net progress.
///
/// Mechanical jigglers shake the cursor in place: the travelled path length
/// dwarfs the straight-line displacement between the window endpoints.
#[derive(Debug, Clone)]
pub struct JitterDetector {
    ratio_threshold: f64,
    displacement_threshold: f64,
    path_length_threshold: f64,
}

impl JitterDetector {
    pub fn new(ratio_threshold: f64, displacement_threshold: f64, path_length_threshold: f64) -> Self {
        Self {
            ratio_threshold,
            displacement_threshold,
            path_length_threshold,
        }
    }

    pub fn detect(&self, history: &MovementHistory) -> Option<DetectionRecord> {
        let points: Vec<&MovementEvent> = history.recent(RECENT_WINDOW).collect();
        if points.len() < 10 {
            return None;
        }

        let path_length: f64 = points
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x - pair[0].x;
                let dy = pair[1].y - pair[0].y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum();

        let first = points[0];
        let last = points[points.len() - 1];
        let net_displacement =
            ((last.x - first.x).powi(2) + (last.y - first.y).powi(2)).sqrt();

        let jittery = if net_displacement > self.displacement_threshold {
            path_length / net_displacement > self.ratio_threshold
        } else {
            path_length > self.path_length_threshold
        };

        if !jittery {
            return None;
        }

        Some(DetectionRecord::new(
            PatternCategory::JitterMovement,
            format!(
                "Detected jittery movement: {path_length:.1} units travelled for {net_displacement:.1} units of net displacement"
            ),
            Evidence::Jitter {
                path_length,
                net_displacement,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn at(secs: f64) -> DateTime<Utc> {
        base() + Duration::milliseconds((secs * 1000.0).round() as i64)
    }

    fn history_from(points: &[(f64, f64, f64)]) -> MovementHistory {
        let mut history = MovementHistory::new(1000);
        let mut last: Option<(f64, f64)> = None;
        for &(x, y, secs) in points {
            let distance = match last {
                Some((lx, ly)) => ((x - lx).powi(2) + (y - ly).powi(2)).sqrt(),
                None => 10.0,
            };
            last = Some((x, y));
            history.append(MovementEvent {
                x,
                y,
                timestamp: at(secs),
                distance,
            });
        }
        history
    }

    #[test]
    fn test_periodic_positive_single_window() {
        // Spacings 30.0, 30.1, 30.2 - all within 0.5s of the 30s target.
        let history = history_from(&[
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 30.0),
            (0.0, 10.0, 60.1),
            (0.0, 0.0, 90.3),
        ]);

        let detector = PeriodicIntervalDetector::new(30.0, 0.5);
        let records = detector.detect(&history);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, PatternCategory::Periodic);
        match &records[0].evidence {
            Evidence::Intervals(intervals) => {
                assert_eq!(intervals.len(), 3);
                assert!((intervals[0] - 30.0).abs() < 1e-9);
                assert!((intervals[1] - 30.1).abs() < 1e-9);
                assert!((intervals[2] - 30.2).abs() < 1e-9);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn test_periodic_regular_but_wrong_period() {
        let history = history_from(&[
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 5.0),
            (0.0, 10.0, 10.0),
            (0.0, 0.0, 15.0),
        ]);

        let detector = PeriodicIntervalDetector::new(30.0, 0.5);
        assert!(detector.detect(&history).is_empty());
    }

    #[test]
    fn test_periodic_tolerance_is_strict() {
        // Middle interval sits exactly on the tolerance boundary.
        let history = history_from(&[
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 30.0),
            (0.0, 10.0, 60.5),
            (0.0, 0.0, 90.5),
        ]);

        let detector = PeriodicIntervalDetector::new(30.0, 0.5);
        assert!(detector.detect(&history).is_empty());
    }

    #[test]
    fn test_periodic_needs_three_intervals() {
        // Three events give only two intervals - no window to check.
        let history = history_from(&[
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 30.0),
            (0.0, 10.0, 60.0),
        ]);

        let detector = PeriodicIntervalDetector::new(30.0, 0.5);
        assert!(detector.detect(&history).is_empty());
    }

    #[test]
    fn test_sustained_positive() {
        // 20 events, 16s apart: 304 seconds of continuous movement.
        let points: Vec<(f64, f64, f64)> = (0..20)
            .map(|i| (10.0 * i as f64, if i % 2 == 0 { 0.0 } else { 7.0 }, 16.0 * i as f64))
            .collect();
        let history = history_from(&points);

        let detector = SustainedMovementDetector::new(300.0);
        let record = detector.detect(&history).expect("window spans 304s");
        match record.evidence {
            Evidence::Sustained { duration, total_distance } => {
                assert!(duration >= 300.0);
                assert!(total_distance > 0.0);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn test_sustained_below_threshold() {
        let points: Vec<(f64, f64, f64)> = (0..20)
            .map(|i| (10.0 * i as f64, if i % 2 == 0 { 0.0 } else { 7.0 }, 10.0 * i as f64))
            .collect();
        let history = history_from(&points);

        let detector = SustainedMovementDetector::new(300.0);
        assert!(detector.detect(&history).is_none());
    }

    #[test]
    fn test_sustained_zero_distance_excluded() {
        // Unreachable through the admission filter, but the detector must
        // still hold when such a history is constructed directly.
        let mut history = MovementHistory::new(1000);
        for i in 0..20 {
            history.append(MovementEvent {
                x: 0.0,
                y: 0.0,
                timestamp: at(20.0 * i as f64),
                distance: 0.0,
            });
        }

        let detector = SustainedMovementDetector::new(300.0);
        assert!(detector.detect(&history).is_none());
    }

    #[test]
    fn test_sustained_ignores_older_than_window() {
        // 30 events: only the most recent 20 count, and those span 19s.
        let points: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| (10.0 * i as f64, if i % 2 == 0 { 0.0 } else { 7.0 }, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = SustainedMovementDetector::new(300.0);
        assert!(detector.detect(&history).is_none());
    }

    #[test]
    fn test_linear_collinear_points() {
        let points: Vec<(f64, f64, f64)> = (0..5)
            .map(|i| (10.0 * i as f64, 5.0 * i as f64, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = LinearTrajectoryDetector::new(0.5);
        let record = detector.detect(&history).expect("perfectly collinear");
        match record.evidence {
            Evidence::Linear { mse, points } => {
                assert!(mse < 1e-9);
                assert_eq!(points, 5);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn test_linear_vertical_line() {
        let points: Vec<(f64, f64, f64)> = (0..5)
            .map(|i| (42.0, 10.0 * i as f64, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = LinearTrajectoryDetector::new(0.5);
        assert!(detector.detect(&history).is_some());
    }

    #[test]
    fn test_linear_rejects_zigzag() {
        let points: Vec<(f64, f64, f64)> = (0..8)
            .map(|i| (10.0 * i as f64, if i % 2 == 0 { 0.0 } else { 7.0 }, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = LinearTrajectoryDetector::new(0.5);
        assert!(detector.detect(&history).is_none());
    }

    #[test]
    fn test_jitter_shaking_in_place() {
        // Oscillate between two points 8 units apart: long path, ~no net gain.
        let points: Vec<(f64, f64, f64)> = (0..12)
            .map(|i| (if i % 2 == 0 { 0.0 } else { 8.0 }, 0.0, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = JitterDetector::new(5.0, 5.0, 20.0);
        let record = detector.detect(&history).expect("pure shaking");
        match record.evidence {
            Evidence::Jitter { path_length, net_displacement } => {
                assert!(path_length > 80.0);
                assert!(net_displacement <= 8.0);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn test_jitter_rejects_forward_progress() {
        let points: Vec<(f64, f64, f64)> = (0..12)
            .map(|i| (10.0 * i as f64, if i % 2 == 0 { 0.0 } else { 7.0 }, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = JitterDetector::new(5.0, 5.0, 20.0);
        assert!(detector.detect(&history).is_none());
    }

    #[test]
    fn test_jitter_needs_ten_events() {
        let points: Vec<(f64, f64, f64)> = (0..9)
            .map(|i| (if i % 2 == 0 { 0.0 } else { 8.0 }, 0.0, i as f64))
            .collect();
        let history = history_from(&points);

        let detector = JitterDetector::new(5.0, 5.0, 20.0);
        assert!(detector.detect(&history).is_none());
    }
}
