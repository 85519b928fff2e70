//! Movement events and the admission filter.
//!
//! Raw samples become [`MovementEvent`]s only once their displacement from
//! the previous sample clears the minimum-distance threshold. Everything
//! smaller is treated as sensor noise and discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An accepted pointer movement.
///
/// `distance` is the Euclidean displacement from the previous sample at the
/// time the event was admitted. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementEvent {
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
    pub distance: f64,
}

/// Distance-based admission filter for raw position samples.
///
/// Holds the last observed position between calls. The very first sample only
/// seeds that position; there is no displacement to measure yet.
#[derive(Debug)]
pub struct AdmissionFilter {
    min_distance: f64,
    last_position: Option<(f64, f64)>,
}

impl AdmissionFilter {
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            last_position: None,
        }
    }

    /// Admit or discard a sample taken at `now`.
    ///
    /// Samples are expected in temporal order; `now` must not precede the
    /// previous call's `now`.
    pub fn admit(&mut self, x: f64, y: f64, now: DateTime<Utc>) -> Option<MovementEvent> {
        let admitted = match self.last_position {
            None => None,
            Some((last_x, last_y)) => {
                let distance = ((x - last_x).powi(2) + (y - last_y).powi(2)).sqrt();
                (distance >= self.min_distance).then_some(MovementEvent {
                    x,
                    y,
                    timestamp: now,
                    distance,
                })
            }
        };

        // The reference point follows every sample, accepted or not.
        self.last_position = Some((x, y));

        admitted
    }

    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.last_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_admits_nothing() {
        let mut filter = AdmissionFilter::new(5.0);
        assert!(filter.admit(100.0, 200.0, Utc::now()).is_none());
        assert_eq!(filter.last_position(), Some((100.0, 200.0)));
    }

    #[test]
    fn test_admission_distance() {
        let mut filter = AdmissionFilter::new(5.0);
        let now = Utc::now();

        assert!(filter.admit(0.0, 0.0, now).is_none());

        let event = filter.admit(3.0, 4.0, now).expect("3-4-5 triangle clears the threshold");
        assert!((event.distance - 5.0).abs() < 1e-9);
        assert_eq!(event.x, 3.0);
        assert_eq!(event.y, 4.0);
    }

    #[test]
    fn test_sub_threshold_sample_is_discarded() {
        let mut filter = AdmissionFilter::new(5.0);
        let now = Utc::now();

        filter.admit(0.0, 0.0, now);
        assert!(filter.admit(2.0, 2.0, now).is_none());
    }

    #[test]
    fn test_reference_point_moves_on_discard() {
        let mut filter = AdmissionFilter::new(5.0);
        let now = Utc::now();

        filter.admit(0.0, 0.0, now);
        filter.admit(3.0, 0.0, now);
        assert_eq!(filter.last_position(), Some((3.0, 0.0)));

        // 3 -> 6 is only 3 units even though the drift from the origin is 6.
        assert!(filter.admit(6.0, 0.0, now).is_none());
    }
}
