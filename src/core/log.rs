//! Append-only log of detected suspicious patterns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a detected pattern.
///
/// The serialized names are the `type` strings of the report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternCategory {
    /// Movement bursts at a near-constant target period.
    #[serde(rename = "Periodic Movement")]
    Periodic,
    /// Nonzero displacement sustained across a long time window.
    #[serde(rename = "Continuous Movement")]
    SustainedMovement,
    /// Trajectory tracking a straight line too closely.
    #[serde(rename = "Linear Movement")]
    LinearMovement,
    /// Long path with almost no net progress.
    #[serde(rename = "Jittery Movement")]
    JitterMovement,
}

/// Category-specific supporting data for a detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    /// The qualifying inter-event intervals, in seconds.
    Intervals(Vec<f64>),
    Sustained {
        total_distance: f64,
        duration: f64,
    },
    Linear {
        mse: f64,
        points: usize,
    },
    Jitter {
        path_length: f64,
        net_displacement: f64,
    },
}

/// One logged instance of a suspicious pattern. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Wall-clock instant the pattern was detected.
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub category: PatternCategory,
    pub description: String,
    #[serde(rename = "data")]
    pub evidence: Evidence,
}

impl DetectionRecord {
    pub fn new(category: PatternCategory, description: String, evidence: Evidence) -> Self {
        Self {
            timestamp: Utc::now(),
            category,
            description,
            evidence,
        }
    }
}

/// Append-only, insertion-ordered sequence of [`DetectionRecord`]s.
///
/// Each append also prints one operator-visible console line.
#[derive(Debug, Default)]
pub struct DetectionLog {
    records: Vec<DetectionRecord>,
}

impl DetectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: DetectionRecord) {
        println!(
            "[{}] Suspicious pattern detected: {}",
            record.timestamp.to_rfc3339(),
            record.description
        );
        self.records.push(record);
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[DetectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = DetectionLog::new();
        log.append(DetectionRecord::new(
            PatternCategory::Periodic,
            "first".to_string(),
            Evidence::Intervals(vec![30.0, 30.1, 30.2]),
        ));
        log.append(DetectionRecord::new(
            PatternCategory::SustainedMovement,
            "second".to_string(),
            Evidence::Sustained {
                total_distance: 140.0,
                duration: 301.0,
            },
        ));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].description, "first");
        assert_eq!(log.records()[1].description, "second");
        assert!(log.records()[0].timestamp <= log.records()[1].timestamp);
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = DetectionRecord::new(
            PatternCategory::Periodic,
            "regular movement".to_string(),
            Evidence::Intervals(vec![30.0, 30.1, 30.2]),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Periodic Movement");
        assert_eq!(value["description"], "regular movement");
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_sustained_category_name() {
        let record = DetectionRecord::new(
            PatternCategory::SustainedMovement,
            "continuous".to_string(),
            Evidence::Sustained {
                total_distance: 12.0,
                duration: 305.5,
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Continuous Movement");
        assert_eq!(value["data"]["duration"], 305.5);
    }
}
