//! The suspicious-pattern report and its JSON persistence sink.

use crate::core::history::MovementHistory;
use crate::core::log::DetectionRecord;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::path::Path;
use uuid::Uuid;

/// Final artifact of a session: everything the detection log accumulated,
/// plus the elapsed runtime and identification of where it was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternReport {
    pub device_id: String,
    pub session_id: Uuid,
    pub patterns: Vec<DetectionRecord>,
    /// Elapsed seconds from session start to shutdown
    pub total_runtime: f64,
    pub movement: MovementSummary,
}

/// Distance statistics over the events still held in history at shutdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovementSummary {
    pub events: usize,
    pub mean_distance: f64,
    pub distance_std_dev: f64,
}

impl MovementSummary {
    pub fn from_history(history: &MovementHistory) -> Self {
        let distances: Vec<f64> = history.snapshot().map(|e| e.distance).collect();
        if distances.is_empty() {
            return Self::default();
        }

        let mean_distance = (&distances).mean();
        let distance_std_dev = if distances.len() < 2 {
            0.0
        } else {
            (&distances).std_dev()
        };

        Self {
            events: distances.len(),
            mean_distance,
            distance_std_dev,
        }
    }
}

impl PatternReport {
    pub fn new(
        session_id: Uuid,
        patterns: Vec<DetectionRecord>,
        total_runtime: f64,
        movement: MovementSummary,
    ) -> Self {
        let device_id = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown-host".to_string());

        Self {
            device_id,
            session_id,
            patterns,
            total_runtime,
            movement,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::SerializeError(e.to_string()))?;

        std::fs::write(path, json).map_err(|e| ReportError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Report persistence errors.
#[derive(Debug)]
pub enum ReportError {
    IoError(String),
    SerializeError(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::IoError(e) => write!(f, "IO error: {e}"),
            ReportError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}
