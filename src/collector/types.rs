//! Sample types emitted by the platform collectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw pointer-position sample, stamped at capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
}

impl PointerSample {
    /// Create a sample stamped with the current wall clock.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            timestamp: Utc::now(),
        }
    }

    /// Create a sample with an explicit timestamp.
    pub fn at(x: f64, y: f64, timestamp: DateTime<Utc>) -> Self {
        Self { x, y, timestamp }
    }
}
