//! Session statistics counters.
//!
//! Tracks how many samples were observed, how many cleared the admission
//! filter, and how many suspicious patterns were logged. Counters are atomic
//! so the sampling pipeline and the CLI status path can share one instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cumulative counters for the current session.
#[derive(Debug)]
pub struct SessionStats {
    /// Raw samples received from the collector
    samples_observed: AtomicU64,
    /// Samples that cleared the admission filter
    events_admitted: AtomicU64,
    /// Detection records appended to the log
    patterns_detected: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting counters
    persist_path: Option<PathBuf>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            samples_observed: AtomicU64::new(0),
            events_admitted: AtomicU64::new(0),
            patterns_detected: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create session stats with persistence, resuming prior counters.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut stats = Self::new();
        stats.persist_path = Some(path);

        if let Err(e) = stats.load() {
            eprintln!("Note: Could not load previous session stats: {e}");
        }

        stats
    }

    pub fn record_sample(&self) {
        self.samples_observed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_admitted(&self) {
        self.events_admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_patterns(&self, count: u64) {
        self.patterns_detected.fetch_add(count, Ordering::Relaxed);
    }

    /// Get the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            samples_observed: self.samples_observed.load(Ordering::Relaxed),
            events_admitted: self.events_admitted.load(Ordering::Relaxed),
            patterns_detected: self.patterns_detected.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "Session Statistics:\n\
             - Samples observed: {}\n\
             - Movement events admitted: {}\n\
             - Suspicious patterns detected: {}\n\
             - Session duration: {} seconds",
            snapshot.samples_observed,
            snapshot.events_admitted,
            snapshot.patterns_detected,
            snapshot.session_duration_secs
        )
    }

    /// Save counters to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let snapshot = self.snapshot();
            let persisted = PersistedStats {
                samples_observed: snapshot.samples_observed,
                events_admitted: snapshot.events_admitted,
                patterns_detected: snapshot.patterns_detected,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load counters from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.samples_observed
                    .store(persisted.samples_observed, Ordering::Relaxed);
                self.events_admitted
                    .store(persisted.events_admitted, Ordering::Relaxed);
                self.patterns_detected
                    .store(persisted.patterns_detected, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.samples_observed.store(0, Ordering::Relaxed);
        self.events_admitted.store(0, Ordering::Relaxed);
        self.patterns_detected.store(0, Ordering::Relaxed);
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub samples_observed: u64,
    pub events_admitted: u64,
    pub patterns_detected: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Counter format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    samples_observed: u64,
    events_admitted: u64,
    patterns_detected: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared session stats.
pub type SharedSessionStats = Arc<SessionStats>;

/// Create new shared session stats.
pub fn create_shared_stats() -> SharedSessionStats {
    Arc::new(SessionStats::new())
}

/// Create new shared session stats with persistence.
pub fn create_shared_stats_with_persistence(path: PathBuf) -> SharedSessionStats {
    Arc::new(SessionStats::with_persistence(path))
}
