//! Fallback (noop) implementation of cursor sampling.
//!
//! This exists so the crate (and binary) can compile on targets without a
//! supported cursor-position API. It never emits samples.

use crate::collector::types::PointerSample;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the cursor poller.
///
/// On unsupported platforms this is accepted but no samples are produced.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub poll_interval: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Errors that can occur during cursor sampling.
#[derive(Debug)]
pub enum CollectorError {
    AlreadyRunning,
}

impl std::fmt::Display for CollectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectorError::AlreadyRunning => write!(f, "Collector is already running"),
        }
    }
}

impl std::error::Error for CollectorError {}

/// A noop collector that never emits samples.
pub struct NoopCollector {
    _config: CollectorConfig,
    _sender: Sender<PointerSample>,
    receiver: Receiver<PointerSample>,
    running: Arc<AtomicBool>,
}

impl NoopCollector {
    /// Create a new noop collector.
    pub fn new(config: CollectorConfig) -> Self {
        let (sender, receiver) = bounded(10_000);
        Self {
            _config: config,
            _sender: sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start sampling.
    ///
    /// On unsupported platforms, this simply marks the collector as running.
    pub fn start(&mut self) -> Result<(), CollectorError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CollectorError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Stop sampling.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the collector is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for pointer samples.
    pub fn receiver(&self) -> &Receiver<PointerSample> {
        &self.receiver
    }

    /// Try to receive a sample without blocking.
    pub fn try_recv(&self) -> Option<PointerSample> {
        self.receiver.try_recv().ok()
    }
}

/// On unsupported platforms there is no permission gate to check.
pub fn check_permission() -> bool {
    true
}
