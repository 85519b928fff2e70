//! Windows implementation of cursor sampling.
//!
//! Polls the cursor position with `GetCursorPos` on a background thread and
//! forwards samples over a bounded channel. Polling needs no hooks and no
//! special privileges.

use crate::collector::types::PointerSample;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Configuration for the cursor poller.
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

/// The Windows cursor poller.
pub struct WindowsCollector {
    config: CollectorConfig,
    sender: Sender<PointerSample>,
    receiver: Receiver<PointerSample>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl WindowsCollector {
    /// Create a new Windows collector with the given configuration.
    pub fn new(config: CollectorConfig) -> Self {
        // Use a bounded channel to prevent unbounded memory growth
        let (sender, receiver) = bounded(10_000);

        Self {
            config,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start polling in a background thread.
    ///
    /// Returns an error if the collector is already running.
    pub fn start(&mut self) -> Result<(), CollectorError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CollectorError::AlreadyRunning);
        }

        self.running.store(true, Ordering::SeqCst);

        let sender = self.sender.clone();
        let running = self.running.clone();
        let interval = self.config.poll_interval;

        let handle = thread::spawn(move || {
            run_poll_loop(sender, running.clone(), interval);
            running.store(false, Ordering::SeqCst);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop polling.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            // The thread should exit when running becomes false
            let _ = handle.join();
        }
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

impl Drop for WindowsCollector {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Poll the cursor position until stopped.
fn run_poll_loop(sender: Sender<PointerSample>, running: Arc<AtomicBool>, interval: Duration) {
    let mut point = POINT::default();

    while running.load(Ordering::SeqCst) {
        let ok = unsafe { GetCursorPos(&mut point) }.is_ok();
        if ok {
            // Don't block if the channel is full - just drop the sample
            let _ = sender.try_send(PointerSample::new(point.x as f64, point.y as f64));
        }

        thread::sleep(interval);
    }
}

/// Check if the process can read the cursor position.
pub fn check_permission() -> bool {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_config_default() {
        let config = CollectorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_collector_creation() {
        let collector = WindowsCollector::new(CollectorConfig::default());
        assert!(!collector.is_running());
    }
}
