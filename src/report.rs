//! Reporting sink injected into the scanning and sync layers.
//!
//! Core code never prints. It hands diagnostics (recoverable per-file
//! failures) and informational messages to a [`Reporter`], and the caller
//! decides where they go: the `log` facade, nowhere, or an in-memory buffer.

use std::sync::Mutex;

/// Receiver for diagnostic and informational messages.
pub trait Reporter: Send + Sync {
    /// A recoverable problem, such as a file that could not be read.
    fn diagnostic(&self, message: &str);

    /// Progress or outcome information.
    fn info(&self, message: &str);
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn diagnostic(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn info(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn diagnostic(&self, _message: &str) {}

    fn info(&self, _message: &str) {}
}

/// A message captured by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Diagnostic(String),
    Info(String),
}

/// Records every message, in order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Only the diagnostic messages.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Diagnostic(m) => Some(m.clone()),
                ReportEvent::Info(_) => None,
            })
            .collect()
    }

    /// Only the informational messages.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Info(m) => Some(m.clone()),
                ReportEvent::Diagnostic(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        // A poisoned buffer still holds valid events.
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Reporter for MemoryReporter {
    fn diagnostic(&self, message: &str) {
        self.lock().push(ReportEvent::Diagnostic(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.lock().push(ReportEvent::Info(message.to_string()));
    }
}
