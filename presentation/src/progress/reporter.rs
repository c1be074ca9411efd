//! Waiting indicator shown until an answer starts streaming

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Spinner on stderr between sending a question and the first delta.
///
/// Hidden spinners (`--quiet`, `show_progress = false`) accept the same calls
/// and draw nothing.
pub struct ProgressReporter {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Start (or restart) the spinner with `message`.
    pub fn start(&self, message: &str) {
        if !self.enabled {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message.dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(old) = self.slot().replace(pb) {
            old.finish_and_clear();
        }
    }

    /// Change the message of a running spinner.
    pub fn update(&self, message: &str) {
        if let Some(pb) = self.slot().as_ref() {
            pb.set_message(message.dimmed().to_string());
        }
    }

    /// Remove the spinner from the terminal.
    pub fn clear(&self) {
        if let Some(pb) = self.slot().take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_never_activates() {
        let reporter = ProgressReporter::new(false);
        reporter.start("Thinking...");
        assert!(!reporter.is_active());
        reporter.update("Reading...");
        reporter.clear();
    }

    #[test]
    fn test_start_and_clear() {
        let reporter = ProgressReporter::new(true);
        reporter.start("Thinking...");
        assert!(reporter.is_active());
        reporter.update("Reading...");
        reporter.clear();
        assert!(!reporter.is_active());
    }
}
