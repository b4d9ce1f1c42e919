use indicatif::{ProgressBar, ProgressStyle};

use crate::llm::ProgressReporter;

/// Progress indicator (spinner animation).
pub struct Spinner {
    pb: ProgressBar,
    base_message: String,
}

impl Spinner {
    /// Creates a new spinner.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self {
            pb,
            base_message: message.to_string(),
        }
    }

    /// Updates the spinner message.
    #[allow(dead_code)]
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finishes and clears the spinner line.
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressReporter for Spinner {
    fn append_suffix(&self, suffix: &str) {
        let full_message = format!("{} {}", self.base_message, suffix);
        self.pb.set_message(full_message);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}
