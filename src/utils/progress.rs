//! Spinner shown while an analysis step runs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// How a step ended; picks the marker printed in front of the closing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Degraded,
}

impl StepOutcome {
    fn marker(self) -> &'static str {
        match self {
            StepOutcome::Done => "✅",
            StepOutcome::Degraded => "⚠️ ",
        }
    }
}

/// Indented spinner that lives for the duration of one step
pub struct StepSpinner {
    bar: ProgressBar,
}

impl StepSpinner {
    pub fn start(message: impl Into<String>) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICKS);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Stop ticking and leave `message` behind
    pub fn finish(self, outcome: StepOutcome, message: &str) {
        self.bar
            .finish_with_message(format!("{} {}", outcome.marker(), message));
    }

    pub fn done(self, message: &str) {
        self.finish(StepOutcome::Done, message);
    }

    pub fn degraded(self, message: &str) {
        self.finish(StepOutcome::Degraded, message);
    }
}
