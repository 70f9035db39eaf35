//! Progress indicators for sweeps that load many run keys.
//!
//! Bars draw to stderr only when it is an interactive terminal, so piped
//! output and tests stay clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{IsTerminal, stderr};

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Check if we should show progress indicators.
#[must_use]
pub fn should_show_progress() -> bool {
    stderr().is_terminal()
}

/// Create a determinate bar over `total` run keys.
///
/// Falls back to the default bar style if the template is rejected.
#[must_use]
pub fn create_progress_bar(total: u64, message: &str, show: bool) -> ProgressBar {
    let pb = ProgressBar::new(total);

    if show {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb.set_message(message.to_string());
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb
}

/// Progress over the run keys of one sweep.
///
/// `tick` takes `&self` so a single tracker can be shared by rayon workers.
pub struct SweepProgress {
    bar: ProgressBar,
    showing: bool,
}

impl SweepProgress {
    /// Tracker that draws only on an interactive terminal.
    #[must_use]
    pub fn new(total: usize, message: &str) -> Self {
        Self::with_visibility(total, message, should_show_progress())
    }

    /// Tracker that never draws.
    #[must_use]
    pub fn hidden(total: usize) -> Self {
        Self::with_visibility(total, "", false)
    }

    #[must_use]
    pub fn with_visibility(total: usize, message: &str, show: bool) -> Self {
        Self {
            bar: create_progress_bar(total as u64, message, show),
            showing: show,
        }
    }

    /// Mark one run key as loaded.
    pub fn tick(&self) {
        self.bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }

    #[must_use]
    pub const fn is_showing(&self) -> bool {
        self.showing
    }
}
