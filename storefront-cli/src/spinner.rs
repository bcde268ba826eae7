//! Spinner shown while the catalog is being fetched.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A single steady-ticking spinner. Hidden entirely in quiet mode.
pub(crate) struct FetchSpinner {
    pb: ProgressBar,
}

impl FetchSpinner {
    pub(crate) fn start(msg: &str, quiet: bool) -> Self {
        if quiet {
            return Self {
                pb: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}
