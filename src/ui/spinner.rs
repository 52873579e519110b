use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

const TICK_STRINGS: &[&str] = &["◐", "◓", "◑", "◒", " "];

/// Progress line on stderr while a service call is in flight.
///
/// Drawn hidden in quiet mode. Dropping it clears the line.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };

        // A bad template only loses the custom look; the default one still spins.
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style.tick_strings(TICK_STRINGS));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar }
    }

    pub fn stop(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
