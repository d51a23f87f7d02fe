//! Spinners for the slower CLI commands (library scans, previews).

use crate::constants::SPINNER_CHARS;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner drawn on stderr so piped stdout stays clean.
pub fn scan_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_strings(SPINNER_CHARS));
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_spinner() {
        let spinner = scan_spinner("Scanning captions...");
        assert_eq!(spinner.message(), "Scanning captions...");
        spinner.finish_and_clear();
    }
}
