//! CLI subcommand implementations.

pub mod browse;
pub mod show;
pub mod url;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr shown while a request is outstanding.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
