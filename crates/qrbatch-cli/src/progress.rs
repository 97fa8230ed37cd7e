//! Progress bar for record processing.

use indicatif::{ProgressBar, ProgressStyle};
use qrbatch_core::BatchProgress;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} records ({eta})";

/// Creates the record progress bar, or a hidden one when `enabled` is false.
pub fn record_progress(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}

/// Moves the bar to the coordinator's latest snapshot.
pub fn update(bar: &ProgressBar, progress: &BatchProgress) {
    bar.set_length(progress.total as u64);
    bar.set_position(progress.completed as u64);
}
