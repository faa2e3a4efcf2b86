//! Progress display for batch synthesis runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PASS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.cyan/blue}] {pos}/{len} passes")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Exemplars: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates pass progress for a batch of exemplars
///
/// Small batches get one bar per exemplar. Larger batches get a single
/// batch bar plus a bar for the exemplar currently running.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
        }
    }

    /// Initialize progress bars based on exemplar count
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Add a pass bar for a new exemplar
    pub fn start_file(&mut self, index: usize, path: &Path, passes: usize) {
        let bar = self.multi_progress.add(ProgressBar::new(passes as u64));
        bar.set_style(PASS_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );

        if index >= self.file_bars.len() {
            self.file_bars.resize(index + 1, ProgressBar::hidden());
        }
        if let Some(slot) = self.file_bars.get_mut(index) {
            *slot = bar;
        }
    }

    /// Report the number of completed passes
    pub fn update_pass(&self, index: usize, pass: usize) {
        if let Some(bar) = self.file_bars.get(index) {
            bar.set_position(pass as u64);
        }
    }

    /// Mark an exemplar as completed
    pub fn complete_file(&self, index: usize) {
        if let Some(bar) = self.file_bars.get(index) {
            // Large batches only keep the running exemplar on screen
            if self.batch_bar.is_some() {
                bar.finish_and_clear();
            } else {
                bar.finish();
            }
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All exemplars processed");
        }
        let _ = self.multi_progress.clear();
    }
}
