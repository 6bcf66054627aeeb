//! Terminal progress display for a running generation

use crate::algorithm::executor::{Generator, RunState};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar counting collapsed cells out of the grid total
///
/// Redraws every `PROGRESS_UPDATE_INTERVAL` collapses to keep the overhead
/// off the hot loop.
pub struct ProgressTracker {
    bar: ProgressBar,
    last_drawn: usize,
}

impl ProgressTracker {
    /// Visible bar on stderr for a grid of `total_cells`
    pub fn new(total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, last_drawn: 0 }
    }

    /// Tracker that draws nothing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar, last_drawn: 0 }
    }

    /// Report the generator's current collapse count
    pub fn update(&mut self, generator: &Generator) {
        let collapses = generator.stats().collapses;
        if collapses >= self.last_drawn + PROGRESS_UPDATE_INTERVAL {
            self.last_drawn = collapses;
            self.bar.set_position(collapses as u64);
            self.bar
                .set_message(format!("step {}", generator.stats().steps));
        }
    }

    /// Collapses shown on the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with the outcome of the run
    pub fn finish(&self, generator: &Generator) {
        self.bar.set_position(generator.stats().collapses as u64);
        let message = match generator.state() {
            RunState::Succeeded => "done".to_string(),
            RunState::Failed(reason) => format!("failed: {reason}"),
            RunState::Running => "interrupted".to_string(),
        };
        self.bar.abandon_with_message(message);
    }
}
