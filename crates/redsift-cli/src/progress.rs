//! Spinner feedback for pipeline stages.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use redsift_pipeline::{PipelineError, PipelineState, StageObserver};

const TICK: Duration = Duration::from_millis(100);

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    style(&bar);
    bar.set_message(message);
    bar.enable_steady_tick(TICK);
    bar
}

fn style(bar: &ProgressBar) {
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
}

fn enter_message(state: PipelineState) -> Option<&'static str> {
    match state {
        PipelineState::Fetching => Some("Fetching Reddit posts..."),
        PipelineState::RawSaved => Some("Saving posts to CSV..."),
        PipelineState::Cleaning => Some("Cleaning data..."),
        PipelineState::Shuffling => Some("Shuffling data..."),
        PipelineState::Init | PipelineState::Cleaned | PipelineState::Done => None,
    }
}

fn success_message(state: PipelineState) -> Option<&'static str> {
    match state {
        PipelineState::Fetching => Some("Reddit posts fetched."),
        PipelineState::RawSaved => Some("Posts saved to CSV."),
        PipelineState::Cleaning => Some("Data cleaned."),
        PipelineState::Shuffling => Some("Data shuffled."),
        PipelineState::Init | PipelineState::Cleaned | PipelineState::Done => None,
    }
}

/// Shows one spinner per stage action and leaves a success or failure line
/// behind. Resting states draw nothing.
pub(crate) struct SpinnerObserver {
    current: Option<ProgressBar>,
    visible: bool,
}

impl SpinnerObserver {
    pub(crate) fn new() -> Self {
        Self {
            current: None,
            visible: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn hidden() -> Self {
        Self {
            current: None,
            visible: false,
        }
    }
}

impl StageObserver for SpinnerObserver {
    fn on_stage_enter(&mut self, state: PipelineState) {
        let Some(message) = enter_message(state) else {
            return;
        };
        let bar = if self.visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };
        style(&bar);
        bar.set_message(message);
        if self.visible {
            bar.enable_steady_tick(TICK);
        }
        self.current = Some(bar);
    }

    fn on_stage_success(&mut self, state: PipelineState) {
        if let (Some(bar), Some(message)) = (&self.current, success_message(state)) {
            bar.finish_with_message(format!("✔ {message}"));
        }
    }

    fn on_stage_failure(&mut self, _state: PipelineState, error: &PipelineError) {
        if let Some(bar) = &self.current {
            bar.abandon_with_message(format!("✖ An error occurred: {error}"));
        }
    }
}
