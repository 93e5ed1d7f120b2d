//! Linear fetch → save raw → clean → shuffle driver with stage reporting.

use std::fmt;

use redsift_core::{FetchSettings, StagePaths};
use redsift_reddit::{BlockingClient, SourceClient};
use thiserror::Error;

use crate::error::PipelineError;
use crate::fetch::fetch_posts;
use crate::normalize::normalize;
use crate::shuffle::shuffle_file;
use crate::table::{map_columns, save_records};

/// Driver states, in the only order they can occur.
///
/// `Init`, `Cleaned`, and `Done` are resting states: they are reported on
/// entry and run nothing. Every other state runs one action on entry. A failed
/// action stops the run at that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Fetching,
    RawSaved,
    Cleaning,
    Cleaned,
    Shuffling,
    Done,
}

impl PipelineState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Fetching => "fetching",
            PipelineState::RawSaved => "raw_saved",
            PipelineState::Cleaning => "cleaning",
            PipelineState::Cleaned => "cleaned",
            PipelineState::Shuffling => "shuffling",
            PipelineState::Done => "done",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives stage transitions from the driver. All methods default to no-ops.
///
/// Resting states only ever see `on_stage_enter`.
pub trait StageObserver {
    fn on_stage_enter(&mut self, _state: PipelineState) {}
    fn on_stage_success(&mut self, _state: PipelineState) {}
    fn on_stage_failure(&mut self, _state: PipelineState, _error: &PipelineError) {}
}

impl StageObserver for () {}

/// Counts reported by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    pub records_fetched: usize,
    pub rows_cleaned: usize,
    pub rows_shuffled: usize,
}

/// A run that stopped in `state`. Stage files written before it are kept.
#[derive(Debug, Error)]
#[error("pipeline failed at stage {state}: {error}")]
pub struct PipelineFailure {
    pub state: PipelineState,
    #[source]
    pub error: PipelineError,
}

fn finish<T, O: StageObserver + ?Sized>(
    observer: &mut O,
    state: PipelineState,
    result: Result<T, PipelineError>,
) -> Result<T, PipelineFailure> {
    match result {
        Ok(value) => {
            observer.on_stage_success(state);
            Ok(value)
        }
        Err(error) => {
            tracing::error!(stage = %state, error = %error, "pipeline stage failed");
            observer.on_stage_failure(state, &error);
            Err(PipelineFailure { state, error })
        }
    }
}

/// Runs every stage for `term`, overwriting the three stage files.
///
/// The observer sees `Init` first and `Done` last on success. On failure no
/// stage file written so far is removed.
///
/// # Errors
///
/// Returns a [`PipelineFailure`] naming the first stage whose action failed.
pub async fn run_pipeline<S, O>(
    source: &S,
    term: &str,
    settings: &FetchSettings,
    paths: &StagePaths,
    observer: &mut O,
) -> Result<PipelineReport, PipelineFailure>
where
    S: SourceClient + ?Sized,
    O: StageObserver + ?Sized,
{
    observer.on_stage_enter(PipelineState::Init);

    observer.on_stage_enter(PipelineState::Fetching);
    let fetched = fetch_posts(source, term, settings).await;
    let records = finish(observer, PipelineState::Fetching, fetched)?;

    observer.on_stage_enter(PipelineState::RawSaved);
    let saved = save_records(&records, &paths.raw);
    finish(observer, PipelineState::RawSaved, saved)?;
    tracing::info!(path = %paths.raw.display(), records = records.len(), "raw stage saved");

    observer.on_stage_enter(PipelineState::Cleaning);
    let cleaned = map_columns(&paths.raw, &paths.cleaned, normalize);
    let rows_cleaned = finish(observer, PipelineState::Cleaning, cleaned)?;
    tracing::info!(path = %paths.cleaned.display(), rows = rows_cleaned, "cleaned stage saved");
    observer.on_stage_enter(PipelineState::Cleaned);

    observer.on_stage_enter(PipelineState::Shuffling);
    let shuffled = shuffle_file(&paths.cleaned, &paths.shuffled);
    let rows_shuffled = finish(observer, PipelineState::Shuffling, shuffled)?;
    tracing::info!(path = %paths.shuffled.display(), rows = rows_shuffled, "shuffled stage saved");

    observer.on_stage_enter(PipelineState::Done);
    Ok(PipelineReport {
        records_fetched: records.len(),
        rows_cleaned,
        rows_shuffled,
    })
}

/// [`run_pipeline`] driven to completion on the client's own runtime.
///
/// # Errors
///
/// Same as [`run_pipeline`].
pub fn run_pipeline_blocking<S, O>(
    client: &BlockingClient<S>,
    term: &str,
    settings: &FetchSettings,
    paths: &StagePaths,
    observer: &mut O,
) -> Result<PipelineReport, PipelineFailure>
where
    S: SourceClient,
    O: StageObserver + ?Sized,
{
    client.block_on(run_pipeline(client.inner(), term, settings, paths, observer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl StageObserver for Recorder {
        fn on_stage_enter(&mut self, state: PipelineState) {
            self.0.push(format!("enter {state}"));
        }
        fn on_stage_success(&mut self, state: PipelineState) {
            self.0.push(format!("ok {state}"));
        }
        fn on_stage_failure(&mut self, state: PipelineState, _error: &PipelineError) {
            self.0.push(format!("fail {state}"));
        }
    }

    #[test]
    fn finish_reports_success() {
        let mut recorder = Recorder::default();
        let value = finish(&mut recorder, PipelineState::Cleaning, Ok(3)).unwrap();
        assert_eq!(value, 3);
        assert_eq!(recorder.0, vec!["ok cleaning"]);
    }

    #[test]
    fn finish_wraps_error_with_state() {
        let mut recorder = Recorder::default();
        let result: Result<(), _> = finish(
            &mut recorder,
            PipelineState::Fetching,
            Err(PipelineError::InvalidArgument("empty".into())),
        );
        let failure = result.unwrap_err();
        assert_eq!(failure.state, PipelineState::Fetching);
        assert_eq!(recorder.0, vec!["fail fetching"]);
        assert_eq!(
            failure.to_string(),
            "pipeline failed at stage fetching: invalid argument: empty"
        );
    }
}
