use std::path::PathBuf;

use storyfill_fetch::{FetchError, PageFetcher, update_all};
use storyfill_store::StoreError;

use crate::config::Config;

/// Errors that stop a run before the stories file is rewritten.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub total: usize,
    pub fetched: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Load the stories file, fetch content for every story that lacks it, and
/// write the result back to the same file.
///
/// Per-story fetch failures do not fail the run; those stories are saved with
/// empty content.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, the HTTP client
/// cannot be built, or the file cannot be written. Nothing is written when
/// loading fails.
pub async fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let path = config.store.path.as_path();
    let mut stories = storyfill_store::load(path)?;

    let report = {
        let fetcher = PageFetcher::new(&config.fetch)?;
        update_all(&mut stories, &fetcher).await
    };

    storyfill_store::save(path, &stories)?;

    let summary = RunSummary {
        path: path.to_path_buf(),
        total: report.total(),
        fetched: report.fetched(),
        failed: report.failed(),
        skipped: report.skipped(),
    };
    tracing::info!(
        fetched = summary.fetched,
        failed = summary.failed,
        skipped = summary.skipped,
        "updated {} stories in {}",
        summary.total,
        path.display()
    );
    Ok(summary)
}
