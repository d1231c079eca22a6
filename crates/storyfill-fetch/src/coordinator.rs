use futures::future::join_all;
use storyfill_store::Story;

use crate::error::FetchError;
use crate::fetcher::PageFetcher;

/// What happened to one story during a batch.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The story had no link or already had content.
    Skipped,
    /// Content was replaced with the extracted page text.
    Fetched { chars: usize },
    /// The fetch failed and content was reset to an empty string.
    Failed(FetchError),
}

impl UpdateOutcome {
    #[must_use]
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Per-story outcomes of [`update_all`], in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UpdateOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn fetched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fetched()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}

/// Fill in `story.content` from its linked page if it needs it.
///
/// Failures are logged and leave `content` as an empty string; they are
/// reported through the returned outcome and never propagated.
pub async fn update_one(story: &mut Story, fetcher: &PageFetcher) -> UpdateOutcome {
    let url = match story.url() {
        Some(url) if story.needs_content() => url.to_owned(),
        _ => return UpdateOutcome::Skipped,
    };

    let id = story.id_label();
    tracing::info!("fetching content for story {id} from {url}");

    match fetcher.fetch_text(&url).await {
        Ok(text) => {
            let chars = text.chars().count();
            tracing::debug!(url = %url, chars, "extracted page text");
            story.set_content(text);
            UpdateOutcome::Fetched { chars }
        }
        Err(e) => {
            match &e {
                FetchError::Status { status, .. } => {
                    tracing::warn!("failed to fetch {url}: HTTP {status}");
                }
                other => tracing::warn!("error fetching {url}: {other}"),
            }
            story.set_content(String::new());
            UpdateOutcome::Failed(e)
        }
    }
}

/// Run [`update_one`] for every story at once and wait for all of them.
///
/// Stories are updated in place, so their order never changes. All requests
/// share the connection pool of `fetcher`.
pub async fn update_all(stories: &mut [Story], fetcher: &PageFetcher) -> BatchReport {
    let pending = stories
        .iter_mut()
        .map(|story| update_one(story, fetcher));
    let outcomes = join_all(pending).await;

    let report = BatchReport { outcomes };
    tracing::debug!(
        total = report.total(),
        fetched = report.fetched(),
        failed = report.failed(),
        skipped = report.skipped(),
        "batch complete"
    );
    report
}
