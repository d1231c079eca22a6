//! Page fetching, HTML text extraction, and the concurrent story updater.
//!
//! ```text
//! [Story] → update_all ─┬─ update_one → PageFetcher::fetch_text → extract_text
//!                       ├─ update_one → ...
//!                       └─ update_one → ...
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod fetcher;

pub use config::FetchConfig;
pub use coordinator::{BatchReport, UpdateOutcome, update_all, update_one};
pub use error::FetchError;
pub use extract::extract_text;
pub use fetcher::PageFetcher;
