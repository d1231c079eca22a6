//! Story records and the JSON file they live in.

pub mod error;
pub mod file;
pub mod story;

pub use error::StoreError;
pub use file::{load, save};
pub use story::Story;
