use std::path::Path;

use crate::{Story, StoreError};

/// Read every story from the JSON array at `path`.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the file does not exist,
/// [`StoreError::Parse`] if it is not a JSON array of objects, and
/// [`StoreError::Io`] if it cannot be read.
pub fn load(path: &Path) -> Result<Vec<Story>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let stories: Vec<Story> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = stories.len(), "loaded stories");
    Ok(stories)
}

/// Overwrite `path` with `stories` as a pretty-printed JSON array.
///
/// Output uses two-space indentation and keeps non-ASCII characters as-is.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(path: &Path, stories: &[Story]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(stories)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), count = stories.len(), "saved stories");
    Ok(())
}
