use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stories file: {0}")]
    Parse(#[from] serde_json::Error),
}
