#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("body of {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("text extraction failed: {0}")]
    Extract(String),
}
