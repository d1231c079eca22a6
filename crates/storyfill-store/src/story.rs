use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID_KEY: &str = "id";
const URL_KEY: &str = "url";
const CONTENT_KEY: &str = "content";

/// A single story record.
///
/// Wraps the raw JSON object so that fields this crate does not know about,
/// and the order of all keys, survive a load/save round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Story(Map<String, Value>);

impl Story {
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_KEY)
    }

    /// Link to fetch, if any. Empty strings and non-string values count as absent.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.0
            .get(URL_KEY)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.0.get(CONTENT_KEY).and_then(Value::as_str)
    }

    /// Whether the story links somewhere and has no usable content yet.
    ///
    /// Content counts as missing when the key is absent, `null`, or a string
    /// that is blank after trimming. Any other JSON value counts as present.
    #[must_use]
    pub fn needs_content(&self) -> bool {
        if self.url().is_none() {
            return false;
        }
        match self.0.get(CONTENT_KEY) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    pub fn set_content(&mut self, content: String) {
        self.0.insert(CONTENT_KEY.to_owned(), Value::String(content));
    }

    /// Id rendered for log lines.
    #[must_use]
    pub fn id_label(&self) -> String {
        match self.id() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_owned(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
