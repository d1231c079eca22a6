use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::extract::extract_text;

/// HTTP client shared by every fetch in a batch.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// GET `url` and return the decoded body. Only `200 OK` counts as success.
    ///
    /// A body with a declared non-UTF-8 charset is decoded with that charset.
    /// Anything else must be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, transport failure, a non-200 status, or a
    /// body that cannot be read or decoded.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                timeout_or(url, e, |url, source| FetchError::Request { url, source })
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body_error =
            |e: reqwest::Error| timeout_or(url, e, |url, source| FetchError::Body { url, source });

        if declared_charset(resp.headers()).is_some_and(|charset| !is_utf8(&charset)) {
            return resp.text().await.map_err(body_error);
        }

        let bytes = resp.bytes().await.map_err(body_error)?;
        String::from_utf8(bytes.to_vec()).map_err(|source| FetchError::Decode {
            url: url.to_owned(),
            source,
        })
    }

    /// Fetch `url` and reduce the page to its visible text.
    ///
    /// Parsing runs on the blocking pool so large pages do not stall other
    /// in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::fetch_html`], or
    /// [`FetchError::Extract`] if the parsing task panics.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetch_html(url).await?;
        tokio::task::spawn_blocking(move || extract_text(&html))
            .await
            .map_err(|e| FetchError::Extract(e.to_string()))
    }
}

/// Map a timed-out request to [`FetchError::Timeout`], anything else through `other`.
fn timeout_or(
    url: &str,
    e: reqwest::Error,
    other: impl FnOnce(String, reqwest::Error) -> FetchError,
) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_owned(),
        }
    } else {
        other(url.to_owned(), e)
    }
}

/// `charset` parameter of the `Content-Type` header, lowercased.
fn declared_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_ascii_lowercase())
    })
}

fn is_utf8(charset: &str) -> bool {
    matches!(charset, "utf-8" | "utf8")
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&FetchConfig::default()).unwrap()
    }

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type.parse().unwrap());
        headers
    }

    #[test]
    fn declared_charset_variants() {
        assert_eq!(
            declared_charset(&headers("text/html; charset=ISO-8859-1")).as_deref(),
            Some("iso-8859-1")
        );
        assert_eq!(
            declared_charset(&headers("text/html;charset=\"utf-8\"")).as_deref(),
            Some("utf-8")
        );
        assert_eq!(declared_charset(&headers("text/html")), None);
        assert_eq!(declared_charset(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn fetch_html_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;

        let html = fetcher()
            .fetch_html(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[tokio::test]
    async fn fetch_text_extracts_visible_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><script>track()</script></head><body><h1>News</h1><p>Body text</p></body></html>",
            ))
            .mount(&server)
            .await;

        let text = fetcher()
            .fetch_text(&format!("{}/article", server.uri()))
            .await
            .unwrap();
        assert_eq!(text, "News Body text");
    }

    #[tokio::test]
    async fn non_200_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher().fetch_html(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, ref url } if url.ends_with("/missing")));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn other_success_codes_are_not_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = fetcher().fetch_html(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 204, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        let err = fetcher()
            .fetch_html("http://127.0.0.1:1/page")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    #[tokio::test]
    async fn invalid_url_is_request_error() {
        let err = fetcher().fetch_html("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>late</p>")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(&FetchConfig { timeout: 1 }).unwrap();
        let err = fetcher.fetch_html(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn latin1_body_is_decoded_with_declared_charset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                b"<p>caf\xe9 cr\xe8me</p>".to_vec(),
                "text/html; charset=iso-8859-1",
            ))
            .mount(&server)
            .await;

        let text = fetcher().fetch_text(&server.uri()).await.unwrap();
        assert_eq!(text, "café crème");
    }

    #[tokio::test]
    async fn undeclared_charset_is_read_as_utf8() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<p>naïve</p>".as_bytes().to_vec(), "text/html"),
            )
            .mount(&server)
            .await;

        let text = fetcher().fetch_text(&server.uri()).await.unwrap();
        assert_eq!(text, "naïve");
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(b"<p>caf\xe9</p>".to_vec(), "text/html"),
            )
            .mount(&server)
            .await;

        let err = fetcher().fetch_html(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
