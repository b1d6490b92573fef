//! Minimal HTTP client with safe logging, retries, and flexible auth.
//!
//! - Request options: headers, `Auth`, timeout, retries
//! - Retries network failures and 429/5xx with exponential backoff and
//!   `Retry-After` support
//! - Never logs secret values; only the auth kind (bearer/header/none)
//! - JSON helpers for API clients, a text helper for fetching pages
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), gauge_http::HttpError> {
//! let client = gauge_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", gauge_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Authentication strategies supported by the HTTP client helpers.
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Custom header auth
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    None,
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use gauge_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     retries: Some(1),
///     auth: Some(Auth::Bearer("token")),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(!opts.allow_absolute);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

#[derive(Clone)]
pub struct HttpClient {
    base: Option<Url>,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use gauge_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let mut client = Self::unanchored()?;
        client.base = Some(base);
        Ok(client)
    }

    /// Construct a client with no base URL; every request must then pass an
    /// absolute URL with `allow_absolute` set. Used for fetching arbitrary
    /// pages rather than talking to one API.
    pub fn unanchored() -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base: None,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget returned by [`HttpClient::new`].
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET a JSON document with per-request options.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let (bytes, _status) = self
            .request_bytes::<()>(Method::GET, path, None, opts)
            .await?;
        decode_json(&bytes)
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (bytes, _status) = self
            .request_bytes(Method::POST, path, Some(body), opts)
            .await?;
        decode_json(&bytes)
    }

    /// GET a response body as text (e.g. an HTML page).
    pub async fn get_text(&self, path: &str, opts: RequestOpts<'_>) -> Result<String, HttpError> {
        let (bytes, _status) = self
            .request_bytes::<()>(Method::GET, path, None, opts)
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn resolve(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        match &self.base {
            Some(base) => base.join(path).map_err(|e| HttpError::Url(e.to_string())),
            None => Err(HttpError::Url(format!(
                "relative path without a base URL: {path}"
            ))),
        }
    }

    /// Core send loop: builds the request, retries transient failures, and
    /// hands back the response bytes on success.
    async fn request_bytes<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: RequestOpts<'_>,
    ) -> Result<(Vec<u8>, StatusCode), HttpError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path, opts.allow_absolute)?;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let auth_kind = match &opts.auth {
            Some(Auth::Bearer(_)) => "bearer",
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };

        let mut attempt = 0usize;
        loop {
            let mut rb = self.inner.request(method.clone(), url.clone()).timeout(timeout);

            if let Some(b) = body {
                rb = rb.json(b);
            }
            if let Some(hdrs) = &opts.headers {
                rb = rb.headers(hdrs.clone());
            }
            match &opts.auth {
                Some(Auth::Bearer(tok)) => {
                    rb = rb.bearer_auth(sanitize_api_key(tok)?);
                }
                Some(Auth::Header { name, value }) => {
                    rb = rb.header(name, value);
                }
                Some(Auth::None) | None => {}
            }

            tracing::debug!(
                attempt = attempt + 1,
                max_retries,
                method = %method,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                timeout_ms = timeout.as_millis() as u64,
                auth_kind,
                has_body = body.is_some(),
                "http.request.start"
            );

            let started = std::time::Instant::now();
            let sent = rb.send().await;
            let (status, headers, read) = match sent {
                Ok(resp) => {
                    let status = resp.status();
                    let headers = resp.headers().clone();
                    (status, headers, resp.bytes().await)
                }
                Err(err) => {
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %err,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(attempt, max_retries, message = %err, "http.network_error");
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let bytes = match read {
                Ok(b) => b.to_vec(),
                Err(err) => {
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %err,
                            "http.retrying.body"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            tracing::debug!(
                %status,
                duration_ms = started.elapsed().as_millis() as u64,
                body_len = bytes.len(),
                "http.response"
            );

            if status.is_success() {
                return Ok((bytes, status));
            }

            let snippet = snip_body(&bytes);
            let message = extract_error_message(&bytes);

            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < max_retries {
                attempt += 1;
                let delay = match retry_after_delay_secs(&headers) {
                    Some(secs) => Duration::from_secs(secs),
                    None => {
                        let exp = backoff_delay(attempt);
                        if status == StatusCode::TOO_MANY_REQUESTS {
                            // default floor for 429 when no Retry-After is present
                            exp.max(Duration::from_millis(1100))
                        } else {
                            exp
                        }
                    }
                };
                tracing::warn!(
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    message = %message,
                    body_snippet = %snippet,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(%status, message = %message, body_snippet = %snippet, "http.error");
            return Err(HttpError::Api { status, message });
        }
    }
}

fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice::<T>(bytes).map_err(|e| {
        let snippet = snip_body(bytes);
        tracing::warn!(
            serde_err = %e,
            body_snippet = %snippet,
            "http.response.decode_error"
        );
        HttpError::Decode(e.to_string(), snippet)
    })
}

/// Pull a human-readable message out of the common error envelopes:
/// OpenAI-style `{"error":{"message":...}}` and the generic
/// `{"message"|"detail"|"error": ...}` shapes.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct Nested {
        error: NestedDetail,
    }
    #[derive(serde::Deserialize)]
    struct NestedDetail {
        message: String,
    }
    #[derive(serde::Deserialize)]
    struct Flat {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<Nested>(body) {
        return env.error.message;
    }
    if let Ok(m) = serde_json::from_slice::<Flat>(body) {
        for candidate in [m.message, m.detail, m.error] {
            if !candidate.is_empty() {
                return candidate;
            }
        }
    }
    snip_body(body)
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // Validate header value upfront for clear errors
    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_nested_envelope() {
        let body = br#"{"error":{"message":"model overloaded"}}"#;
        assert_eq!(extract_error_message(body), "model overloaded");
    }

    #[test]
    fn error_message_from_flat_shapes() {
        assert_eq!(
            extract_error_message(br#"{"detail":"no such scrape"}"#),
            "no such scrape"
        );
        assert_eq!(
            extract_error_message(br#"{"error":"bad api key"}"#),
            "bad api key"
        );
    }

    #[test]
    fn error_message_falls_back_to_snippet() {
        assert_eq!(extract_error_message(b"gateway timeout"), "gateway timeout");
    }

    #[test]
    fn sanitize_strips_whitespace_and_quotes() {
        assert_eq!(sanitize_api_key(" \"sk-abc\n\" ").unwrap(), "sk-abc");
    }

    #[test]
    fn sanitize_rejects_control_bytes() {
        assert!(sanitize_api_key("sk-\x01abc").is_err());
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(2), Duration::from_millis(400));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
    }
}
