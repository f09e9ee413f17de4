//! Authenticated REST gateway
//!
//! Every GitHub call in the crate goes through [`Gateway`]: it resolves a
//! path fragment against the configured repository (absolute URLs are used
//! verbatim), attaches the `Authorization: token ...` header, checks the
//! status code and parses the body as JSON. An empty body parses to `{}`.
//!
//! Timeouts are about progress, not total duration: a transfer of any length
//! succeeds as long as bytes keep arriving within the idle limit.

use crate::github::error::{GitHubError, GitHubResult};
use bytes::Bytes;
use futures::StreamExt;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Media type GitHub recommends for REST calls
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Media type for raw asset bodies
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Transport options forwarded to the HTTP client for one call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Extra headers; these override the gateway defaults
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Plain GET
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }

    /// DELETE without body
    #[must_use]
    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::get()
        }
    }

    /// POST with a binary body
    #[must_use]
    pub fn post(body: impl Into<Bytes>) -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self::get()
    }
}

/// HTTP transport bound to one repository and one token
pub struct Gateway {
    http: reqwest::Client,
    repo_url: String,
    token: String,
    idle_timeout: Option<Duration>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("repo_url", &self.repo_url)
            .field("token", &"<redacted>")
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create a gateway for `<api_base>/repos/<owner>/<repo>`
    pub(crate) fn new(
        http: reqwest::Client,
        api_base: &str,
        owner: &str,
        repo: &str,
        token: String,
        idle_timeout: Option<Duration>,
    ) -> Self {
        let repo_url = format!("{}/repos/{owner}/{repo}", api_base.trim_end_matches('/'));
        Self {
            http,
            repo_url,
            token,
            idle_timeout,
        }
    }

    /// Resolve a path fragment or absolute URL to the URL that is requested
    #[must_use]
    pub fn resolve(&self, path_or_url: &str) -> String {
        resolve_url(&self.repo_url, path_or_url)
    }

    /// Issue a request and parse the response body as JSON
    pub async fn call(&self, path_or_url: &str, request: ApiRequest) -> GitHubResult<Value> {
        let body = self.call_raw(path_or_url, request).await?;
        parse_body(&body)
    }

    /// Issue a request and return the raw response body
    pub async fn call_raw(&self, path_or_url: &str, request: ApiRequest) -> GitHubResult<Bytes> {
        let response = self.send(path_or_url, request).await?;
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = self.idle(stream.next()).await? {
            body.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(body))
    }

    /// Issue a request and stream the response body into `dest`.
    ///
    /// The body is written to a temporary file next to `dest` and renamed over
    /// it once complete, so an interrupted transfer never leaves a truncated
    /// `dest`. Returns the number of bytes written.
    pub async fn download_to(
        &self,
        path_or_url: &str,
        request: ApiRequest,
        dest: &Path,
    ) -> GitHubResult<u64> {
        let response = self.send(path_or_url, request).await?;

        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        let (file, temp_path) = tempfile::NamedTempFile::new_in(&dir)?.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = self.idle(stream.next()).await? {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        temp_path.persist(dest).map_err(std::io::Error::from)?;
        Ok(written)
    }

    async fn send(&self, path_or_url: &str, request: ApiRequest) -> GitHubResult<Response> {
        let url = self.resolve(path_or_url);
        debug!("{} {url}", request.method);

        let headers = self.headers(&request.headers)?;
        let has_body = request.body.is_some();
        let mut builder = self.http.request(request.method, &url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // An upload's response only starts once the whole body is sent, so
        // waiting for it is bounded by the connection, not the idle limit.
        let response = if has_body {
            builder.send().await?
        } else {
            self.idle(builder.send()).await??
        };
        check_status(response).await
    }

    /// Await one step of a transfer, failing with [`GitHubError::Stalled`]
    /// when it makes no progress within the idle limit.
    async fn idle<T>(&self, step: impl Future<Output = T>) -> GitHubResult<T> {
        match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, step)
                .await
                .map_err(|_| GitHubError::Stalled(limit)),
            None => Ok(step.await),
        }
    }

    fn headers(&self, extra: &[(String, String)]) -> GitHubResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let mut auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| GitHubError::InvalidInput("token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GitHubError::InvalidInput(format!("header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GitHubError::InvalidInput(format!("header value {value:?}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Join a path fragment onto `base`, or pass an absolute URL through.
#[must_use]
pub fn resolve_url(base: &str, path_or_url: &str) -> String {
    if path_or_url.starts_with("https://") || path_or_url.starts_with("http://") {
        path_or_url.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path_or_url.trim_start_matches('/')
        )
    }
}

/// Parse a response body, treating an empty body as `{}`.
pub fn parse_body(body: &[u8]) -> GitHubResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_slice(body)?)
}

/// Extract GitHub's `message` from an error body, falling back to the raw text.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

async fn check_status(response: Response) -> GitHubResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = status == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v.as_bytes() == b"0");
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    Err(match status {
        StatusCode::NOT_FOUND => GitHubError::NotFound(format!("{url}: {message}")),
        StatusCode::UNAUTHORIZED => GitHubError::AuthRequired,
        _ if rate_limited => GitHubError::RateLimitExceeded,
        _ => GitHubError::Status {
            status: status.as_u16(),
            message,
        },
    })
}
