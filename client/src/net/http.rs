//! Request building, transport seam, and response interpretation.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` builds an `HttpRequest`, hands it to a `Transport`, and runs
//! the returned `HttpResponse` through `interpret_response`. The browser
//! transport (`GlooTransport`) only moves bytes; every JSON/HTTP decision
//! lives here so it is testable without a browser.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::ApiError;

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUSTER_PARAM: &str = "_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Fully built outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Ask the browser not to serve or store a cached copy.
    pub no_store: bool,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// Explicit cancellation token for one in-flight request.
///
/// Cloned into the spawned task; the owning view flips it on teardown or when
/// a newer request supersedes this one.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once the token has been flipped.
    pub fn check(&self) -> Result<(), ApiError> {
        if self.is_cancelled() { Err(ApiError::Cancelled) } else { Ok(()) }
    }
}

/// Moves an `HttpRequest` over the wire.
///
/// Implementations report transport failures as `ApiError::Network` and
/// never inspect status codes or bodies.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Join `base` and `path`, append `query` pairs and, for GETs, the cache buster.
///
/// # Errors
///
/// Returns `ApiError::Config` when the base is empty or does not form a URL.
pub fn build_url(base: &str, path: &str, query: &[(&str, &str)], cache_buster: Option<i64>) -> Result<String, ApiError> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ApiError::Config);
    }
    let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
    let mut url = url::Url::parse(&format!("{base}{path}")).map_err(|_| ApiError::Config)?;
    if !query.is_empty() || cache_buster.is_some() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
        if let Some(ts) = cache_buster {
            pairs.append_pair(CACHE_BUSTER_PARAM, &ts.to_string());
        }
    }
    Ok(url.into())
}

/// Standard headers: JSON accept, JSON content type when a body is sent, and
/// the bearer token when one is present.
pub fn build_headers(token: Option<&str>, has_body: bool) -> Vec<(String, String)> {
    let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
    if has_body {
        headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
    }
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    headers
}

/// Turn a raw response into parsed JSON or a typed failure.
///
/// The body is parsed only when the declared content type is JSON.
///
/// # Errors
///
/// `NonJsonResponse` for non-JSON or malformed bodies, `RequestFailed` for
/// non-2xx statuses.
pub fn interpret_response(response: &HttpResponse) -> Result<serde_json::Value, ApiError> {
    if !response.is_json() {
        return Err(ApiError::non_json(response.status, &response.body));
    }
    let value: serde_json::Value = if response.body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&response.body).map_err(|_| ApiError::non_json(response.status, &response.body))?
    };
    if !response.is_success() {
        let message = value.get("message").and_then(serde_json::Value::as_str);
        return Err(ApiError::request_failed(response.status, message));
    }
    Ok(value)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Transport used by page components in the current build.
#[cfg(feature = "hydrate")]
pub type BrowserTransport = GlooTransport;
#[cfg(not(feature = "hydrate"))]
pub type BrowserTransport = ServerTransport;

/// Stand-in for server renders, which never fetch; panels load after hydration.
#[cfg(not(feature = "hydrate"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerTransport;

#[cfg(not(feature = "hydrate"))]
impl Transport for ServerTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Network(format!("{} {} is only sent from the browser", request.method.as_str(), request.url)))
    }
}

/// Browser transport backed by `gloo-net` (the Fetch API).
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use gloo_net::http::{Method as FetchMethod, RequestBuilder};

        let method = match request.method {
            Method::Get => FetchMethod::GET,
            Method::Post => FetchMethod::POST,
            Method::Put => FetchMethod::PUT,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if request.no_store {
            builder = builder.cache(web_sys::RequestCache::NoStore);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, content_type, body })
    }
}
