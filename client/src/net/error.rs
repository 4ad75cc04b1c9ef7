//! Error taxonomy for backend requests and local form checks.
//!
//! ERROR HANDLING
//! ==============
//! Every variant is recovered at the panel that issued the request and
//! rendered inline through `Display`. `Cancelled` is the only variant that is
//! never rendered: it marks a request whose consuming view went away or was
//! superseded by a newer load.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Number of body characters kept when a response is not JSON.
pub const SNIPPET_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Backend base URL is not configured. Set PLACIFY_API_BASE_URL and restart.")]
    Config,
    #[error("Server did not return JSON ({status}). {snippet}")]
    NonJsonResponse { status: u16, snippet: String },
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Validation(String),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build a `NonJsonResponse` keeping only the leading part of `body`.
    pub fn non_json(status: u16, body: &str) -> Self {
        Self::NonJsonResponse { status, snippet: body.chars().take(SNIPPET_CHARS).collect() }
    }

    /// Build a `RequestFailed` from an optional server-provided message.
    pub fn request_failed(status: u16, message: Option<&str>) -> Self {
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_owned(),
            _ => format!("HTTP {status}"),
        };
        Self::RequestFailed { status, message }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Message to show in the panel, or `None` for swallowed cancellations.
    pub fn user_message(&self) -> Option<String> {
        if self.is_cancelled() { None } else { Some(self.to_string()) }
    }
}

impl From<&'static str> for ApiError {
    fn from(message: &'static str) -> Self {
        Self::Validation(message.to_owned())
    }
}
