//! Host configuration parsed from environment variables.
//!
//! Read after `dotenvy::dotenv()`, so a local `.env` file works too:
//! - `PORT`: listen port, default 3000
//! - `PLACIFY_API_BASE_URL`: backend the browser talks to; unset leaves
//!   every panel reporting a configuration error
//! - `PLACIFY_REFERRAL_FORM_URL`: optional external registration form

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::config::ClientConfig;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Handed to every server render and embedded in the page.
    pub client: ClientConfig,
}

impl HostConfig {
    /// # Errors
    ///
    /// Returns `InvalidPort` when `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `InvalidPort` when `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| HostError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let client = ClientConfig::new(
            lookup("PLACIFY_API_BASE_URL").as_deref(),
            lookup("PLACIFY_REFERRAL_FORM_URL").as_deref(),
        );
        Ok(Self { port, client })
    }
}
