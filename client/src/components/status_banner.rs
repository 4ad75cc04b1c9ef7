//! Inline status line shared by every form and resource panel.
//!
//! Errors stay until dismissed or replaced; successes clear themselves.

#[cfg(test)]
#[path = "status_banner_test.rs"]
mod status_banner_test;

use leptos::prelude::*;

use crate::net::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }

    /// `None` for cancellations, which are never shown.
    pub fn from_api_error(err: &ApiError) -> Option<Self> {
        err.user_message().map(Self::error)
    }

    /// Server message when it sent one, else `fallback`.
    pub fn success_or(message: Option<&str>, fallback: &str) -> Self {
        let text = message.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(fallback);
        Self::success(text)
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            StatusKind::Success => "status-banner status-banner--success",
            StatusKind::Error => "status-banner status-banner--error",
        }
    }
}

/// Show a success message and clear it after `ms`, unless something newer
/// replaced it meanwhile.
pub fn flash_success(status: RwSignal<Option<StatusMessage>>, message: StatusMessage, ms: u32) {
    status.set(Some(message.clone()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(ms).await;
        status.update(|current| {
            if current.as_ref() == Some(&message) {
                *current = None;
            }
        });
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ms;
    }
}

/// Render an error (if any) into `status`; cancellations are dropped.
pub fn report_error(status: RwSignal<Option<StatusMessage>>, err: &ApiError) {
    if let Some(message) = StatusMessage::from_api_error(err) {
        leptos::logging::warn!("{}", message.text);
        status.set(Some(message));
    }
}

#[component]
pub fn StatusBanner(status: RwSignal<Option<StatusMessage>>) -> impl IntoView {
    move || {
        status.get().map(|message| {
            let class = message.css_class();
            view! {
                <div class=class role="status">
                    <span>{message.text}</span>
                    <button class="status-banner__dismiss" type="button" on:click=move |_| status.set(None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
