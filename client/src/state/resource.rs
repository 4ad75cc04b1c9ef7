//! Remote-resource state shared by every data-bound panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! A panel owns one `RemoteResource<T>` signal and one `RequestSlot` per
//! collection it shows. `spawn_load` drives the whole lifecycle: supersede
//! the previous request, flip to `Loading`, await the typed call, and
//! settle the outcome unless the request was cancelled in the meantime.
//!
//! DESIGN
//! ======
//! `data` is only ever replaced wholesale by a successful response. A
//! failed refresh records the error but keeps the stale data visible.
//! Cancellation is not an error and leaves the resource untouched.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::net::http::CancelToken;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResourcePhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RemoteResource<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub phase: ResourcePhase,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self { data: None, error: None, phase: ResourcePhase::Idle }
    }
}

impl<T> RemoteResource<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == ResourcePhase::Loading
    }

    /// Enter `Loading`, keeping whatever data is already shown.
    pub fn begin(&mut self) {
        self.phase = ResourcePhase::Loading;
        self.error = None;
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// Returns `false` (and changes nothing) when the request was cancelled,
    /// either through the token or by an `ApiError::Cancelled` result.
    pub fn settle(&mut self, token: &CancelToken, result: Result<T, ApiError>) -> bool {
        if token.is_cancelled() {
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.phase = ResourcePhase::Ready;
            }
            Err(ApiError::Cancelled) => return false,
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = ResourcePhase::Errored;
            }
        }
        true
    }

    /// Replace the data after a successful mutation elsewhere.
    pub fn replace(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.phase = ResourcePhase::Ready;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// One in-flight request per resource; starting a new one cancels the old.
#[derive(Clone, Debug, Default)]
pub struct RequestSlot {
    current: Arc<Mutex<Option<CancelToken>>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous request (if any) and hand out a fresh token.
    pub fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel whatever is in flight; used on view teardown.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().unwrap_or_else(PoisonError::into_inner).take() {
            token.cancel();
        }
    }
}

/// Start (or restart) loading `resource` through `load`.
///
/// Only runs the request in the browser; during SSR the resource stays in
/// `Loading` and the hydrated client issues the real fetch.
pub fn spawn_load<T, F, Fut>(resource: RwSignal<RemoteResource<T>>, slot: &RequestSlot, label: &'static str, load: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(CancelToken) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let token = slot.begin();
    resource.update(RemoteResource::begin);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = load(token.clone()).await;
        match &result {
            Err(e) if e.is_cancelled() || token.is_cancelled() => leptos::logging::log!("{label}: request cancelled"),
            Err(e) => leptos::logging::warn!("{label}: {e}"),
            Ok(_) => {}
        }
        resource.update(|r| {
            r.settle(&token, result);
        });
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, label, load);
    }
}
