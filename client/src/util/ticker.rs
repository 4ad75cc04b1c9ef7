//! Periodic callbacks scoped to the current reactive owner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the navbar clock and the tab-visibility refresh. The loop stops
//! on the next tick after the owning view is cleaned up.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::time::Duration;

/// Run `tick` every `period` until the current owner is disposed.
pub fn install_ticker<F>(period: Duration, tick: F)
where
    F: Fn() + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(period).await;
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
                tick();
            }
        });
        leptos::prelude::on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (period, tick);
    }
}

/// Edge detector for "the tab became visible again".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityTracker {
    was_hidden: bool,
}

impl VisibilityTracker {
    /// Feed the current visibility; `true` exactly once per hidden→visible edge.
    pub fn observe(&mut self, visible: bool) -> bool {
        let regained = visible && self.was_hidden;
        self.was_hidden = !visible;
        regained
    }
}

/// Poll interval for visibility checks.
pub const VISIBILITY_POLL: Duration = Duration::from_millis(750);

/// Call `refresh` whenever the document goes from hidden to visible.
pub fn install_visibility_refresh<F>(refresh: F)
where
    F: Fn() + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let tracker = std::cell::Cell::new(VisibilityTracker::default());
        install_ticker(VISIBILITY_POLL, move || {
            let mut state = tracker.get();
            if state.observe(document_visible()) {
                refresh();
            }
            tracker.set(state);
        });
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = refresh;
    }
}

#[cfg(feature = "hydrate")]
fn document_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_none_or(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
}
