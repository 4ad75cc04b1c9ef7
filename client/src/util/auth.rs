//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and the session must be restored from storage exactly once per page load.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;
use crate::state::session::{LOGIN_ROUTE, SessionStore};
use crate::util::storage::LocalStorage;

/// The browser's session store; inert during server renders.
pub fn session_store() -> SessionStore<LocalStorage> {
    SessionStore::new(LocalStorage)
}

/// Whether a guarded page should bounce to the login screen.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.session.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Read the persisted session once the app has hydrated.
pub fn install_session_restore(auth: RwSignal<AuthState>) {
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        auth.set(AuthState::restore(&session_store()));
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = auth;
    }
}

/// Forget the session everywhere and return to the login screen.
pub fn sign_out_and_redirect<F>(auth: RwSignal<AuthState>, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    auth.update(|a| a.sign_out(&session_store()));
    navigate(LOGIN_ROUTE, NavigateOptions::default());
}
