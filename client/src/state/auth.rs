//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and session-aware components (navbar, referral and
//! withdrawal panels) to coordinate login redirects and identity-dependent
//! rendering. The persisted copy is owned by `SessionStore`; this state is
//! the in-memory mirror every page reads through context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::{Session, SessionStore};
use crate::util::storage::KeyValueStore;

/// Authentication state tracking the current session and restore status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// `true` until the persisted session has been read. Server renders and
    /// the first hydrated frame stay in this state.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true }
    }
}

impl AuthState {
    /// State after reading whatever the store holds.
    pub fn restore<S: KeyValueStore>(store: &SessionStore<S>) -> Self {
        Self { session: store.load(), loading: false }
    }

    pub fn sign_in<S: KeyValueStore>(&mut self, store: &SessionStore<S>, session: Session) {
        store.save(&session);
        self.session = Some(session);
        self.loading = false;
    }

    pub fn sign_out<S: KeyValueStore>(&mut self, store: &SessionStore<S>) {
        store.clear();
        self.session = None;
        self.loading = false;
    }

    /// Mutate the live session and persist the result.
    pub fn update_session<S: KeyValueStore>(&mut self, store: &SessionStore<S>, f: impl FnOnce(&mut Session)) {
        if let Some(session) = self.session.as_mut() {
            f(session);
            store.save(session);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.auth_token.clone())
    }
}
