use super::*;
use crate::state::session::Session;

#[test]
fn should_redirect_unauth_when_not_loading_and_session_missing() {
    let state = AuthState { session: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::default()));
}

#[test]
fn should_not_redirect_when_session_exists() {
    let state = AuthState { session: Some(Session::default()), loading: false };
    assert!(!should_redirect_unauth(&state));
}
