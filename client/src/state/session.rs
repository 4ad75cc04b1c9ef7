//! Logged-in identity and its persistence lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login builds a `Session` from the backend response, `SessionStore` is the
//! only writer of the persisted copy, and pages read it from a Leptos
//! context signal. Logout clears both.
//!
//! DESIGN
//! ======
//! The whole session is stored as one JSON value under `SESSION_KEY` so a
//! partial write can never leave a half-logged-in browser behind.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::net::types::LoginResponse;
use crate::util::storage::{self, KeyValueStore};

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "placify.session";

pub const ADMIN_EMAIL: &str = "admin@placify-connect.com";
pub const ADMIN_PHONE: &str = "9087654321";

pub const LOGIN_ROUTE: &str = "/login";
pub const STUDENT_ROUTE: &str = "/student";
pub const ADMIN_ROUTE: &str = "/admin";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub email: String,
    pub phone: String,
    /// Backend id of the logged-in student; empty for accounts without one.
    pub student_id: String,
    pub auth_token: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub student_count: Option<f64>,
    #[serde(default)]
    pub reward: Option<f64>,
    /// Whether the credentials typed at login were the admin pair. The
    /// server's echo of email/phone may be normalized, so it is not used.
    #[serde(default)]
    pub admin: bool,
}

impl Session {
    /// Build a session from a successful login, preferring the server's
    /// echo of email/phone over what was typed for display. Routing keys
    /// off the typed pair.
    pub fn from_login(email: &str, phone: &str, response: &LoginResponse) -> Self {
        let admin = is_admin_credentials(email, phone);
        let user = response.user.clone().unwrap_or_default();
        let email = user.email.filter(|e| !e.trim().is_empty()).unwrap_or_else(|| email.to_owned());
        let phone = user.phone.filter(|p| !p.trim().is_empty()).unwrap_or_else(|| phone.to_owned());
        Self {
            display_name: display_name_from_email(&email),
            email,
            phone,
            student_id: user.id.unwrap_or_default(),
            auth_token: response.token.clone().filter(|t| !t.trim().is_empty()),
            referral_code: user.referral_code.filter(|c| !c.trim().is_empty()),
            student_count: user.student_count,
            reward: user.reward,
            admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn landing_route(&self) -> &'static str {
        if self.admin { ADMIN_ROUTE } else { STUDENT_ROUTE }
    }

    /// Available withdrawal balance; zero when the backend never reported one.
    pub fn balance(&self) -> f64 {
        self.reward.filter(|r| r.is_finite()).unwrap_or(0.0)
    }
}

/// Human name from an email local part: `john.doe_x@...` becomes `John Doe X`.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|w| !w.trim().is_empty())
        .map(capitalize)
        .collect();
    let name = words.join(" ");
    let name = name.trim();
    if name.is_empty() { "User".to_owned() } else { name.to_owned() }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_admin_credentials(email: &str, phone: &str) -> bool {
    email == ADMIN_EMAIL && phone == ADMIN_PHONE
}

/// Route to open after login for the given credentials.
pub fn landing_route(email: &str, phone: &str) -> &'static str {
    if is_admin_credentials(email, phone) { ADMIN_ROUTE } else { STUDENT_ROUTE }
}

/// Single owner of the persisted session.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Persisted session, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<Session> {
        storage::load_json(&self.backend, SESSION_KEY)
    }

    pub fn save(&self, session: &Session) {
        storage::save_json(&self.backend, SESSION_KEY, session);
    }

    pub fn clear(&self) {
        self.backend.remove(SESSION_KEY);
    }

    /// Apply `f` to the stored session and persist the result.
    pub fn update(&self, f: impl FnOnce(&mut Session)) -> Option<Session> {
        let mut session = self.load()?;
        f(&mut session);
        self.save(&session);
        Some(session)
    }
}
