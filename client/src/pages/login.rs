//! Login page: email + phone credentials against `POST /user/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::net::types::LoginRequest;
use crate::state::auth::AuthState;
use crate::state::session::Session;
use crate::util::auth::session_store;

/// Trim both credentials and require each one.
///
/// # Errors
///
/// A message for the first missing credential.
pub fn validate_login(email: &str, phone: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    let phone = phone.trim();
    if email.is_empty() {
        return Err("Please enter your email.");
    }
    if phone.is_empty() {
        return Err("Please enter your phone number.");
    }
    Ok(LoginRequest { email: email.to_owned(), phone: phone.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Signing in, or arriving with a restored session, leaves the form.
    Effect::new(move || {
        let target = auth.with(|a| a.session.as_ref().map(Session::landing_route));
        if let Some(route) = target {
            navigate(route, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login(&email.get_untracked(), &phone.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);
        let api = browser_api(&config, None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let cancel = crate::net::http::CancelToken::new();
            match api.login(&credentials, &cancel).await {
                Ok(resp) => {
                    let session = Session::from_login(&credentials.email, &credentials.phone, &resp);
                    leptos::logging::log!("login: signed in as {}", session.display_name);
                    auth.update(|a| a.sign_in(&session_store(), session));
                }
                Err(e) => {
                    leptos::logging::warn!("login failed: {e}");
                    error.set(e.to_string());
                }
            }
            busy.set(false);
        });

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, credentials, session_store);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__header">
                    <h2>"Login Form"</h2>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="Email (e.g., sumit@placify-connect.com)"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="tel"
                        placeholder="Phone (Enter admin phone or your phone)"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Log In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
