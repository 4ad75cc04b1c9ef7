//! Admin console: platform settings, the user list, and withdrawal requests.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::settings_modal::SettingsModal;
use crate::components::user_table::UserTable;
use crate::components::withdrawal_table::WithdrawalTable;
use crate::state::auth::AuthState;
use crate::state::session::STUDENT_ROUTE;
use crate::util::auth::{install_unauth_redirect, sign_out_and_redirect};

/// Where a signed-in non-admin is sent instead of the console.
pub fn non_admin_redirect(state: &AuthState) -> Option<&'static str> {
    state.session.as_ref().filter(|s| !s.is_admin()).map(|_| STUDENT_ROUTE)
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            if let Some(route) = auth.with(non_admin_redirect) {
                navigate(route, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }

    let settings_open = RwSignal::new(false);
    let on_logout = move |_| sign_out_and_redirect(auth, &navigate);
    let is_admin = move || auth.with(|a| a.session.as_ref().is_some_and(|s| s.is_admin()));

    view! {
        <Show when=is_admin>
            <header class="admin-header">
                <h1 class="admin-header__brand">"PLACIFY CONNECT"</h1>
                <nav class="admin-header__links">
                    <a href="#user-list">"User List"</a>
                    <a href="#withdrawal-requests">"Withdrawal Request"</a>
                </nav>
                <div class="admin-header__actions">
                    <button type="button" on:click=move |_| settings_open.set(true)>
                        "⚙️ Settings"
                    </button>
                    <button type="button" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </div>
            </header>
            <SettingsModal open=settings_open/>
            <UserTable/>
            <WithdrawalTable/>
        </Show>
    }
}
