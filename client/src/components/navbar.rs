//! Student navbar: greeting, logout, stats bar and the live IST clock.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the `GET /user/:id/details` resource. The student page bumps
//! `refresh` after a successful application so the counters catch up.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::net::records::{StudentStats, display_number};
use crate::state::auth::AuthState;
use crate::state::resource::{RemoteResource, RequestSlot, spawn_load};
use crate::util::auth::sign_out_and_redirect;
use crate::util::date;
use crate::util::ticker::install_ticker;

/// Daily submission target shown next to today's count.
pub const DAILY_TARGET: u32 = 500;

pub fn welcome_line(display_name: &str) -> String {
    format!("Welcome, {display_name}")
}

pub fn today_label(today: f64) -> String {
    format!("{}/{DAILY_TARGET}", display_number(today))
}

pub fn rupees(amount: f64) -> String {
    format!("₹{}", display_number(amount))
}

/// What the stats request depends on: the student id and bearer token.
/// `None` when no student is signed in.
pub fn stats_key(state: &AuthState) -> Option<(String, Option<String>)> {
    state
        .session
        .as_ref()
        .filter(|s| !s.student_id.is_empty())
        .map(|s| (s.student_id.clone(), s.auth_token.clone()))
}

#[component]
pub fn Navbar(
    refresh: RwSignal<u64>,
    #[prop(into)] on_referral: Callback<()>,
    #[prop(into)] on_withdrawal: Callback<()>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let stats = RwSignal::new(RemoteResource::<StudentStats>::default());
    let slot = RequestSlot::new();
    let clock = RwSignal::new(date::format_ist_clock(chrono::Utc::now()));

    install_ticker(Duration::from_secs(1), move || clock.set(date::format_ist_clock(chrono::Utc::now())));

    // Reward and count updates rewrite the session; only a new student or
    // token should refetch.
    let key = Memo::new(move |_| auth.with(stats_key));
    {
        let slot = slot.clone();
        Effect::new(move || {
            refresh.track();
            let Some((student_id, token)) = key.get() else {
                return;
            };
            let api = browser_api(&config, token);
            spawn_load(stats, &slot, "student stats", move |cancel| async move {
                api.fetch_student_stats(&student_id, &cancel).await
            });
        });
    }
    on_cleanup(move || slot.cancel());

    let name = move || auth.with(|a| a.session.as_ref().map(|s| s.display_name.clone()).unwrap_or_default());
    let value = move |pick: fn(&StudentStats) -> String| {
        move || stats.with(|s| s.data.as_ref().map_or_else(|| "…".to_owned(), pick))
    };

    let on_logout = move |_| sign_out_and_redirect(auth, &navigate);

    view! {
        <header class="navbar">
            <div class="navbar__brand">"Placify Connect"</div>
            <div class="navbar__greeting">{move || welcome_line(&name())}</div>
            <nav class="navbar__links">
                <button type="button" on:click=move |_| on_referral.run(())>
                    "Refer & Earn"
                </button>
                <button type="button" on:click=move |_| on_withdrawal.run(())>
                    "Withdrawal"
                </button>
            </nav>
            <button class="navbar__logout" type="button" on:click=on_logout>
                "Logout"
            </button>
        </header>
        <section class="stats-bar">
            <div class="stats-bar__tile">
                <span class="stats-bar__value">{value(|s| display_number(s.total_entries))}</span>
                <span class="stats-bar__label">"Total Entries"</span>
            </div>
            <div class="stats-bar__tile">
                <span class="stats-bar__value">{value(|s| today_label(s.today_entries))}</span>
                <span class="stats-bar__label">"Today's Entries"</span>
            </div>
            <div class="stats-bar__tile">
                <span class="stats-bar__value">{value(|s| rupees(s.total_earnings))}</span>
                <span class="stats-bar__label">"Total Earnings"</span>
            </div>
            <div class="stats-bar__tile stats-bar__tile--clock">
                <span class="stats-bar__value">{move || clock.get()}</span>
                <span class="stats-bar__label">"IST"</span>
            </div>
            <Show when=move || stats.with(|s| s.error.is_some())>
                <p class="stats-bar__error">{move || stats.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
        </section>
    }
}
