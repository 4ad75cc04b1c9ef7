//! Admin user list bound to `GET /user/getallusers`.

#[cfg(test)]
#[path = "user_table_test.rs"]
mod user_table_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::net::records::display_number;
use crate::net::types::UserRecord;
use crate::state::auth::AuthState;
use crate::state::resource::{RemoteResource, RequestSlot, spawn_load};
use crate::util::date::{self, MISSING};
use crate::util::ticker::install_visibility_refresh;

/// Display strings for one user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub key: String,
    pub email: String,
    pub phone: String,
    pub reward: String,
    pub students: String,
    pub referral_code: String,
    pub role: String,
    pub created: String,
}

fn text_or_missing(value: Option<&str>) -> String {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(MISSING).to_owned()
}

fn number_or_missing(value: Option<f64>) -> String {
    value.filter(|v| v.is_finite()).map_or_else(|| MISSING.to_owned(), display_number)
}

impl UserRow {
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            key: user.row_key(),
            email: text_or_missing(user.email.as_deref()),
            phone: text_or_missing(user.phone.as_deref()),
            reward: number_or_missing(user.reward),
            students: number_or_missing(user.student_count),
            referral_code: text_or_missing(user.referral_code.as_deref()),
            role: text_or_missing(user.role.as_deref()),
            created: date::normalize_date(user.created_at.as_ref()),
        }
    }
}

#[component]
pub fn UserTable() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let users = RwSignal::new(RemoteResource::<Vec<UserRecord>>::default());
    let slot = RequestSlot::new();

    let load = {
        let slot = slot.clone();
        move || {
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            spawn_load(users, &slot, "users", move |cancel| async move { api.fetch_users(&cancel).await });
        }
    };

    load();
    install_visibility_refresh(load.clone());
    on_cleanup(move || slot.cancel());

    let rows = move || {
        users.with(|r| r.data.as_deref().unwrap_or_default().iter().map(UserRow::from_record).collect::<Vec<_>>())
    };
    let is_empty = move || users.with(|r| !r.is_loading() && r.error.is_none() && r.data.as_ref().is_none_or(Vec::is_empty));

    view! {
        <section class="admin-section" id="user-list">
            <div class="admin-section__header">
                <h2>"User List Section"</h2>
                <button type="button" class="admin-section__refresh" title="Refresh" on:click=move |_| load()>
                    "Refresh"
                </button>
            </div>
            <Show when=move || users.with(|r| r.error.is_some())>
                <div class="status-banner status-banner--error">
                    {move || users.with(|r| r.error.clone().unwrap_or_default())}
                    <button type="button" on:click=move |_| users.update(RemoteResource::dismiss_error)>"×"</button>
                </div>
            </Show>
            <Show when=move || users.with(RemoteResource::is_loading)>
                <div class="admin-section__loading">"Loading users..."</div>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"Reward"</th>
                        <th>"Students"</th>
                        <th>"Referral Code"</th>
                        <th>"Role"</th>
                        <th>"Created"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=is_empty>
                        <tr>
                            <td colspan="7">"No users found."</td>
                        </tr>
                    </Show>
                    <For each=rows key=|row| row.key.clone() let:row>
                        <tr>
                            <td class="admin-table__primary">{row.email}</td>
                            <td>{row.phone}</td>
                            <td>{row.reward}</td>
                            <td>{row.students}</td>
                            <td>{row.referral_code}</td>
                            <td>{row.role}</td>
                            <td>{row.created}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </section>
    }
}
