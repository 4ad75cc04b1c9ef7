//! Admin withdrawal-request list bound to `GET /withdraw/all`.

#[cfg(test)]
#[path = "withdrawal_table_test.rs"]
mod withdrawal_table_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::net::records::WithdrawalRow;
use crate::state::auth::AuthState;
use crate::state::resource::{RemoteResource, RequestSlot, spawn_load};
use crate::util::ticker::install_visibility_refresh;

/// "Requested By" cell: email, plus the phone when one is known.
pub fn contact_cell(row: &WithdrawalRow) -> String {
    if row.phone.is_empty() { row.email.clone() } else { format!("{} • {}", row.email, row.phone) }
}

pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "approved" | "paid" | "success" | "completed" => "pill pill--success",
        "rejected" | "failed" | "cancelled" => "pill pill--error",
        _ => "pill pill--pending",
    }
}

#[component]
pub fn WithdrawalTable() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let requests = RwSignal::new(RemoteResource::<Vec<WithdrawalRow>>::default());
    let slot = RequestSlot::new();

    let load = {
        let slot = slot.clone();
        move || {
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            spawn_load(requests, &slot, "withdrawals", move |cancel| async move {
                api.fetch_withdrawals(&cancel).await
            });
        }
    };

    load();
    install_visibility_refresh(load);
    on_cleanup(move || slot.cancel());

    let rows = move || requests.with(|r| r.data.clone().unwrap_or_default());
    let is_empty =
        move || requests.with(|r| !r.is_loading() && r.error.is_none() && r.data.as_ref().is_none_or(Vec::is_empty));

    view! {
        <section class="admin-section admin-section--alt" id="withdrawal-requests">
            <div class="admin-section__header">
                <h2>"Withdrawal Request Section"</h2>
            </div>
            <Show when=move || requests.with(|r| r.error.is_some())>
                <div class="status-banner status-banner--error">
                    {move || requests.with(|r| r.error.clone().unwrap_or_default())}
                </div>
            </Show>
            <Show when=move || requests.with(RemoteResource::is_loading)>
                <div class="admin-section__loading">"Loading withdrawal requests..."</div>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Request ID"</th>
                        <th>"Amount"</th>
                        <th>"Status"</th>
                        <th>"Requested By"</th>
                        <th>"Date"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=is_empty>
                        <tr>
                            <td colspan="5">"No withdrawal requests."</td>
                        </tr>
                    </Show>
                    {move || {
                        rows()
                            .into_iter()
                            .map(|row| {
                                let contact = contact_cell(&row);
                                let class = status_class(&row.status);
                                view! {
                                    <tr>
                                        <td>{row.id}</td>
                                        <td>{row.amount}</td>
                                        <td>
                                            <span class=class>{row.status}</span>
                                        </td>
                                        <td>{contact}</td>
                                        <td>{row.date}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
