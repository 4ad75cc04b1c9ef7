//! Student withdrawal request form.

#[cfg(test)]
#[path = "withdrawal_panel_test.rs"]
mod withdrawal_panel_test;

use leptos::prelude::*;

use crate::components::navbar::rupees;
use crate::components::status_banner::{StatusBanner, StatusMessage, flash_success, report_error};
use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::state::auth::AuthState;
use crate::state::forms::{MIN_WITHDRAWAL, SUCCESS_STATUS_MS, WithdrawalDraft};
use crate::state::resource::RequestSlot;

pub fn withdrawal_rules() -> [String; 4] {
    [
        format!("Minimum withdrawal {}", rupees(MIN_WITHDRAWAL)),
        "Requests are processed within 24–48 hours".to_owned(),
        "Make sure your UPI ID is correct".to_owned(),
        "A service fee may apply depending on the channel".to_owned(),
    ]
}

#[component]
pub fn WithdrawalPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();

    let draft = RwSignal::new(WithdrawalDraft::default());
    let status = RwSignal::new(None::<StatusMessage>);
    let busy = RwSignal::new(false);
    let slot = RequestSlot::new();
    {
        let slot = slot.clone();
        on_cleanup(move || slot.cancel());
    }

    let balance = move || auth.with(|a| a.session.as_ref().map_or(0.0, |s| s.balance()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let payload = match draft.with_untracked(WithdrawalDraft::validate) {
            Ok(payload) => payload,
            Err(message) => {
                status.set(Some(StatusMessage::error(message)));
                return;
            }
        };
        status.set(None);
        busy.set(true);
        let api = browser_api(&config, auth.with_untracked(AuthState::token));
        let cancel = slot.begin();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match api.request_withdrawal(&payload, &cancel).await {
                Ok(resp) => {
                    draft.set(WithdrawalDraft::default());
                    flash_success(
                        status,
                        StatusMessage::success_or(resp.message.as_deref(), "Withdrawal request submitted successfully."),
                        SUCCESS_STATUS_MS,
                    );
                }
                Err(e) => report_error(status, &e),
            }
            busy.set(false);
        });

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, cancel, payload);
        }
    };

    view! {
        <section class="withdrawal-panel" id="withdrawal">
            <div class="withdrawal-panel__header">
                <h2>"💳 Withdrawal"</h2>
                <p>"Submit your withdrawal request"</p>
            </div>
            <div class="withdrawal-panel__info">
                <div class="withdrawal-panel__tile">
                    <p>"Available balance"</p>
                    <p class="withdrawal-panel__value">{move || rupees(balance())}</p>
                </div>
                <div class="withdrawal-panel__tile">
                    <p>"Withdrawal limit"</p>
                    <p class="withdrawal-panel__value">{format!("Min {}", rupees(MIN_WITHDRAWAL))}</p>
                </div>
            </div>
            <ul class="withdrawal-panel__rules">
                {withdrawal_rules().into_iter().map(|rule| view! { <li>{rule}</li> }).collect_view()}
            </ul>
            <StatusBanner status=status/>
            <form class="withdrawal-panel__form" on:submit=on_submit>
                <label>
                    "Name *"
                    <input
                        type="text"
                        placeholder="Enter your full name"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "UPI ID *"
                    <input
                        type="text"
                        placeholder="e.g., name@upi"
                        prop:value=move || draft.with(|d| d.upi_id.clone())
                        on:input=move |ev| draft.update(|d| d.upi_id = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Amount (₹) *"
                    <input
                        type="number"
                        step="1"
                        min="50"
                        placeholder="Minimum ₹50"
                        prop:value=move || draft.with(|d| d.amount.clone())
                        on:input=move |ev| draft.update(|d| d.amount = event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Submitting..." } else { "Withdraw Request" }}
                </button>
            </form>
        </section>
    }
}
