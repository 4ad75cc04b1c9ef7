//! Admin modal for the four platform settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `GET /user/settings` each time it opens, edits a `FormDraft`
//! against that snapshot, and saves with `PUT /user/updatesetting`.
//!
//! DESIGN
//! ======
//! After a save the server's echoed `settings` become the new baseline; when
//! the response omits them the modal re-fetches instead of trusting the
//! draft. Save is disabled while clean so no-op writes never leave.

#[cfg(test)]
#[path = "settings_modal_test.rs"]
mod settings_modal_test;

use leptos::prelude::*;

use crate::components::status_banner::{StatusBanner, StatusMessage, flash_success, report_error};
use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::net::records::display_number;
use crate::net::types::PlatformSettings;
use crate::state::auth::AuthState;
use crate::state::draft::FormDraft;
use crate::state::forms::{SUCCESS_STATUS_MS, SettingsDraft, SettingsField};
use crate::state::resource::{RemoteResource, RequestSlot, spawn_load};
use crate::util::date;

pub fn dirty_label(dirty: bool) -> &'static str {
    if dirty { "• Unsaved changes" } else { "No changes" }
}

/// Read-only summary of the server snapshot, in display order.
pub fn settings_summary(settings: &PlatformSettings) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Server reward/Student", display_number(settings.reward_per_student)),
        ("Cooldown", format!("{}s", display_number(settings.cooldown_seconds))),
        ("Max before block", display_number(settings.max_students_before_block)),
        ("Block duration", format!("{}m", display_number(settings.block_duration_minutes))),
    ];
    if settings.updated_at.is_some() {
        rows.push(("Last updated", date::normalize_date(settings.updated_at.as_ref())));
    }
    rows
}

/// HTML `min` attribute for a field's input.
pub fn input_min(field: SettingsField) -> String {
    display_number(field.minimum())
}

#[component]
pub fn SettingsModal(open: RwSignal<bool>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();

    let snapshot = RwSignal::new(RemoteResource::<PlatformSettings>::default());
    let form = RwSignal::new(FormDraft::<SettingsDraft>::default());
    let status = RwSignal::new(None::<StatusMessage>);
    let saving = RwSignal::new(false);
    let slot = RequestSlot::new();

    let load = {
        let slot = slot.clone();
        let config = config.clone();
        move || {
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            spawn_load(snapshot, &slot, "settings", move |cancel| async move { api.fetch_settings(&cancel).await });
        }
    };

    // Only a changed settings value becomes the new baseline; loading and
    // error transitions on the snapshot leave the draft alone.
    let settings = Memo::new(move |_| snapshot.with(|s| s.data.clone()));
    Effect::new(move || {
        if let Some(settings) = settings.get() {
            form.update(|f| {
                f.rebase(settings);
            });
        }
    });

    {
        let load = load.clone();
        Effect::new(move || {
            if open.get() {
                status.set(None);
                load();
            }
        });
    }
    {
        let slot = slot.clone();
        on_cleanup(move || slot.cancel());
    }

    let dirty = Memo::new(move |_| form.with(FormDraft::is_dirty));

    let on_submit = {
        let config = config.clone();
        let load = load.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() || !dirty.get_untracked() {
                return;
            }
            let update = match form.with_untracked(|f| f.draft.validate()) {
                Ok(update) => update,
                Err(message) => {
                    status.set(Some(StatusMessage::error(message)));
                    return;
                }
            };
            status.set(None);
            saving.set(true);
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            let cancel = slot.begin();
            let load = load.clone();

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match api.update_settings(&update, &cancel).await {
                    Ok(resp) => {
                        match resp.settings {
                            Some(settings) => snapshot.update(|s| s.replace(settings)),
                            None => load(),
                        }
                        flash_success(
                            status,
                            StatusMessage::success_or(resp.message.as_deref(), "Settings updated successfully"),
                            SUCCESS_STATUS_MS,
                        );
                    }
                    Err(e) => report_error(status, &e),
                }
                saving.set(false);
            });

            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (api, cancel, load, update);
            }
        }
    };

    let on_reset = move |_| form.update(FormDraft::reset);
    let close = move |_| open.set(false);

    view! {
        <Show when=move || open.get()>
            <div class="settings-modal__backdrop" on:click=close></div>
            <div class="settings-modal" role="dialog" aria-modal="true">
                <div class="settings-modal__header">
                    <h2>"Platform Settings"</h2>
                    <button type="button" class="settings-modal__close" on:click=close>"×"</button>
                </div>
                <Show when=move || snapshot.with(RemoteResource::is_loading)>
                    <p class="settings-modal__loading">"Loading settings…"</p>
                </Show>
                <Show when=move || snapshot.with(|s| s.error.is_some())>
                    <p class="status-banner status-banner--error">
                        {move || snapshot.with(|s| s.error.clone().unwrap_or_default())}
                    </p>
                </Show>
                <StatusBanner status=status/>
                <div class="settings-modal__summary">
                    {move || {
                        snapshot
                            .with(|s| s.data.as_ref().map(settings_summary).unwrap_or_default())
                            .into_iter()
                            .map(|(label, value)| view! { <div>{label}": "<b>{value}</b></div> })
                            .collect_view()
                    }}
                </div>
                <form class="settings-modal__form" on:submit=on_submit.clone()>
                    {SettingsField::ALL
                        .into_iter()
                        .map(|field| {
                            view! {
                                <label class="settings-modal__field">
                                    <span>{field.label()}</span>
                                    <input
                                        type="number"
                                        step="1"
                                        required
                                        min=input_min(field)
                                        prop:value=move || form.with(|f| field.get(&f.draft).to_owned())
                                        on:input=move |ev| {
                                            form.update(|f| field.set(&mut f.draft, event_target_value(&ev)));
                                        }
                                    />
                                </label>
                            }
                        })
                        .collect_view()}
                    <div class="settings-modal__footer">
                        <span class="settings-modal__dirty">{move || dirty_label(dirty.get())}</span>
                        <button type="button" on:click=on_reset disabled=move || !dirty.get()>
                            "Reset"
                        </button>
                        <button type="submit" disabled=move || saving.get() || !dirty.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
