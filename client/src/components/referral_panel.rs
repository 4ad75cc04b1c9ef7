//! Refer-and-earn panel: code lookup, progress, reward tiers, share form,
//! and referral history.
//!
//! SYSTEM CONTEXT
//! ==============
//! The referral code is resolved in three steps: the value cached in the
//! session is shown at once, then the account is re-read through
//! `POST /user/login` with the saved credentials, and if that fails
//! `GET /referral/share` is asked directly. Whatever is learned is written
//! back into the session. History loads once a code is known.
//!
//! TRADE-OFFS
//! ==========
//! A recorded referral is prepended locally instead of re-fetching the
//! history; the row matches what the next fetch returns.

#[cfg(test)]
#[path = "referral_panel_test.rs"]
mod referral_panel_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::components::status_banner::{StatusBanner, StatusMessage, flash_success, report_error};
use crate::config::ClientConfig;
use crate::net::api::{ApiClient, browser_api};
use crate::net::error::ApiError;
use crate::net::http::{CancelToken, Transport};
use crate::net::records::{DEFAULT_REFERRAL_STATUS, ReferralRow, display_number};
use crate::net::types::{LoginRequest, ReferralSharePayload};
use crate::state::auth::AuthState;
use crate::state::forms::{ReferralDraft, SUCCESS_STATUS_MS};
use crate::state::resource::{RemoteResource, RequestSlot, ResourcePhase, spawn_load};
use crate::state::session::Session;
use crate::util::auth::session_store;
use crate::util::referral::{NEXT_REWARD_LABEL, REWARD_TIERS, ReferralProgress};

/// What the panel knows about the student's referral standing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferralProfile {
    pub code: Option<String>,
    pub student_count: f64,
    pub reward: f64,
    /// Fresh token handed out by the login re-read, if any.
    pub token: Option<String>,
}

impl ReferralProfile {
    pub fn cached(session: &Session) -> Self {
        Self {
            code: session.referral_code.clone(),
            student_count: session.student_count.unwrap_or(0.0),
            reward: session.balance(),
            token: None,
        }
    }

    /// Fold the profile back into the persisted session.
    pub fn apply_to(&self, session: &mut Session) {
        if self.code.is_some() {
            session.referral_code.clone_from(&self.code);
        }
        session.student_count = Some(self.student_count);
        session.reward = Some(self.reward);
        if self.token.is_some() {
            session.auth_token.clone_from(&self.token);
        }
    }
}

/// Re-read the student's referral standing.
///
/// # Errors
///
/// `Cancelled` as soon as the token flips; otherwise only when every lookup
/// failed and nothing was cached.
pub async fn resolve_referral_profile<T: Transport>(
    api: &ApiClient<T>,
    session: &Session,
    cancel: &CancelToken,
) -> Result<ReferralProfile, ApiError> {
    let cached = ReferralProfile::cached(session);

    if !session.email.is_empty() && !session.phone.is_empty() {
        let credentials = LoginRequest { email: session.email.clone(), phone: session.phone.clone() };
        match api.login(&credentials, cancel).await {
            Ok(resp) => {
                let user = resp.user.unwrap_or_default();
                return Ok(ReferralProfile {
                    code: user.referral_code.filter(|c| !c.trim().is_empty()).or(cached.code),
                    student_count: user.student_count.filter(|n| n.is_finite()).unwrap_or(0.0),
                    reward: user.reward.filter(|n| n.is_finite()).unwrap_or(0.0),
                    token: resp.token.filter(|t| !t.trim().is_empty()),
                });
            }
            Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
            Err(e) => leptos::logging::warn!("referral: login re-read failed: {e}"),
        }
    }

    match api.fetch_referral_code(cancel).await {
        Ok(Some(code)) => Ok(ReferralProfile { code: Some(code), ..cached }),
        Ok(None) => Ok(cached),
        Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
        Err(_) if cached.code.is_some() => Ok(cached),
        Err(e) => Err(e),
    }
}

/// History row for a referral the server just accepted.
pub fn optimistic_row(payload: &ReferralSharePayload, now: chrono::DateTime<chrono::Utc>) -> ReferralRow {
    ReferralRow {
        name: payload.friend_name.clone(),
        email: payload.friend_email.clone(),
        phone: payload.friend_phone.clone(),
        status: DEFAULT_REFERRAL_STATUS.to_owned(),
        created_at: Some(Value::String(now.to_rfc3339())),
    }
}

/// Email and phone joined for the history card, skipping blanks.
pub fn history_contact(row: &ReferralRow) -> String {
    [row.email.as_str(), row.phone.as_str()]
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn code_display(loading: bool, code: Option<&str>) -> String {
    match code {
        _ if loading => "loading...".to_owned(),
        Some(code) if !code.is_empty() => code.to_owned(),
        _ => "—".to_owned(),
    }
}

#[component]
pub fn ReferralPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();

    let profile = RwSignal::new(RemoteResource::<ReferralProfile>::default());
    let history = RwSignal::new(RemoteResource::<Vec<ReferralRow>>::default());
    let draft = RwSignal::new(ReferralDraft::default());
    let share_status = RwSignal::new(None::<StatusMessage>);
    let copy_status = RwSignal::new(None::<StatusMessage>);
    let sharing = RwSignal::new(false);

    let profile_slot = RequestSlot::new();
    let history_slot = RequestSlot::new();
    let share_slot = RequestSlot::new();
    {
        let slots = [profile_slot.clone(), history_slot.clone(), share_slot.clone()];
        on_cleanup(move || slots.iter().for_each(RequestSlot::cancel));
    }

    let current = move || auth.with(|a| a.session.as_ref().map(ReferralProfile::cached)).unwrap_or_default();
    let code = Memo::new(move |_| {
        profile
            .with(|p| p.data.as_ref().and_then(|d| d.code.clone()))
            .or_else(|| auth.with(|a| a.session.as_ref().and_then(|s| s.referral_code.clone())))
    });

    // Resolve once per session (restore finishes after hydration).
    {
        let config = config.clone();
        Effect::new(move || {
            let Some(session) = auth.with(|a| a.session.clone()) else {
                return;
            };
            if !profile.with_untracked(|p| p.phase == ResourcePhase::Idle) {
                return;
            }
            let api = browser_api(&config, session.auth_token.clone());
            spawn_load(profile, &profile_slot, "referral profile", move |cancel| async move {
                resolve_referral_profile(&api, &session, &cancel).await
            });
        });
    }

    // Persist whatever the lookup learned.
    Effect::new(move || {
        if let Some(learned) = profile.with(|p| p.data.clone()) {
            auth.update(|a| a.update_session(&session_store(), |s| learned.apply_to(s)));
        }
    });

    // Load history whenever the code changes.
    {
        let config = config.clone();
        Effect::new(move || {
            let Some(code) = code.get() else {
                return;
            };
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            spawn_load(history, &history_slot, "referral history", move |cancel| async move {
                api.fetch_referral_history(&code, &cancel).await
            });
        });
    }

    let on_share = {
        let config = config.clone();
        move |_| {
            if sharing.get_untracked() {
                return;
            }
            let own = code.get_untracked();
            let payload = match draft.with_untracked(|d| d.validate(own.as_deref())) {
                Ok(payload) => payload,
                Err(message) => {
                    share_status.set(Some(StatusMessage::error(message)));
                    return;
                }
            };
            share_status.set(None);
            sharing.set(true);
            let api = browser_api(&config, auth.with_untracked(AuthState::token));
            let cancel = share_slot.begin();

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match api.share_referral(&payload, &cancel).await {
                    Ok(_) => {
                        draft.set(ReferralDraft::default());
                        let row = optimistic_row(&payload, chrono::Utc::now());
                        history.update(|h| {
                            let mut rows = h.data.clone().unwrap_or_default();
                            rows.insert(0, row);
                            h.replace(rows);
                        });
                        flash_success(share_status, StatusMessage::success("Referral shared successfully!"), SUCCESS_STATUS_MS);
                    }
                    Err(e) => report_error(share_status, &e),
                }
                sharing.set(false);
            });

            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (api, cancel, payload);
            }
        }
    };

    let on_copy = move |_| {
        let Some(text) = code.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let clipboard: Option<web_sys::Clipboard> =
                web_sys::window().and_then(|w| w.navigator().clipboard().into());
            let copied = match clipboard {
                Some(clipboard) => wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await.is_ok(),
                None => false,
            };
            if copied {
                flash_success(copy_status, StatusMessage::success("Referral code copied!"), SUCCESS_STATUS_MS);
            } else {
                copy_status.set(Some(StatusMessage::error("Could not copy. Please select & copy manually.")));
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (text, copy_status);
        }
    };

    let stats = move || profile.with(|p| p.data.clone()).unwrap_or_else(current);
    let progress = move || ReferralProgress::from_count(stats().student_count);
    let form_link = move || code.get().and_then(|c| config.referral_form_link(&c));

    view! {
        <section class="referral-panel" id="referral">
            <div class="referral-panel__hero">
                <h2>"🎁 Refer & Earn Amazing Rewards!"</h2>
                <p>"Invite friends and earn exclusive rewards from smartwatches to iPhone 16 Pro Max"</p>
            </div>

            <div class="referral-panel__progress">
                <h3>"🏆 Your Referral Progress"</h3>
                <div class="referral-panel__tiles">
                    <div class="stat-tile">
                        <p class="stat-tile__value">{move || progress().successful}</p>
                        <p class="stat-tile__title">"Successful Referrals"</p>
                    </div>
                    <div class="stat-tile">
                        <p class="stat-tile__value">{NEXT_REWARD_LABEL}</p>
                        <p class="stat-tile__title">"Next Reward"</p>
                    </div>
                    <div class="stat-tile">
                        <p class="stat-tile__value">{move || progress().needed}</p>
                        <p class="stat-tile__title">"Referrals Needed"</p>
                    </div>
                    <div class="stat-tile">
                        <p class="stat-tile__value">{move || display_number(stats().reward)}</p>
                        <p class="stat-tile__title">"Reward Points"</p>
                    </div>
                </div>
                <div class="progress-bar">
                    <div class="progress-bar__fill" style:width=move || format!("{}%", progress().percent)></div>
                </div>
                <p class="referral-panel__caption">"Progress to Next Reward"</p>
            </div>

            <div class="referral-panel__tiers">
                <h3>"🎯 Reward Tiers"</h3>
                {REWARD_TIERS
                    .iter()
                    .map(|tier| {
                        let class = if tier.featured { "tier-card tier-card--featured" } else { "tier-card" };
                        view! {
                            <div class=class>
                                <div class="tier-card__title">"🎯 "{tier.title}</div>
                                <div class="tier-card__headline">{tier.headline}</div>
                                <div class="tier-card__note">{tier.note}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="referral-panel__share">
                <h3>"📩 Refer a Friend"</h3>
                <div class="referral-panel__form">
                    <input
                        type="text"
                        placeholder="Friend's Full Name"
                        prop:value=move || draft.with(|d| d.friend_name.clone())
                        on:input=move |ev| draft.update(|d| d.friend_name = event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="friend@example.com"
                        prop:value=move || draft.with(|d| d.friend_email.clone())
                        on:input=move |ev| draft.update(|d| d.friend_email = event_target_value(&ev))
                    />
                    <input
                        type="tel"
                        placeholder="10-digit phone number"
                        prop:value=move || draft.with(|d| d.friend_phone.clone())
                        on:input=move |ev| draft.update(|d| d.friend_phone = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Referral Code"
                        prop:value=move || {
                            draft.with(|d| d.effective_code(code.get().as_deref()).unwrap_or_default().to_owned())
                        }
                        on:input=move |ev| draft.update(|d| d.referral_code = event_target_value(&ev))
                    />
                </div>
                <div class="referral-panel__actions">
                    <button type="button" on:click=on_share disabled=move || sharing.get()>
                        "📝 Record Referral"
                    </button>
                    {move || {
                        form_link()
                            .map(|href| {
                                view! {
                                    <a class="referral-panel__form-link" href=href target="_blank" rel="noopener noreferrer">
                                        "📄 Send Registration Form"
                                    </a>
                                }
                            })
                    }}
                </div>
                <StatusBanner status=share_status/>
            </div>

            <div class="referral-panel__code">
                <h3>"🔗 Your Referral Code"</h3>
                <div class="referral-panel__code-value">
                    {move || code_display(profile.with(RemoteResource::is_loading), code.get().as_deref())}
                </div>
                <button type="button" on:click=on_copy disabled=move || code.get().is_none()>
                    "📋 Copy Code"
                </button>
                <StatusBanner status=copy_status/>
                <p>"Share this code with friends when they join Placify"</p>
            </div>

            <div class="referral-panel__history">
                <h3>"👥 My Referrals"</h3>
                <Show when=move || history.with(RemoteResource::is_loading)>
                    <p class="referral-panel__loading">"Loading…"</p>
                </Show>
                <Show when=move || history.with(|h| h.error.is_some())>
                    <p class="status-banner status-banner--error">
                        {move || history.with(|h| h.error.clone().unwrap_or_default())}
                    </p>
                </Show>
                <Show when=move || {
                    history.with(|h| !h.is_loading() && h.data.as_ref().is_none_or(Vec::is_empty))
                }>
                    <p class="referral-panel__empty">"No referral history."</p>
                </Show>
                {move || {
                    history
                        .with(|h| h.data.clone().unwrap_or_default())
                        .into_iter()
                        .map(|row| {
                            let contact = history_contact(&row);
                            let day = row.display_date();
                            let name = if row.name.is_empty() { "—".to_owned() } else { row.name };
                            view! {
                                <div class="referral-card">
                                    <div>
                                        <div class="referral-card__name">{name}</div>
                                        <div class="referral-card__contact">{contact}</div>
                                        <div class="referral-card__date">{day}</div>
                                    </div>
                                    <span class="pill pill--success">{row.status}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
