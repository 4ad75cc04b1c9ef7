//! Student home: stats navbar, the application form, and the referral and
//! withdrawal panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! At most one side panel is open at a time. A successful application bumps
//! `refresh`, which reloads the navbar stats.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::components::referral_panel::ReferralPanel;
use crate::components::student_form::StudentForm;
use crate::components::withdrawal_panel::WithdrawalPanel;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentPanel {
    Referral,
    Withdrawal,
}

impl StudentPanel {
    /// DOM id the page scrolls to when the panel opens.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::Referral => "referral",
            Self::Withdrawal => "withdrawal",
        }
    }
}

/// Clicking the open panel closes it; clicking the other one swaps.
pub fn toggle_panel(current: Option<StudentPanel>, clicked: StudentPanel) -> Option<StudentPanel> {
    if current == Some(clicked) { None } else { Some(clicked) }
}

#[component]
pub fn StudentPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let refresh = RwSignal::new(0_u64);
    let panel = RwSignal::new(None::<StudentPanel>);

    let open = move |clicked: StudentPanel| {
        panel.update(|p| *p = toggle_panel(*p, clicked));
        #[cfg(feature = "hydrate")]
        if panel.get_untracked() == Some(clicked) {
            request_animation_frame(move || {
                if let Some(el) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id(clicked.anchor()))
                {
                    el.scroll_into_view();
                }
            });
        }
    };

    view! {
        <Show when=move || auth.with(|a| a.session.is_some())>
            <div class="student-page">
                <Navbar
                    refresh=refresh
                    on_referral=move |()| open(StudentPanel::Referral)
                    on_withdrawal=move |()| open(StudentPanel::Withdrawal)
                />
                <main class="student-page__main">
                    <StudentForm on_created=move |()| refresh.update(|n| *n += 1)/>
                    {move || match panel.get() {
                        Some(StudentPanel::Referral) => view! { <ReferralPanel/> }.into_any(),
                        Some(StudentPanel::Withdrawal) => view! { <WithdrawalPanel/> }.into_any(),
                        None => ().into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
