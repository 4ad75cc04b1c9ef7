//! Student application form posting to `POST /user/addstudent`.

#[cfg(test)]
#[path = "student_form_test.rs"]
mod student_form_test;

use leptos::prelude::*;

use crate::components::navbar::rupees;
use crate::components::status_banner::{StatusBanner, StatusKind, StatusMessage, flash_success, report_error};
use crate::config::ClientConfig;
use crate::net::api::browser_api;
use crate::state::auth::AuthState;
use crate::state::forms::{CreatedStudentInfo, GENDERS, SUCCESS_STATUS_MS, StudentDraft, StudentField};
use crate::state::resource::RequestSlot;
use crate::util::auth::session_store;

/// HTML input type and placeholder for a text-like field.
pub fn field_input(field: StudentField) -> (&'static str, &'static str) {
    match field {
        StudentField::StudentName => ("text", "Enter full name as per documents"),
        StudentField::Dob => ("date", ""),
        StudentField::Gender => ("text", "Select gender"),
        StudentField::Phone => ("tel", "10-digit mobile number"),
        StudentField::Email => ("email", "applicant@example.com"),
        StudentField::City => ("text", "e.g., Mumbai"),
        StudentField::State => ("text", "e.g., Maharashtra"),
        StudentField::CourseApplied => ("text", "e.g., B.Tech CSE"),
        StudentField::AdmissionYear => ("text", "e.g., 2025"),
        StudentField::College => ("text", "e.g., IIT Bombay"),
    }
}

/// Extra lines under the success banner.
pub fn created_lines(info: &CreatedStudentInfo) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(id) = &info.student_id {
        lines.push(format!("Assigned Student ID: {id}"));
    }
    if let Some(reward) = info.reward.filter(|r| r.is_finite()) {
        lines.push(format!("Updated Reward: {}", rupees(reward)));
    }
    lines
}

#[component]
pub fn StudentForm(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();

    let draft = RwSignal::new(StudentDraft::default());
    let status = RwSignal::new(None::<StatusMessage>);
    let created = RwSignal::new(None::<CreatedStudentInfo>);
    let busy = RwSignal::new(false);
    let slot = RequestSlot::new();
    {
        let slot = slot.clone();
        on_cleanup(move || slot.cancel());
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let application = match draft.with_untracked(StudentDraft::validate) {
            Ok(application) => application,
            Err(message) => {
                created.set(None);
                status.set(Some(StatusMessage::error(message)));
                return;
            }
        };
        status.set(None);
        created.set(None);
        busy.set(true);
        let api = browser_api(&config, auth.with_untracked(AuthState::token));
        let cancel = slot.begin();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match api.add_student(&application, &cancel).await {
                Ok(resp) => {
                    let info = CreatedStudentInfo::from_response(&resp);
                    if let Some(reward) = info.reward {
                        auth.update(|a| a.update_session(&session_store(), |s| s.reward = Some(reward)));
                    }
                    created.set(Some(info));
                    flash_success(
                        status,
                        StatusMessage::success_or(resp.message.as_deref(), "Student added successfully"),
                        SUCCESS_STATUS_MS,
                    );
                    draft.set(StudentDraft::default());
                    on_created.run(());
                }
                Err(e) => report_error(status, &e),
            }
            busy.set(false);
        });

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, cancel, application, on_created, session_store);
        }
    };

    let text_input = move |field: StudentField| {
        let (kind, placeholder) = field_input(field);
        view! {
            <label class="student-form__field">
                {format!("{} *", field.label())}
                <input
                    type=kind
                    placeholder=placeholder
                    prop:value=move || draft.with(|d| field.get(d).to_owned())
                    on:input=move |ev| draft.update(|d| field.set(d, &event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <section class="student-form">
            <div class="student-form__header">
                <h1>"Student Application Portal"</h1>
                <p>"Process new Student applications accurately"</p>
            </div>
            <StatusBanner status=status/>
            {move || {
                let showing = status.with(|s| s.as_ref().is_some_and(|m| m.kind == StatusKind::Success));
                created
                    .get()
                    .filter(|_| showing)
                    .map(|info| {
                        created_lines(&info)
                            .into_iter()
                            .map(|line| view! { <p class="student-form__created">{line}</p> })
                            .collect_view()
                    })
            }}
            <form class="student-form__body" on:submit=on_submit>
                {text_input(StudentField::StudentName)}
                <div class="student-form__row">
                    {text_input(StudentField::Dob)}
                    <label class="student-form__field">
                        "Gender *"
                        <select
                            prop:value=move || draft.with(|d| d.gender.clone())
                            on:change=move |ev| draft.update(|d| StudentField::Gender.set(d, &event_target_value(&ev)))
                        >
                            <option value="">"Select gender"</option>
                            {GENDERS.iter().map(|g| view! { <option value=*g>{*g}</option> }).collect_view()}
                        </select>
                    </label>
                </div>
                <div class="student-form__row">
                    {text_input(StudentField::Phone)}
                    {text_input(StudentField::Email)}
                </div>
                <div class="student-form__row">
                    {text_input(StudentField::City)}
                    {text_input(StudentField::State)}
                </div>
                <div class="student-form__row">
                    {text_input(StudentField::CourseApplied)}
                    {text_input(StudentField::AdmissionYear)}
                </div>
                {text_input(StudentField::College)}
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Submitting..." } else { "Submit Student" }}
                </button>
            </form>
        </section>
    }
}
