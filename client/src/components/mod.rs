//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render one resource panel or form each, reading the session
//! and client configuration from Leptos context providers.

pub mod navbar;
pub mod referral_panel;
pub mod settings_modal;
pub mod status_banner;
pub mod student_form;
pub mod user_table;
pub mod withdrawal_panel;
pub mod withdrawal_table;
