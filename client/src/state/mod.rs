//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` and `session` hold who is logged in, `resource` models one remote
//! collection per panel, and `draft`/`forms` hold unsubmitted input.

pub mod auth;
pub mod draft;
pub mod forms;
pub mod resource;
pub mod session;
