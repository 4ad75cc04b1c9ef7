//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped guards and layout and delegates rendering
//! details to `components`.

pub mod admin;
pub mod login;
pub mod student;
