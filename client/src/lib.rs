//! # client
//!
//! Leptos + WASM front end for Placify Connect: student submissions,
//! referral rewards, withdrawals, and the admin console.
//!
//! The crate builds twice: with `ssr` it is linked into the host binary to
//! render the shell, and with `hydrate` it is compiled to WASM and takes
//! over in the browser, where every backend request is made.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
