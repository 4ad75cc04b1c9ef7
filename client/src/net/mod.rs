//! Networking modules for the Placify Connect REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes one typed call per endpoint, `http` owns request building
//! and response interpretation behind the `Transport` seam, `types` defines
//! the wire schema and `records` resolves loosely shaped list rows.

pub mod api;
pub mod error;
pub mod http;
pub mod records;
#[cfg(test)]
pub mod testing;
pub mod types;
