//! Shared types for Dealwire, a real-time deal relay and claim server.
//!
//! The `objects` module holds the wire types spoken by every Dealwire API:
//! producer requests, operator responses, WebSocket frames, and the
//! downstream webhook payload.
//!
//! With the `client` cargo feature enabled, the `client` module additionally
//! provides typed HTTP clients and a WebSocket feed listener built on
//! `reqwest` and `tokio-tungstenite`.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
