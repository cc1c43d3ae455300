//! Taskhook: typed REST client toolkit and webhook normalizer
//!
//! A library for talking to a task-manager JSON API with typed request and
//! response payloads, and for ingesting the webhook callbacks that API sends
//! back, whatever wire shape they arrive in.

pub mod api;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod transport;
pub mod vikunja;
pub mod webhook;
