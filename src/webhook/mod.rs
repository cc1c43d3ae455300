//! Webhook ingestion for callbacks sent by the task-manager API.
//!
//! This module provides:
//! - The logical event record ([`WebhookEvent`])
//! - Wire-shape detection and event extraction ([`Normalizer`], [`Events`], [`WireShape`])
//! - Per-event dispatch to caller code ([`EventHandler`], [`for_each_event`])
//! - An HTTP ingestion endpoint ([`webhook_router`], [`serve`])
//!
//! # Wire shapes
//!
//! Integrations have delivered the same event stream in several layouts.
//! All of them are accepted, tried in this order:
//!
//! 1. **Enveloped**: `{"body": "<event as a JSON string>"}`
//! 2. **Direct**: the event object itself
//! 3. **Batched**: `[["<event json>", ...], ...]`, dispatched in outer then inner order
//!
//! This list is a compatibility surface; new layouts are added, never
//! substituted.

mod error;
mod event;
mod handler;
mod normalize;
mod server;


pub use error::{BoxError, WebhookError};
pub use event::WebhookEvent;
pub use handler::EventHandler;
pub use normalize::{
    DEFAULT_ENVELOPE_KEY, Events, Normalizer, WireShape, consume, for_each_event, normalize,
};
pub use server::{serve, webhook_router};
