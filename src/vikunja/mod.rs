//! Bindings for the Vikunja task manager.
//!
//! This module provides:
//! - The records the API exchanges ([`Project`], [`Task`], [`Webhook`], ...)
//! - A typed client over [`crate::api::ApiClient`] ([`TaskClient`])
//! - The payload of task webhook events ([`TaskEvent`]), for use with
//!   [`crate::webhook`]
//! - Selection helpers over fetched records ([`latest_comment`], [`labels_with_titles`])

mod client;
mod selectors;
mod types;


pub use client::{BASE_URL_VAR, TOKEN_VAR, TaskClient};
pub use selectors::{CommentError, labels_with_titles, latest_comment};
pub use types::{Comment, Label, Owner, Project, Task, TaskEvent, TaskEventData, Webhook};
