//! Records exchanged with the Vikunja API.
//!
//! Timestamps stay as the RFC 3339 strings the server sends. Missing fields
//! deserialize to their defaults so partial payloads (e.g. webhook echoes)
//! still decode.

use serde::{Deserialize, Serialize};

use crate::webhook::WebhookEvent;

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub created: String,
    pub updated: String,
}

/// A project (task list).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub identifier: String,
    pub hex_color: String,
    pub background_blur_hash: String,
    pub background_information: serde_json::Value,
    pub position: f64,
    pub default_bucket_id: i64,
    pub done_bucket_id: i64,
    pub parent_project_id: i64,
    pub is_archived: bool,
    pub is_favorite: bool,
    pub owner: Owner,
    pub created: String,
    pub updated: String,
}

/// A task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub done_at: String,
    pub due_date: String,
    pub start_date: String,
    pub end_date: String,
    pub project_id: i64,
    pub repeat_after: i64,
    pub repeat_mode: i64,
    pub priority: i64,
    pub percent_done: f64,
    pub hex_color: String,
    pub identifier: String,
    pub index: i64,
    pub bucket_id: i64,
    pub position: f64,
    pub kanban_position: f64,
    pub cover_image_attachment_id: i64,
    pub is_favorite: bool,
    pub labels: Option<Vec<Label>>,
    pub reminders: serde_json::Value,
    pub assignees: serde_json::Value,
    pub related_tasks: serde_json::Value,
    pub attachments: serde_json::Value,
    pub created_by: Owner,
    pub created: String,
    pub updated: String,
}

/// A label that can be attached to tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub hex_color: String,
    pub created_by: Option<Owner>,
    pub created: String,
    pub updated: String,
}

/// A comment on a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub comment: String,
    pub author: Owner,
    pub created: String,
    pub updated: String,
}

/// A project webhook registration.
///
/// The server only lets `events` change on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: i64,
    pub target_url: String,
    pub events: Vec<String>,
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Owner>,
}

/// Payload of a task webhook event: who did it and the task afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskEventData {
    pub doer: Owner,
    pub task: Task,
}

/// A task webhook event as delivered to [`crate::webhook`] handlers.
pub type TaskEvent = WebhookEvent<TaskEventData>;
