//! Wire formats.
//!
//! Documents are keyed by `_id` on the wire, which is what board front-ends
//! expect. Request fields are all optional so a missing field surfaces as a
//! domain validation error instead of a deserialization failure.

use chrono::{DateTime, Utc};
use domains::{AppError, Reply, ReplyView, Thread, ThreadView};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateThreadRequest {
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

/// Body of `DELETE` and `PUT` on `/api/threads/{board}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThreadActionRequest {
    pub thread_id: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateReplyRequest {
    pub thread_id: Option<String>,
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

/// Body of `DELETE` and `PUT` on `/api/replies/{board}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplyActionRequest {
    pub thread_id: Option<String>,
    pub reply_id: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThreadQuery {
    pub thread_id: Option<String>,
}

/// Parses an identifier field. Missing or empty is a validation error; a
/// malformed value cannot name any document, so it is reported as not found.
pub fn parse_id(field: &str, raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw.unwrap_or_default().trim();
    if raw.is_empty() {
        return Err(AppError::missing(field));
    }
    let kind = field.trim_end_matches("_id");
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(kind.to_owned(), raw.to_owned()))
}

// ── Responses ───────────────────────────────────────────────────────────────

/// Full, unredacted thread as returned to the caller who just wrote it.
#[derive(Debug, Serialize)]
pub struct ThreadDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub reported: bool,
    pub replies: Vec<ReplyDocument>,
}

#[derive(Debug, Serialize)]
pub struct ReplyDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    pub reported: bool,
}

impl From<Reply> for ReplyDocument {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text,
            delete_password: reply.delete_password,
            created_on: reply.created_on,
            reported: reply.reported,
        }
    }
}

impl From<Thread> for ThreadDocument {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            board: thread.board,
            text: thread.text,
            delete_password: thread.delete_password,
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            reported: thread.reported,
            replies: thread.replies.into_iter().map(ReplyDocument::from).collect(),
        }
    }
}

/// Public thread, as listed or fetched.
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyResponse>,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<ReplyView> for ReplyResponse {
    fn from(view: ReplyView) -> Self {
        Self {
            id: view.id,
            text: view.text,
            created_on: view.created_on,
        }
    }
}

impl From<ThreadView> for ThreadResponse {
    fn from(view: ThreadView) -> Self {
        Self {
            id: view.id,
            board: view.board,
            text: view.text,
            created_on: view.created_on,
            bumped_on: view.bumped_on,
            replies: view.replies.into_iter().map(ReplyResponse::from).collect(),
        }
    }
}
