//! # Read Views
//!
//! What unauthenticated readers get to see. The view types have no
//! `delete_password` or `reported` field, so nothing built from them can leak
//! either.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Reply, Thread};

/// Maximum number of threads on a board listing.
pub const THREAD_LISTING_LIMIT: usize = 10;

/// Maximum number of replies previewed per thread on a board listing.
pub const REPLY_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyView {
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    pub id: Uuid,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
}

impl ThreadView {
    /// Board-listing view: the most recent replies first, capped at
    /// [`REPLY_PREVIEW_LIMIT`].
    pub fn preview(thread: &Thread) -> Self {
        // Newest insertion first, so equal timestamps keep that order.
        let mut recent: Vec<&Reply> = thread.replies.iter().rev().collect();
        recent.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        let replies = recent
            .into_iter()
            .take(REPLY_PREVIEW_LIMIT)
            .map(ReplyView::from)
            .collect();
        Self::with_replies(thread, replies)
    }

    /// Single-thread view: every reply, in stored order.
    pub fn full(thread: &Thread) -> Self {
        let replies = thread.replies.iter().map(ReplyView::from).collect();
        Self::with_replies(thread, replies)
    }

    fn with_replies(thread: &Thread, replies: Vec<ReplyView>) -> Self {
        Self {
            id: thread.id,
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies,
        }
    }
}
