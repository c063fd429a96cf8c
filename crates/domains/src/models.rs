//! # Domain Models
//!
//! A `Thread` is the only top-level aggregate. Replies live inside it and
//! have no identity outside their parent.
//! We use UUID v4 for globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Text a reply carries once its author has deleted it.
pub const REDACTED_TEXT: &str = "[deleted]";

/// A single reply embedded in a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: Uuid,
    pub text: String,
    /// Stored and compared in plaintext.
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    pub reported: bool,
    /// Tombstone marker. Once set, `text` is frozen at [`REDACTED_TEXT`].
    #[serde(default)]
    pub redacted: bool,
}

impl Reply {
    pub fn new(text: &str, delete_password: &str, now: DateTime<Utc>) -> Result<Self> {
        require("text", text)?;
        require("delete_password", delete_password)?;
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_owned(),
            delete_password: delete_password.to_owned(),
            created_on: now,
            reported: false,
            redacted: false,
        })
    }

    pub fn verify_password(&self, candidate: &str) -> Result<()> {
        check_password(&self.delete_password, candidate)
    }

    /// Flags the reply. Idempotent, and independent of redaction.
    pub fn report(&mut self) {
        self.reported = true;
    }

    /// Replaces the text with the tombstone marker, keeping id, timestamp and
    /// position. Terminal.
    pub fn redact(&mut self) {
        if self.redacted {
            return;
        }
        self.text = REDACTED_TEXT.to_owned();
        self.redacted = true;
    }
}

/// A discussion thread on a board, with its replies in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: Uuid,
    /// Board namespace (e.g. "general"). Not unique across boards.
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    /// The timestamp used for sorting threads by activity
    pub bumped_on: DateTime<Utc>,
    pub reported: bool,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Thread {
    pub fn new(
        board: &str,
        text: &str,
        delete_password: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        require("board", board)?;
        require("text", text)?;
        require("delete_password", delete_password)?;
        Ok(Self {
            id: Uuid::new_v4(),
            board: board.to_owned(),
            text: text.to_owned(),
            delete_password: delete_password.to_owned(),
            created_on: now,
            bumped_on: now,
            reported: false,
            replies: Vec::new(),
        })
    }

    /// Appends a reply and bumps the thread to the reply's creation instant.
    pub fn add_reply(
        &mut self,
        text: &str,
        delete_password: &str,
        now: DateTime<Utc>,
    ) -> Result<&Reply> {
        let reply = Reply::new(text, delete_password, now)?;
        self.bumped_on = reply.created_on;
        self.replies.push(reply);
        let last = self.replies.len() - 1;
        Ok(&self.replies[last])
    }

    pub fn reply(&self, reply_id: Uuid) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == reply_id)
    }

    pub fn reply_mut(&mut self, reply_id: Uuid) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == reply_id)
    }

    pub fn verify_password(&self, candidate: &str) -> Result<()> {
        check_password(&self.delete_password, candidate)
    }

    /// Idempotent.
    pub fn report(&mut self) {
        self.reported = true;
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::missing(field));
    }
    Ok(())
}

// Exact, case-sensitive match against the stored plaintext.
fn check_password(stored: &str, candidate: &str) -> Result<()> {
    if stored == candidate {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn thread() -> Thread {
        Thread::new("test", "Hello board", "pw", Utc::now()).unwrap()
    }

    #[test]
    fn test_new_thread_defaults() {
        let now = Utc::now();
        let t = Thread::new("b", "first", "secret", now).unwrap();
        assert_eq!(t.board, "b");
        assert_eq!(t.created_on, now);
        assert_eq!(t.bumped_on, now);
        assert!(!t.reported);
        assert!(t.replies.is_empty());
    }

    #[test]
    fn test_new_thread_requires_fields() {
        let now = Utc::now();
        assert!(matches!(
            Thread::new("b", "", "pw", now),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Thread::new("b", "text", "", now),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Thread::new("", "text", "pw", now),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_add_reply_bumps_thread() {
        let mut t = thread();
        let later = t.created_on + Duration::seconds(5);
        let reply_id = t.add_reply("hi", "q", later).unwrap().id;

        assert_eq!(t.bumped_on, later);
        assert_eq!(t.created_on + Duration::seconds(5), t.bumped_on);
        assert_eq!(t.replies.len(), 1);
        assert_eq!(t.reply(reply_id).unwrap().created_on, later);
    }

    #[test]
    fn test_add_reply_rejects_empty_password() {
        let mut t = thread();
        let before = t.bumped_on;
        let err = t.add_reply("hi", "", Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(t.replies.is_empty());
        assert_eq!(t.bumped_on, before);
    }

    #[test]
    fn test_password_is_case_sensitive() {
        let t = thread();
        assert!(t.verify_password("pw").is_ok());
        assert_eq!(t.verify_password("PW"), Err(AppError::Unauthorized));
    }

    #[test]
    fn test_redact_keeps_identity_and_position() {
        let mut t = thread();
        let now = Utc::now();
        t.add_reply("one", "a", now).unwrap();
        let id = t.add_reply("two", "b", now).unwrap().id;

        t.reply_mut(id).unwrap().redact();

        let r = &t.replies[1];
        assert_eq!(r.id, id);
        assert_eq!(r.text, REDACTED_TEXT);
        assert_eq!(r.created_on, now);
        assert!(r.redacted);
        assert_eq!(t.replies[0].text, "one");
    }

    #[test]
    fn test_reported_then_redacted() {
        let mut r = Reply::new("x", "p", Utc::now()).unwrap();
        r.report();
        r.redact();
        assert!(r.reported);
        assert!(r.redacted);
    }

    #[test]
    fn test_redacted_reply_can_still_be_reported() {
        let mut r = Reply::new("x", "p", Utc::now()).unwrap();
        r.redact();
        r.report();
        r.redact();
        assert!(r.reported);
        assert!(r.redacted);
        assert_eq!(r.text, REDACTED_TEXT);
    }

    #[test]
    fn test_document_without_redacted_flag_deserializes() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "text": "old",
            "delete_password": "p",
            "created_on": "2024-01-01T00:00:00Z",
            "reported": false
        });
        let r: Reply = serde_json::from_value(json).unwrap();
        assert!(!r.redacted);
    }
}
