//! # Ports
//!
//! Any storage adapter must implement these traits to be used by the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Thread;

/// Document store contract for thread aggregates (replies embedded).
///
/// Each call is a single-document operation; concurrent `save`s of the same
/// thread are last-write-wins.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Inserts a freshly created thread.
    async fn insert(&self, thread: &Thread) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>>;

    /// Up to `limit` threads of `board`, most recently bumped first.
    async fn list_recent(&self, board: &str, limit: usize) -> Result<Vec<Thread>>;

    /// Writes back a mutated thread, replacing the stored document.
    ///
    /// Update-only: if the thread was deleted since it was read, this fails
    /// with `NotFound` and the thread stays deleted.
    async fn save(&self, thread: &Thread) -> Result<()>;

    /// Removes the thread and its replies. Returns `false` if nothing matched.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Source of "now" for creation and bump timestamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
