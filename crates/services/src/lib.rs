//! # services
//!
//! Stateless board logic sitting between the HTTP boundary and the thread
//! store: validation, password checks, bumping, and the read-view rules.

mod replies;
mod threads;

use std::sync::Arc;

use domains::{AppError, Clock, Result, SystemClock, Thread, ThreadRepository};
use uuid::Uuid;

/// Acknowledgment returned by delete and report operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Deleted,
    Reported,
}

impl Ack {
    /// The plain-text body historically sent to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ack::Deleted => "success",
            Ack::Reported => "reported",
        }
    }
}

/// Implements every board operation on top of a [`ThreadRepository`].
#[derive(Clone)]
pub struct BoardService {
    repo: Arc<dyn ThreadRepository>,
    clock: Arc<dyn Clock>,
}

impl BoardService {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn ThreadRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    async fn load_thread(&self, thread_id: Uuid) -> Result<Thread> {
        self.repo
            .find_by_id(thread_id)
            .await?
            .ok_or_else(|| AppError::thread_not_found(thread_id))
    }
}
