//! Reply operations: create, get thread, delete (tombstone), report.

use domains::{AppError, Result, Thread, ThreadView};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{Ack, BoardService};

impl BoardService {
    /// Appends a reply and bumps the thread.
    ///
    /// Returns the whole updated thread unredacted, reply passwords included.
    pub async fn create_reply(
        &self,
        thread_id: Uuid,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        if text.is_empty() {
            return Err(AppError::missing("text"));
        }
        if delete_password.is_empty() {
            return Err(AppError::missing("delete_password"));
        }

        let mut thread = self.load_thread(thread_id).await?;
        let reply_id = thread.add_reply(text, delete_password, self.clock.now())?.id;
        self.repo.save(&thread).await?;
        info!(%thread_id, %reply_id, "reply created");
        Ok(thread)
    }

    /// A thread with every reply, redacted for public reading.
    pub async fn get_thread(&self, thread_id: Uuid) -> Result<ThreadView> {
        let thread = self.load_thread(thread_id).await?;
        debug!(%thread_id, replies = thread.replies.len(), "fetched thread");
        Ok(ThreadView::full(&thread))
    }

    /// Tombstones a reply: its text becomes the deletion marker while id,
    /// timestamp and position stay.
    pub async fn delete_reply(
        &self,
        thread_id: Uuid,
        reply_id: Uuid,
        delete_password: &str,
    ) -> Result<Ack> {
        if delete_password.is_empty() {
            return Err(AppError::missing("delete_password"));
        }
        let mut thread = self.load_thread(thread_id).await?;
        let reply = thread
            .reply_mut(reply_id)
            .ok_or_else(|| AppError::reply_not_found(reply_id))?;

        if let Err(e) = reply.verify_password(delete_password) {
            warn!(%thread_id, %reply_id, "reply delete rejected: incorrect password");
            return Err(e);
        }
        if reply.redacted {
            debug!(%thread_id, %reply_id, "reply already deleted");
            return Ok(Ack::Deleted);
        }

        reply.redact();
        self.repo.save(&thread).await?;
        info!(%thread_id, %reply_id, "reply deleted");
        Ok(Ack::Deleted)
    }

    /// Flags a reply for moderation. Idempotent, no password.
    pub async fn report_reply(&self, thread_id: Uuid, reply_id: Uuid) -> Result<Ack> {
        let mut thread = self.load_thread(thread_id).await?;
        let reply = thread
            .reply_mut(reply_id)
            .ok_or_else(|| AppError::reply_not_found(reply_id))?;

        if reply.reported {
            debug!(%thread_id, %reply_id, "reply already reported");
            return Ok(Ack::Reported);
        }

        reply.report();
        self.repo.save(&thread).await?;
        info!(%thread_id, %reply_id, "reply reported");
        Ok(Ack::Reported)
    }
}
