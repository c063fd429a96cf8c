//! Thread operations: create, list, delete, report.

use domains::{AppError, Result, Thread, ThreadView, THREAD_LISTING_LIMIT};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{Ack, BoardService};

impl BoardService {
    /// Creates a thread on `board`.
    ///
    /// The returned document is unredacted: the creator just supplied the
    /// password and gets it echoed back.
    pub async fn create_thread(
        &self,
        board: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        let thread = Thread::new(board, text, delete_password, self.clock.now())?;
        self.repo.insert(&thread).await?;
        info!(thread_id = %thread.id, board = %thread.board, "thread created");
        Ok(thread)
    }

    /// The ten most recently bumped threads of `board`, each previewing its
    /// three newest replies.
    pub async fn list_threads(&self, board: &str) -> Result<Vec<ThreadView>> {
        let mut threads = self.repo.list_recent(board, THREAD_LISTING_LIMIT).await?;
        threads.sort_by(|a, b| b.bumped_on.cmp(&a.bumped_on));
        threads.truncate(THREAD_LISTING_LIMIT);
        debug!(board, count = threads.len(), "listed threads");
        Ok(threads.iter().map(ThreadView::preview).collect())
    }

    /// Permanently removes a thread and its replies.
    pub async fn delete_thread(&self, thread_id: Uuid, delete_password: &str) -> Result<Ack> {
        if delete_password.is_empty() {
            return Err(AppError::missing("delete_password"));
        }
        let thread = self.load_thread(thread_id).await?;
        if let Err(e) = thread.verify_password(delete_password) {
            warn!(%thread_id, "thread delete rejected: incorrect password");
            return Err(e);
        }
        if !self.repo.delete(thread_id).await? {
            // Removed by someone else between the read and the delete.
            return Err(AppError::thread_not_found(thread_id));
        }
        info!(%thread_id, "thread deleted");
        Ok(Ack::Deleted)
    }

    /// Flags a thread for moderation. Idempotent.
    pub async fn report_thread(&self, thread_id: Uuid) -> Result<Ack> {
        let mut thread = self.load_thread(thread_id).await?;
        thread.report();
        self.repo.save(&thread).await?;
        info!(%thread_id, "thread reported");
        Ok(Ack::Reported)
    }
}
