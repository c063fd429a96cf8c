//! # In-memory thread store
//!
//! `ThreadRepository` backed by a sharded concurrent map. Threads on
//! different shards never contend; each call touches one document.
//! Used for development, single-node deployments and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{AppError, Result, Thread, ThreadRepository};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryThreadRepository {
    threads: DashMap<Uuid, Thread>,
}

impl MemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl ThreadRepository for MemoryThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        self.threads.insert(thread.id, thread.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>> {
        Ok(self.threads.get(&id).map(|entry| entry.value().clone()))
    }

    /// Scans the board, newest bump first; ties fall back to id order so
    /// repeated listings are stable.
    async fn list_recent(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        let mut keys: Vec<_> = self
            .threads
            .iter()
            .filter(|entry| entry.value().board == board)
            .map(|entry| (entry.value().bumped_on, entry.value().id))
            .collect();

        keys.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        keys.truncate(limit);

        // A thread deleted since the scan is skipped.
        Ok(keys
            .into_iter()
            .filter_map(|(_, id)| self.threads.get(&id).map(|entry| entry.value().clone()))
            .collect())
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        match self.threads.get_mut(&thread.id) {
            Some(mut entry) => {
                *entry = thread.clone();
                Ok(())
            }
            None => Err(AppError::thread_not_found(thread.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.threads.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn thread_on(board: &str, offset_secs: i64) -> Thread {
        let mut t = Thread::new(board, "text", "pw", Utc::now()).unwrap();
        t.bumped_on = t.created_on + Duration::seconds(offset_secs);
        t
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryThreadRepository::new();
        let thread = thread_on("b", 0);
        repo.insert(&thread).await.unwrap();

        let found = repo.find_by_id(thread.id).await.unwrap();
        assert_eq!(found, Some(thread));
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_filters_board_and_sorts() {
        let repo = MemoryThreadRepository::new();
        for i in 0..4 {
            repo.insert(&thread_on("b", i)).await.unwrap();
        }
        repo.insert(&thread_on("other", 100)).await.unwrap();

        let listed = repo.list_recent("b", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|t| t.board == "b"));
        assert!(listed.windows(2).all(|w| w[0].bumped_on >= w[1].bumped_on));
    }

    #[tokio::test]
    async fn test_list_recent_breaks_ties_by_id() {
        let repo = MemoryThreadRepository::new();
        let bumped = Utc::now();
        let mut ids = Vec::new();
        for _ in 0..4 {
            let mut t = thread_on("b", 0);
            t.bumped_on = bumped;
            ids.push(t.id);
            repo.insert(&t).await.unwrap();
        }
        ids.sort();

        let listed: Vec<Uuid> = repo
            .list_recent("b", 2)
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(listed, ids[..2]);
    }

    #[tokio::test]
    async fn test_save_replaces_document() {
        let repo = MemoryThreadRepository::new();
        let mut thread = thread_on("b", 0);
        repo.insert(&thread).await.unwrap();

        thread.report();
        repo.save(&thread).await.unwrap();

        assert!(repo.find_by_id(thread.id).await.unwrap().unwrap().reported);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_save_after_delete_does_not_resurrect() {
        let repo = MemoryThreadRepository::new();
        let mut thread = thread_on("b", 0);
        repo.insert(&thread).await.unwrap();
        repo.delete(thread.id).await.unwrap();

        thread.report();
        let err = repo.save(&thread).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(kind, _) if kind == "thread"));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = MemoryThreadRepository::new();
        let thread = thread_on("b", 0);
        repo.insert(&thread).await.unwrap();

        assert!(repo.delete(thread.id).await.unwrap());
        assert!(!repo.delete(thread.id).await.unwrap());
        assert!(repo.is_empty());
    }
}
