//! Thread operations against the in-memory store.

use std::sync::Arc;

use domains::{
    AppError, MockThreadRepository, Thread, ThreadRepository, REPLY_PREVIEW_LIMIT,
    THREAD_LISTING_LIMIT,
};
use integration_tests::{memory_service, StepClock};
use services::{Ack, BoardService};
use uuid::Uuid;

#[tokio::test]
async fn test_create_thread_initial_state() {
    let (service, repo) = memory_service();

    let thread = service.create_thread("test", "T", "p").await.unwrap();

    assert!(!thread.reported);
    assert!(thread.replies.is_empty());
    assert_eq!(thread.created_on, thread.bumped_on);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_list_caps_threads_and_replies() {
    let (service, _) = memory_service();

    let mut ids = Vec::new();
    for i in 0..12 {
        let t = service
            .create_thread("busy", &format!("thread {i}"), "p")
            .await
            .unwrap();
        ids.push(t.id);
    }
    for i in 0..5 {
        service
            .create_reply(ids[0], &format!("reply {i}"), "q")
            .await
            .unwrap();
    }

    let listed = service.list_threads("busy").await.unwrap();

    assert_eq!(listed.len(), THREAD_LISTING_LIMIT);
    assert!(listed.iter().all(|t| t.replies.len() <= REPLY_PREVIEW_LIMIT));
    assert!(listed.windows(2).all(|w| w[0].bumped_on >= w[1].bumped_on));

    // The oldest thread was bumped by its replies and now leads the board.
    assert_eq!(listed[0].id, ids[0]);
    let texts: Vec<&str> = listed[0].replies.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["reply 4", "reply 3", "reply 2"]);
}

#[tokio::test]
async fn test_listing_does_not_truncate_storage() {
    let (service, repo) = memory_service();
    let thread = service.create_thread("b", "op", "p").await.unwrap();
    for i in 0..6 {
        service
            .create_reply(thread.id, &format!("r{i}"), "q")
            .await
            .unwrap();
    }

    service.list_threads("b").await.unwrap();

    let stored = repo.find_by_id(thread.id).await.unwrap().unwrap();
    assert_eq!(stored.replies.len(), 6);
}

#[tokio::test]
async fn test_boards_are_isolated() {
    let (service, _) = memory_service();
    service.create_thread("a", "on a", "p").await.unwrap();
    service.create_thread("b", "on b", "p").await.unwrap();

    let on_a = service.list_threads("a").await.unwrap();
    assert_eq!(on_a.len(), 1);
    assert_eq!(on_a[0].text, "on a");
    assert!(service.list_threads("c").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_thread_wrong_password_keeps_it() {
    let (service, repo) = memory_service();
    let thread = service.create_thread("b", "op", "p").await.unwrap();

    let err = service.delete_thread(thread.id, "P").await.unwrap_err();

    assert_eq!(err, AppError::Unauthorized);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_delete_thread_then_redelete() {
    let (service, repo) = memory_service();
    let thread = service.create_thread("b", "op", "p").await.unwrap();
    service.create_reply(thread.id, "r", "q").await.unwrap();

    assert_eq!(service.delete_thread(thread.id, "p").await.unwrap(), Ack::Deleted);
    assert!(repo.is_empty());

    let err = service.delete_thread(thread.id, "p").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(..)));
    assert!(matches!(
        service.get_thread(thread.id).await,
        Err(AppError::NotFound(..))
    ));
}

#[tokio::test]
async fn test_report_thread_is_idempotent() {
    let (service, repo) = memory_service();
    let thread = service.create_thread("b", "op", "p").await.unwrap();
    let bumped = thread.bumped_on;

    assert_eq!(service.report_thread(thread.id).await.unwrap(), Ack::Reported);
    assert_eq!(service.report_thread(thread.id).await.unwrap(), Ack::Reported);

    let stored = repo.find_by_id(thread.id).await.unwrap().unwrap();
    assert!(stored.reported);
    assert_eq!(stored.bumped_on, bumped);
}

#[tokio::test]
async fn test_report_unknown_thread() {
    let (service, _) = memory_service();
    let err = service.report_thread(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(kind, _) if kind == "thread"));
}

#[tokio::test]
async fn test_storage_failure_is_reported_not_swallowed() {
    let thread = Thread::new("b", "op", "p", chrono::Utc::now()).unwrap();
    let mut repo = MockThreadRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(thread.clone())));
    repo.expect_save()
        .times(1)
        .returning(|_| Err(AppError::Storage("write failed".into())));

    let service = BoardService::with_clock(Arc::new(repo), Arc::new(StepClock::new()));
    let err = service.report_thread(Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err, AppError::Storage("write failed".into()));
}

#[tokio::test]
async fn test_report_racing_delete_does_not_restore_thread() {
    let (service, repo) = memory_service();
    let thread = service.create_thread("b", "op", "p").await.unwrap();
    let mut stale = repo.find_by_id(thread.id).await.unwrap().unwrap();

    service.delete_thread(thread.id, "p").await.unwrap();
    stale.report();

    assert!(matches!(
        repo.save(&stale).await,
        Err(AppError::NotFound(..))
    ));
    assert!(repo.is_empty());
    assert!(matches!(
        service.delete_thread(thread.id, "p").await,
        Err(AppError::NotFound(..))
    ));
}
