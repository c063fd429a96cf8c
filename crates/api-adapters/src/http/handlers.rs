//! # Board Handlers
//!
//! Each handler parses one request into a single `BoardService` call and
//! serializes the result. No board logic lives here.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use services::BoardService;

use super::error::ApiError;
use super::extract::JsonOrForm;
use crate::dto::{
    parse_id, CreateReplyRequest, CreateThreadRequest, ReplyActionRequest, ThreadActionRequest,
    ThreadDocument, ThreadQuery, ThreadResponse,
};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: BoardService,
}

impl AppState {
    pub fn new(service: BoardService) -> Self {
        Self { service }
    }
}

/// POST /api/threads/{board} - Create a thread.
pub async fn create_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    JsonOrForm(req): JsonOrForm<CreateThreadRequest>,
) -> Result<Json<ThreadDocument>, ApiError> {
    let thread = state
        .service
        .create_thread(
            &board,
            req.text.as_deref().unwrap_or_default(),
            req.delete_password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(thread.into()))
}

/// GET /api/threads/{board} - The ten most recently bumped threads.
pub async fn list_threads(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> Result<Json<Vec<ThreadResponse>>, ApiError> {
    let views = state.service.list_threads(&board).await?;
    Ok(Json(views.into_iter().map(ThreadResponse::from).collect()))
}

/// DELETE /api/threads/{board} - Delete a thread with its password.
pub async fn delete_thread(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    JsonOrForm(req): JsonOrForm<ThreadActionRequest>,
) -> Result<&'static str, ApiError> {
    let thread_id = parse_id("thread_id", req.thread_id.as_deref())?;
    let ack = state
        .service
        .delete_thread(thread_id, req.delete_password.as_deref().unwrap_or_default())
        .await?;
    Ok(ack.as_str())
}

/// PUT /api/threads/{board} - Report a thread.
pub async fn report_thread(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    JsonOrForm(req): JsonOrForm<ThreadActionRequest>,
) -> Result<&'static str, ApiError> {
    let thread_id = parse_id("thread_id", req.thread_id.as_deref())?;
    let ack = state.service.report_thread(thread_id).await?;
    Ok(ack.as_str())
}

/// POST /api/replies/{board} - Reply to a thread.
pub async fn create_reply(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    JsonOrForm(req): JsonOrForm<CreateReplyRequest>,
) -> Result<Json<ThreadDocument>, ApiError> {
    let thread_id = parse_id("thread_id", req.thread_id.as_deref())?;
    let thread = state
        .service
        .create_reply(
            thread_id,
            req.text.as_deref().unwrap_or_default(),
            req.delete_password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(thread.into()))
}

/// GET /api/replies/{board}?thread_id= - A thread with all its replies.
pub async fn get_thread(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    Query(query): Query<ThreadQuery>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let thread_id = parse_id("thread_id", query.thread_id.as_deref())?;
    let view = state.service.get_thread(thread_id).await?;
    Ok(Json(view.into()))
}

/// DELETE /api/replies/{board} - Delete (tombstone) a reply.
pub async fn delete_reply(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    JsonOrForm(req): JsonOrForm<ReplyActionRequest>,
) -> Result<&'static str, ApiError> {
    let thread_id = parse_id("thread_id", req.thread_id.as_deref())?;
    let reply_id = parse_id("reply_id", req.reply_id.as_deref())?;
    let ack = state
        .service
        .delete_reply(
            thread_id,
            reply_id,
            req.delete_password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(ack.as_str())
}

/// PUT /api/replies/{board} - Report a reply.
pub async fn report_reply(
    State(state): State<AppState>,
    Path(_board): Path<String>,
    JsonOrForm(req): JsonOrForm<ReplyActionRequest>,
) -> Result<&'static str, ApiError> {
    let thread_id = parse_id("thread_id", req.thread_id.as_deref())?;
    let reply_id = parse_id("reply_id", req.reply_id.as_deref())?;
    let ack = state.service.report_reply(thread_id, reply_id).await?;
    Ok(ack.as_str())
}
