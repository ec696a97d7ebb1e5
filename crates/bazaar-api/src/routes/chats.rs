use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use bazaar_persist::{Chat, UpdateAck};

use crate::{
    error::{ApiError, ApiResult},
    extract::{AppJson, AppQuery},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateChatRequest {
    /// User identifiers (24 hex digits)
    pub participants: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateChatResponse {
    pub chat_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub chat_id: String,
    pub participants: Vec<String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ListChatsQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListChatsResponse {
    pub chats: Vec<ChatResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateChatRequest {
    pub last_message: String,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateChatResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Create a new chat
#[utoipa::path(
    post,
    path = "/chats",
    request_body = CreateChatRequest,
    responses(
        (status = 201, description = "Chat created", body = CreateChatResponse),
        (status = 400, description = "Empty, malformed or mistyped participant list")
    ),
    tag = "chats"
)]
pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateChatRequest>,
) -> ApiResult<(StatusCode, Json<CreateChatResponse>)> {
    if req.participants.is_empty() {
        return Err(ApiError::BadRequest("participants must not be empty".to_string()));
    }

    let chat_id = state.chats.create_chat(req.participants.as_slice()).await?;

    Ok((StatusCode::CREATED, Json(CreateChatResponse { chat_id })))
}

/// List a user's chats, most recent activity first
#[utoipa::path(
    get,
    path = "/chats",
    params(
        ("user_id" = String, Query, description = "User whose chats to list")
    ),
    responses(
        (
            status = 200,
            description = "Chats ordered by last message time, newest first",
            body = ListChatsResponse
        ),
        (status = 400, description = "Missing or malformed user ID")
    ),
    tag = "chats"
)]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<ListChatsQuery>,
) -> ApiResult<Json<ListChatsResponse>> {
    let chats = state.chats.list_chats(&query.user_id).await?;

    Ok(Json(ListChatsResponse {
        chats: chats.into_iter().map(chat_to_response).collect(),
    }))
}

/// Record the latest message of a chat
///
/// An unknown chat ID is answered with `matched_count = 0`, not 404.
#[utoipa::path(
    put,
    path = "/chats/{chat_id}",
    params(
        ("chat_id" = String, Path, description = "Chat ID")
    ),
    request_body = UpdateChatRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateChatResponse),
        (status = 400, description = "Malformed chat ID or request body")
    ),
    tag = "chats"
)]
pub async fn update_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    AppJson(req): AppJson<UpdateChatRequest>,
) -> ApiResult<Json<UpdateChatResponse>> {
    let last_message_time = req.last_message_time.unwrap_or_else(Utc::now);

    let ack = state
        .chats
        .update_chat(&chat_id, req.last_message, last_message_time)
        .await?;

    Ok(Json(ack_to_response(ack)))
}

fn chat_to_response(chat: Chat) -> ChatResponse {
    ChatResponse {
        chat_id: chat.id,
        participants: chat.participants,
        last_message: chat.last_message,
        last_message_time: chat.last_message_time,
    }
}

fn ack_to_response(ack: UpdateAck) -> UpdateChatResponse {
    UpdateChatResponse {
        matched_count: ack.matched_count,
        modified_count: ack.modified_count,
    }
}
