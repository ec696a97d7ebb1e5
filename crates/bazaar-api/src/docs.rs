use utoipa::OpenApi;

use crate::routes::{chats, health};

#[derive(OpenApi)]
#[openapi(
    info(title = "Bazaar API", description = "Chat list for the Bazaar marketplace"),
    paths(
        health::health_check,
        chats::create_chat,
        chats::list_chats,
        chats::update_chat,
    ),
    components(schemas(
        health::HealthResponse,
        chats::CreateChatRequest,
        chats::CreateChatResponse,
        chats::ChatResponse,
        chats::ListChatsResponse,
        chats::UpdateChatRequest,
        chats::UpdateChatResponse,
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "chats", description = "Chat list synchronization")
    )
)]
pub struct ApiDoc;
