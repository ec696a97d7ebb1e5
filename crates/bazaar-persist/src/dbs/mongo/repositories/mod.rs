mod chat;

pub use chat::{MongoChatRepository, CHATS_COLLECTION};
