mod client;
mod models;
mod repositories;

pub use client::MongoChatStore;
pub use models::MongoChat;
pub use repositories::{MongoChatRepository, CHATS_COLLECTION};
