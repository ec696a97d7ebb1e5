use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{to_store_precision, Chat, UpdateAck};
use crate::store::ChatStore;

#[derive(Debug, Clone)]
struct StoredChat {
    id: ObjectId,
    participants: Vec<ObjectId>,
    last_message: String,
    last_message_time: DateTime<Utc>,
}

impl From<&StoredChat> for Chat {
    fn from(chat: &StoredChat) -> Self {
        Self {
            id: chat.id.to_hex(),
            participants: chat.participants.iter().map(|p| p.to_hex()).collect(),
            last_message: chat.last_message.clone(),
            last_message_time: chat.last_message_time,
        }
    }
}

/// Process-local chat store with the same semantics as the MongoDB one
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    chats: RwLock<Vec<StoredChat>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.chats.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chats.read().await.is_empty()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn insert_chat(
        &self,
        participants: Vec<ObjectId>,
        created_at: DateTime<Utc>,
    ) -> Result<ObjectId> {
        let chat = StoredChat {
            id: ObjectId::new(),
            participants,
            last_message: String::new(),
            last_message_time: to_store_precision(created_at),
        };
        let id = chat.id;
        self.chats.write().await.push(chat);
        Ok(id)
    }

    async fn find_chats_by_participant(&self, user_id: ObjectId) -> Result<Vec<Chat>> {
        let chats = self.chats.read().await;
        let mut matching: Vec<&StoredChat> = chats
            .iter()
            .filter(|c| c.participants.contains(&user_id))
            .collect();
        matching.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        Ok(matching.into_iter().map(Chat::from).collect())
    }

    async fn set_last_message(
        &self,
        chat_id: ObjectId,
        last_message: String,
        last_message_time: DateTime<Utc>,
    ) -> Result<UpdateAck> {
        let last_message_time = to_store_precision(last_message_time);
        let mut chats = self.chats.write().await;

        let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) else {
            return Ok(UpdateAck::default());
        };

        // Mirrors MongoDB: a $set that changes nothing counts as matched only
        let unchanged =
            chat.last_message == last_message && chat.last_message_time == last_message_time;
        chat.last_message = last_message;
        chat.last_message_time = last_message_time;

        Ok(UpdateAck {
            matched_count: 1,
            modified_count: if unchanged { 0 } else { 1 },
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
