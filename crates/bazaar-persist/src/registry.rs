use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::error::{PersistError, Result};
use crate::models::{to_store_precision, Chat, UpdateAck};
use crate::store::ChatStore;

/// Chat-list registry
///
/// Keeps one summary record per conversation and serves them back by
/// recency. Holds no state of its own; every call goes straight to the
/// injected store.
#[derive(Clone)]
pub struct ChatRegistry {
    store: Arc<dyn ChatStore>,
}

impl ChatRegistry {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ChatStore> {
        &self.store
    }

    /// Create a chat with an empty last message stamped with the current time
    ///
    /// Duplicate participants collapse to their first occurrence.
    pub async fn create_chat<S: AsRef<str>>(&self, participants: &[S]) -> Result<String> {
        let mut ids: Vec<ObjectId> = Vec::with_capacity(participants.len());
        for raw in participants {
            let id = parse_id(raw.as_ref())?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            tracing::warn!("Creating chat with no participants");
        }

        let created_at = to_store_precision(Utc::now());
        let chat_id = self.store.insert_chat(ids, created_at).await?;

        tracing::debug!(chat_id = %chat_id, "Chat created");
        Ok(chat_id.to_hex())
    }

    /// List every chat the user participates in, most recent first
    pub async fn list_chats(&self, user_id: &str) -> Result<Vec<Chat>> {
        let user = parse_id(user_id)?;
        let chats = self.store.find_chats_by_participant(user).await?;

        tracing::debug!(user_id = %user, count = chats.len(), "Chats listed");
        Ok(chats)
    }

    /// Overwrite the last message summary of a chat
    ///
    /// A missing chat is reported through the acknowledgement, not as an error.
    /// No ordering check is made against the stored timestamp.
    pub async fn update_chat(
        &self,
        chat_id: &str,
        last_message: impl Into<String>,
        last_message_time: DateTime<Utc>,
    ) -> Result<UpdateAck> {
        let chat = parse_id(chat_id)?;
        let ack = self
            .store
            .set_last_message(chat, last_message.into(), last_message_time)
            .await?;

        if !ack.matched() {
            tracing::debug!(chat_id = %chat, "Update matched no chat");
        }
        Ok(ack)
    }
}

fn parse_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|e| PersistError::InvalidIdentifier(format!("{raw:?}: {e}")))
}
