use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Chat, UpdateAck};

/// Document-store access for the `chats` collection
///
/// Each method is a single round trip. Implementations never retry and never
/// wrap calls in transactions.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Insert a new chat and return the identifier assigned to it
    async fn insert_chat(
        &self,
        participants: Vec<ObjectId>,
        created_at: DateTime<Utc>,
    ) -> Result<ObjectId>;

    /// Every chat containing `user_id`, most recent `last_message_time` first
    async fn find_chats_by_participant(&self, user_id: ObjectId) -> Result<Vec<Chat>>;

    /// Replace `last_message` and `last_message_time` together
    async fn set_last_message(
        &self,
        chat_id: ObjectId,
        last_message: String,
        last_message_time: DateTime<Utc>,
    ) -> Result<UpdateAck>;

    /// Liveness check
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend name used in health reports
    fn name(&self) -> &'static str {
        "chat_store"
    }
}
