use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Database,
};

use crate::dbs::mongo::repositories::MongoChatRepository;
use crate::error::{PersistError, Result};
use crate::models::{Chat, UpdateAck};
use crate::store::ChatStore;

pub struct MongoChatStore {
    database: Database,
    chat_repo: MongoChatRepository,
}

impl MongoChatStore {
    /// Connect to MongoDB with default client options
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let options = ClientOptions::parse(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        Self::connect_with_options(options, database)
    }

    /// Build from already-parsed client options
    ///
    /// The driver connects lazily; the first round trip surfaces connectivity errors.
    pub fn connect_with_options(options: ClientOptions, database: &str) -> Result<Self> {
        let client = Client::with_options(options)
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        Ok(Self::from_database(client.database(database)))
    }

    pub fn from_database(database: Database) -> Self {
        let chat_repo = MongoChatRepository::new(&database);
        Self {
            database,
            chat_repo,
        }
    }

    pub async fn create_indexes(&self) -> Result<()> {
        self.chat_repo
            .create_indexes()
            .await
            .map_err(|e| PersistError::StoreWrite(e.to_string()))
    }
}

#[async_trait]
impl ChatStore for MongoChatStore {
    async fn insert_chat(
        &self,
        participants: Vec<ObjectId>,
        created_at: DateTime<Utc>,
    ) -> Result<ObjectId> {
        self.chat_repo
            .create_chat(participants, created_at)
            .await
            .map_err(|e| PersistError::StoreWrite(e.to_string()))
    }

    async fn find_chats_by_participant(&self, user_id: ObjectId) -> Result<Vec<Chat>> {
        let mongo_chats = self
            .chat_repo
            .list_chats(user_id)
            .await
            .map_err(|e| PersistError::StoreRead(e.to_string()))?;
        Ok(mongo_chats.into_iter().map(Chat::from).collect())
    }

    async fn set_last_message(
        &self,
        chat_id: ObjectId,
        last_message: String,
        last_message_time: DateTime<Utc>,
    ) -> Result<UpdateAck> {
        let result = self
            .chat_repo
            .update_last_message(chat_id, last_message, last_message_time)
            .await
            .map_err(|e| PersistError::StoreWrite(e.to_string()))?;

        Ok(UpdateAck {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
