use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    results::UpdateResult,
    Collection, Database, IndexModel,
};

use crate::dbs::mongo::models::MongoChat;

pub const CHATS_COLLECTION: &str = "chats";

#[derive(Clone)]
pub struct MongoChatRepository {
    collection: Collection<MongoChat>,
}

impl MongoChatRepository {
    pub fn new(database: &Database) -> Self {
        let collection = database.collection(CHATS_COLLECTION);
        Self { collection }
    }

    /// Insert a fresh chat with an empty last message
    pub async fn create_chat(
        &self,
        participants: Vec<ObjectId>,
        created_at: DateTime<Utc>,
    ) -> mongodb::error::Result<ObjectId> {
        let chat = MongoChat {
            id: ObjectId::new(),
            participants,
            last_message: String::new(),
            last_message_time: created_at,
        };

        self.collection.insert_one(&chat).await?;
        Ok(chat.id)
    }

    /// Chats a user participates in, newest activity first
    pub async fn list_chats(&self, user_id: ObjectId) -> mongodb::error::Result<Vec<MongoChat>> {
        let filter = doc! { "participants": user_id };
        self.collection
            .find(filter)
            .sort(doc! { "last_message_time": -1 })
            .await?
            .try_collect()
            .await
    }

    /// Set last message and its time in one single-document update
    pub async fn update_last_message(
        &self,
        chat_id: ObjectId,
        last_message: String,
        last_message_time: DateTime<Utc>,
    ) -> mongodb::error::Result<UpdateResult> {
        let filter = doc! { "_id": chat_id };
        let update = doc! {
            "$set": {
                "last_message": last_message,
                "last_message_time": bson::DateTime::from_chrono(last_message_time),
            }
        };

        self.collection.update_one(filter, update).await
    }

    /// Index backing the participant lookup and its sort
    pub async fn create_indexes(&self) -> mongodb::error::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "participants": 1, "last_message_time": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}
