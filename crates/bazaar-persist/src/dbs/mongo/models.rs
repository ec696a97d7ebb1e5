use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Chat;

/// MongoDB-specific chat document (uses ObjectId and native BSON datetimes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoChat {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub participants: Vec<ObjectId>,
    #[serde(default)]
    pub last_message: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_message_time: DateTime<Utc>,
}

impl From<MongoChat> for Chat {
    fn from(chat: MongoChat) -> Self {
        Self {
            id: chat.id.to_hex(),
            participants: chat.participants.into_iter().map(|p| p.to_hex()).collect(),
            last_message: chat.last_message,
            last_message_time: chat.last_message_time,
        }
    }
}
