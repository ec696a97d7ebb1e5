use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Store-agnostic chat summary.
///
/// Identifiers are the canonical hex form of the store-native id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub participants: Vec<String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
}

impl Chat {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }
}

/// Result of a last-message update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateAck {
    pub fn matched(&self) -> bool {
        self.matched_count > 0
    }
}

/// BSON datetimes carry millisecond precision; every store truncates to it.
pub fn to_store_precision(time: DateTime<Utc>) -> DateTime<Utc> {
    time.trunc_subsecs(3)
}
