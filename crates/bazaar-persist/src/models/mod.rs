mod chat;

pub use chat::{to_store_precision, Chat, UpdateAck};
