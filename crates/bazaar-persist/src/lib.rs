pub mod dbs;
pub mod error;
pub mod models;
pub mod registry;
pub mod store;
#[cfg(feature = "mongodb")]
pub mod builder;

pub use dbs::memory::InMemoryChatStore;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoChatStore;
pub use error::{PersistError, Result};
pub use models::{Chat, UpdateAck};
pub use registry::ChatRegistry;
pub use store::ChatStore;
#[cfg(feature = "mongodb")]
pub use builder::ChatRegistryBuilder;
