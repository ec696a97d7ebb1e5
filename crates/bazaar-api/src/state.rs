use std::sync::Arc;

use bazaar_persist::ChatRegistry;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The registry is built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chats: ChatRegistry,
}

impl AppState {
    pub fn new(config: Config, chats: ChatRegistry) -> Self {
        Self {
            config: Arc::new(config),
            chats,
        }
    }
}
