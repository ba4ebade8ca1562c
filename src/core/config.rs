use crate::storage::log::SyncMode;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub initial_labels: Vec<String>,  // Labels stamped on every ingested message
    pub log_sync: SyncMode,           // Durability of index log appends
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_labels: vec!["inbox".to_string(), "unread".to_string()],
            log_sync: SyncMode::Immediate,
        }
    }
}
