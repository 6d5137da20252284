//! API handlers for the Filedeck web API.

pub mod explorer;
pub mod files;

pub use explorer::*;
pub use files::*;

use crate::explorer::{Explorer, DEFAULT_RECENT_LIMIT};

/// Default maximum upload size (50MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Facade over the managed root.
    pub explorer: Explorer,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
    /// Default number of entries in the recent files view.
    pub recent_limit: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new(explorer: Explorer) -> Self {
        Self {
            explorer,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Set the default recent files limit.
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }
}
