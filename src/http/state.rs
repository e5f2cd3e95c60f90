//! Application state for the HTTP server.

use std::sync::Arc;

use super::logger::{Logger, StdoutLogger};
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Log sink for request lines and controller failure lines
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    /// Create application state with the default stdout logger.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_logger(repository, Arc::new(StdoutLogger))
    }

    /// Create application state with an explicit logger.
    ///
    /// Tests use this to capture log output instead of writing to stdout.
    pub fn with_logger(repository: Arc<dyn FullRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { repository, logger }
    }
}
