use std::sync::Arc;

use crate::directory::InterviewDirectory;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Interview directory serving list/detail queries
    pub directory: Arc<InterviewDirectory>,
}

impl AppState {
    pub fn new(directory: Arc<InterviewDirectory>) -> Self {
        Self { directory }
    }
}
