//! HTTP API server: the session-loader side of the system
//!
//! This module provides the REST surface render clients load sessions from:
//! - GET /interviews - list with pagination/status/search
//! - GET /interviews/:id - one interview with history
//! - GET /health - health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ApiResponse, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
