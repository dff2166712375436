use anyhow::Result;
use async_trait::async_trait;

use crate::model::InterviewDetail;

/// One-shot source of a session's initial data: metadata plus any
/// historical transcript and metrics (completed sessions carry both).
/// Single request, no pagination.
#[async_trait]
pub trait SessionLoader: Send + Sync {
    async fn load_session(&self, interview_id: &str) -> Result<InterviewDetail>;
}
