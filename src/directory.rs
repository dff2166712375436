//! In-memory interview directory backing the HTTP API and the in-process
//! session loader.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::binder::SessionLoader;
use crate::model::{
    Interview, InterviewDetail, InterviewStatus, MetricsSnapshot, Speaker, TranscriptEntry,
};

/// List query: 1-based page, page size, exact status filter (`all` or
/// absent disables), case-insensitive search over candidate name and
/// position.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Session directory keyed by interview id, insertion order preserved
pub struct InterviewDirectory {
    interviews: RwLock<Vec<InterviewDetail>>,
}

impl InterviewDirectory {
    pub fn new() -> Self {
        Self {
            interviews: RwLock::new(Vec::new()),
        }
    }

    /// A directory pre-populated with demo sessions: two completed ones
    /// (one with history attached) and one scheduled, live-feedable one.
    pub fn with_samples() -> Self {
        Self {
            interviews: RwLock::new(sample_interviews()),
        }
    }

    /// Insert or replace by interview id
    pub async fn insert(&self, detail: InterviewDetail) {
        let mut interviews = self.interviews.write().await;
        if let Some(existing) = interviews
            .iter_mut()
            .find(|d| d.interview.id == detail.interview.id)
        {
            *existing = detail;
        } else {
            interviews.push(detail);
        }
    }

    pub async fn get(&self, interview_id: &str) -> Option<InterviewDetail> {
        let interviews = self.interviews.read().await;
        interviews
            .iter()
            .find(|d| d.interview.id == interview_id)
            .cloned()
    }

    /// Filter then paginate, preserving insertion order
    pub async fn list(&self, query: &ListQuery) -> Vec<Interview> {
        let interviews = self.interviews.read().await;

        let status_filter = query.status.as_deref().filter(|s| *s != "all");
        let search = query.search.as_deref().map(str::to_lowercase);

        let filtered = interviews.iter().map(|d| &d.interview).filter(|i| {
            status_filter.map_or(true, |s| i.status.as_str() == s)
                && search.as_deref().map_or(true, |needle| {
                    i.candidate_name.to_lowercase().contains(needle)
                        || i.position.to_lowercase().contains(needle)
                })
        });

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10);
        filtered
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for InterviewDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionLoader for InterviewDirectory {
    async fn load_session(&self, interview_id: &str) -> Result<InterviewDetail> {
        self.get(interview_id)
            .await
            .ok_or_else(|| anyhow!("Interview {} not found", interview_id))
    }
}

fn sample_interviews() -> Vec<InterviewDetail> {
    let now = Utc::now();

    let completed_with_history = InterviewDetail {
        interview: Interview {
            id: "1".to_string(),
            candidate_id: "1".to_string(),
            candidate_name: "Anna Petrova".to_string(),
            position: "Frontend Developer".to_string(),
            status: InterviewStatus::Completed,
            scheduled_at: now - Duration::days(5) - Duration::hours(2),
            completed_at: Some(now - Duration::days(5)),
            duration: Some(5400),
            score: Some(85),
        },
        transcript: Some(vec![
            TranscriptEntry {
                id: "1".to_string(),
                speaker: Speaker::Interviewer,
                text: "Welcome to the interview! Tell me about yourself.".to_string(),
                timestamp: 0.0,
                confidence: 0.95,
            },
            TranscriptEntry {
                id: "2".to_string(),
                speaker: Speaker::Candidate,
                text: "Hi! I'm a frontend developer with three years of React and TypeScript experience."
                    .to_string(),
                timestamp: 5.0,
                confidence: 0.92,
            },
        ]),
        metrics: Some(MetricsSnapshot {
            pauses_sec: 12.0,
            avg_confidence: 0.91,
            speaking_rate: 150,
            sentiment_score: 0.8,
            keywords_used: vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "CSS".to_string(),
            ],
            technical_score: 85,
            communication_score: 90,
            overall_score: 87,
        }),
    };

    let completed_bare = InterviewDetail::bare(Interview {
        id: "2".to_string(),
        candidate_id: "3".to_string(),
        candidate_name: "Maria Kozlova".to_string(),
        position: "UI/UX Designer".to_string(),
        status: InterviewStatus::Completed,
        scheduled_at: now - Duration::days(10) - Duration::hours(1),
        completed_at: Some(now - Duration::days(10)),
        duration: Some(3600),
        score: Some(92),
    });

    let scheduled = InterviewDetail::bare(Interview {
        id: "4".to_string(),
        candidate_id: "2".to_string(),
        candidate_name: "Ivan Sidorov".to_string(),
        position: "Backend Developer".to_string(),
        status: InterviewStatus::Scheduled,
        scheduled_at: now + Duration::days(1),
        completed_at: None,
        duration: None,
        score: None,
    });

    vec![completed_with_history, completed_bare, scheduled]
}
