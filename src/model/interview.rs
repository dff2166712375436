use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an interview session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    /// Wire-level name, as used in the status filter query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

/// Who produced a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Candidate,
    Interviewer,
}

/// One scheduled/ongoing/completed interview between a candidate and the
/// AI interviewer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,

    pub candidate_id: String,

    pub candidate_name: String,

    pub position: String,

    pub status: InterviewStatus,

    /// When the session was (or is) scheduled to start
    pub scheduled_at: DateTime<Utc>,

    /// Set once the session has finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Total duration in seconds, for completed sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    /// Aggregate score assigned after completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// A single transcribed line within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique within one session
    pub id: String,

    pub speaker: Speaker,

    pub text: String,

    /// Offset in seconds from session start. Informational for seeking;
    /// entries keep their arrival order regardless of this value.
    pub timestamp: f64,

    /// Recognition confidence, 0.0 to 1.0
    pub confidence: f32,
}

/// Aggregate metrics for a session. At most one snapshot is current at a
/// time; a new one replaces the old wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub pauses_sec: f64,
    pub avg_confidence: f32,
    /// Words per minute
    pub speaking_rate: u32,
    pub sentiment_score: f32,
    pub keywords_used: Vec<String>,
    pub technical_score: u32,
    pub communication_score: u32,
    pub overall_score: u32,
}

/// An interview together with any historical transcript and metrics,
/// as returned by the session loader for completed sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetail {
    #[serde(flatten)]
    pub interview: Interview,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,
}

impl InterviewDetail {
    /// Wrap a bare interview with no history attached
    pub fn bare(interview: Interview) -> Self {
        Self {
            interview,
            transcript: None,
            metrics: None,
        }
    }
}
