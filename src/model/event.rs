use serde::{Deserialize, Serialize};

use super::{InterviewStatus, MetricsSnapshot, TranscriptEntry};

/// Payload of a status-change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: InterviewStatus,
}

/// Typed payload of one stream event, discriminated by the wire-level
/// `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EventPayload {
    Transcript(TranscriptEntry),
    Metrics(MetricsSnapshot),
    Status(StatusChange),
}

/// One message on the live feed: a self-describing tagged payload plus a
/// send-side timestamp.
///
/// Wire shape: `{"type": "transcript", "data": {...}, "timestamp": 5.0}`.
/// No acknowledgement, no sequence numbers, no resumption token; a dropped
/// connection loses whatever was sent during the gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(flatten)]
    pub payload: EventPayload,

    /// Seconds from session start, assigned by the sender
    pub timestamp: f64,
}

impl StreamEvent {
    pub fn transcript(entry: TranscriptEntry) -> Self {
        let timestamp = entry.timestamp;
        Self {
            payload: EventPayload::Transcript(entry),
            timestamp,
        }
    }

    pub fn metrics(snapshot: MetricsSnapshot, timestamp: f64) -> Self {
        Self {
            payload: EventPayload::Metrics(snapshot),
            timestamp,
        }
    }

    pub fn status(status: InterviewStatus, timestamp: f64) -> Self {
        Self {
            payload: EventPayload::Status(StatusChange { status }),
            timestamp,
        }
    }
}
