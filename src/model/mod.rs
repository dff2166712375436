//! Domain types shared across the binder, the stream transport, and the
//! HTTP directory API.

mod event;
mod interview;

pub use event::{EventPayload, StatusChange, StreamEvent};
pub use interview::{
    Interview, InterviewDetail, InterviewStatus, MetricsSnapshot, Speaker, TranscriptEntry,
};
