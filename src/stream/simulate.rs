use std::time::Duration;

use anyhow::Result;
use tracing::info;

use super::client::StreamClient;
use crate::model::{
    InterviewStatus, MetricsSnapshot, Speaker, StreamEvent, TranscriptEntry,
};

/// Replay a scripted event sequence onto a session's subject with a fixed
/// inter-event delay, standing in for a live interview engine.
pub async fn run_scripted_feed(
    client: &StreamClient,
    interview_id: &str,
    events: &[StreamEvent],
    delay: Duration,
) -> Result<()> {
    info!(
        "Replaying {} scripted events for interview {}",
        events.len(),
        interview_id
    );

    for event in events {
        client.publish_event(interview_id, event).await?;
        tokio::time::sleep(delay).await;
    }

    info!("Scripted feed finished for interview {}", interview_id);
    Ok(())
}

/// A short demo interview: four transcript lines, a final metrics
/// snapshot, then the completed status.
pub fn demo_script() -> Vec<StreamEvent> {
    let lines = [
        (
            Speaker::Interviewer,
            "Welcome to the interview! Tell me about yourself.",
            0.0,
            0.95,
        ),
        (
            Speaker::Candidate,
            "Hi! I'm a frontend developer with three years of React and TypeScript experience.",
            5.0,
            0.92,
        ),
        (
            Speaker::Interviewer,
            "Great! Which technologies do you use day to day?",
            15.0,
            0.98,
        ),
        (
            Speaker::Candidate,
            "Mostly React, TypeScript and CSS modules. I also work with Node.js on the backend and Redux for state management.",
            20.0,
            0.87,
        ),
    ];

    let mut events: Vec<StreamEvent> = lines
        .iter()
        .enumerate()
        .map(|(index, (speaker, text, timestamp, confidence))| {
            StreamEvent::transcript(TranscriptEntry {
                id: (index + 1).to_string(),
                speaker: *speaker,
                text: text.to_string(),
                timestamp: *timestamp,
                confidence: *confidence,
            })
        })
        .collect();

    let last_timestamp = lines[lines.len() - 1].2;

    events.push(StreamEvent::metrics(
        MetricsSnapshot {
            pauses_sec: 12.0,
            avg_confidence: 0.91,
            speaking_rate: 150,
            sentiment_score: 0.8,
            keywords_used: vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "JavaScript".to_string(),
                "CSS".to_string(),
                "Node.js".to_string(),
                "Redux".to_string(),
            ],
            technical_score: 85,
            communication_score: 90,
            overall_score: 87,
        },
        last_timestamp + 10.0,
    ));

    events.push(StreamEvent::status(
        InterviewStatus::Completed,
        last_timestamp + 10.0,
    ));

    events
}
