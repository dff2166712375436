// Integration tests for the stream binder: attach/detach lifecycle,
// event application through a real feed, malformed payload handling,
// and the stale-load guard.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use interview_live::{
    ChannelFeed, ConnectionState, EventFeed, Interview, InterviewDetail, InterviewDirectory,
    InterviewStatus, LoadState, MetricsSnapshot, SessionLoader, Speaker, StreamBinder,
    StreamEvent, TranscriptEntry, ViewSnapshot,
};
use tokio::sync::mpsc;

fn interview(id: &str) -> Interview {
    Interview {
        id: id.to_string(),
        candidate_id: "c1".to_string(),
        candidate_name: "Anna Petrova".to_string(),
        position: "Frontend Developer".to_string(),
        status: InterviewStatus::InProgress,
        scheduled_at: Utc::now(),
        completed_at: None,
        duration: None,
        score: None,
    }
}

fn entry(id: &str, text: &str, timestamp: f64) -> TranscriptEntry {
    TranscriptEntry {
        id: id.to_string(),
        speaker: Speaker::Candidate,
        text: text.to_string(),
        timestamp,
        confidence: 0.9,
    }
}

fn metrics(overall: u32) -> MetricsSnapshot {
    MetricsSnapshot {
        pauses_sec: 0.0,
        avg_confidence: 0.9,
        speaking_rate: 120,
        sentiment_score: 0.5,
        keywords_used: vec![],
        technical_score: overall,
        communication_score: overall,
        overall_score: overall,
    }
}

async fn directory_with(id: &str) -> Arc<InterviewDirectory> {
    let directory = Arc::new(InterviewDirectory::new());
    directory
        .insert(InterviewDetail::bare(interview(id)))
        .await;
    directory
}

async fn send(tx: &mpsc::Sender<Vec<u8>>, event: &StreamEvent) {
    tx.send(serde_json::to_vec(event).unwrap()).await.unwrap();
}

async fn wait_for(
    binder: &StreamBinder,
    mut cond: impl FnMut(&ViewSnapshot) -> bool,
) -> ViewSnapshot {
    for _ in 0..250 {
        let snapshot = binder.snapshot().await;
        if cond(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("binder never reached the expected state");
}

#[tokio::test]
async fn test_live_events_flow_into_state() {
    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    binder.attach("s1").await;

    send(&tx, &StreamEvent::transcript(entry("1", "Hello", 0.0))).await;
    send(&tx, &StreamEvent::metrics(metrics(80), 2.0)).await;
    send(&tx, &StreamEvent::transcript(entry("2", "World", 5.0))).await;
    drop(tx);

    let snapshot = wait_for(&binder, |s| {
        s.connection == ConnectionState::ClosedClean
    })
    .await;

    let texts: Vec<&str> = snapshot.transcript.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "World"]);
    assert_eq!(snapshot.metrics.unwrap().overall_score, 80);
    assert_eq!(snapshot.load, LoadState::Ready);
}

#[tokio::test]
async fn test_historical_transcript_precedes_live_feed() {
    let directory = Arc::new(InterviewDirectory::new());
    directory
        .insert(InterviewDetail {
            interview: interview("s1"),
            transcript: Some(vec![entry("h1", "from history", 0.0)]),
            metrics: None,
        })
        .await;

    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory, Arc::new(feed));

    binder.attach("s1").await;
    send(&tx, &StreamEvent::transcript(entry("1", "from feed", 10.0))).await;
    drop(tx);

    let snapshot = wait_for(&binder, |s| {
        s.connection == ConnectionState::ClosedClean && s.load == LoadState::Ready
    })
    .await;

    let texts: Vec<&str> = snapshot.transcript.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["from history", "from feed"]);
}

#[tokio::test]
async fn test_malformed_event_is_dropped_stream_continues() {
    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    binder.attach("s1").await;

    send(&tx, &StreamEvent::transcript(entry("1", "before", 0.0))).await;
    tx.send(b"{not json".to_vec()).await.unwrap();
    tx.send(br#"{"type":"unknown","data":{},"timestamp":1.0}"#.to_vec())
        .await
        .unwrap();
    send(&tx, &StreamEvent::transcript(entry("2", "after", 5.0))).await;
    drop(tx);

    let snapshot = wait_for(&binder, |s| {
        s.connection == ConnectionState::ClosedClean
    })
    .await;

    let texts: Vec<&str> = snapshot.transcript.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["before", "after"]);
}

#[tokio::test]
async fn test_loader_failure_does_not_block_the_feed() {
    // Empty directory: the initial load fails for any id
    let directory = Arc::new(InterviewDirectory::new());
    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory, Arc::new(feed));

    binder.attach("missing").await;
    send(&tx, &StreamEvent::transcript(entry("1", "still here", 0.0))).await;
    drop(tx);

    let snapshot = wait_for(&binder, |s| {
        s.connection == ConnectionState::ClosedClean && s.load == LoadState::Unavailable
    })
    .await;

    assert!(snapshot.session.is_none());
    assert_eq!(snapshot.transcript.len(), 1);
}

#[tokio::test]
async fn test_feed_connect_failure_still_shows_loaded_data() {
    let (_tx, feed) = ChannelFeed::pair(8);
    // Claim the single-shot receiver so the binder's subscription fails
    let _ = feed.subscribe("elsewhere").await.unwrap();

    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));
    binder.attach("s1").await;

    let snapshot = wait_for(&binder, |s| {
        s.connection == ConnectionState::ClosedError && s.load == LoadState::Ready
    })
    .await;

    // Live updates are simply absent; the loaded session still renders
    assert_eq!(snapshot.session.unwrap().id, "s1");
    assert!(snapshot.transcript.is_empty());
}

#[tokio::test]
async fn test_reattach_same_session_is_a_noop() {
    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    binder.attach("s1").await;
    let _ = wait_for(&binder, |s| s.connection == ConnectionState::Open).await;

    // A real teardown would try to re-subscribe the single-shot feed and
    // end up closed-with-error; a no-op keeps the pump alive.
    binder.attach("s1").await;

    send(&tx, &StreamEvent::transcript(entry("1", "still flowing", 0.0))).await;
    let snapshot = wait_for(&binder, |s| !s.transcript.is_empty()).await;
    assert_eq!(snapshot.connection, ConnectionState::Open);
}

#[tokio::test]
async fn test_detach_is_idempotent() {
    let (_tx, feed) = ChannelFeed::pair(8);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    binder.attach("s1").await;
    let _ = wait_for(&binder, |s| s.connection == ConnectionState::Open).await;

    binder.detach().await;
    binder.detach().await;
    binder.detach().await;

    let snapshot = binder.snapshot().await;
    assert_eq!(snapshot.connection, ConnectionState::ClosedClean);
}

#[tokio::test]
async fn test_detach_right_after_attach_never_reports_open() {
    let (_tx, feed) = ChannelFeed::pair(8);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    // Detach before the pump has had a chance to signal that the
    // connection opened; the close must be the last word.
    binder.attach("s1").await;
    binder.detach().await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = binder.snapshot().await;
    assert_eq!(snapshot.connection, ConnectionState::ClosedClean);
}

#[tokio::test]
async fn test_detach_before_attach_is_safe() {
    let (_tx, feed) = ChannelFeed::pair(8);
    let binder = StreamBinder::new(Arc::new(InterviewDirectory::new()), Arc::new(feed));
    binder.detach().await;
}

#[tokio::test]
async fn test_user_intents_through_the_binder() {
    let (tx, feed) = ChannelFeed::pair(64);
    let binder = StreamBinder::new(directory_with("s1").await, Arc::new(feed));

    binder.attach("s1").await;
    send(&tx, &StreamEvent::transcript(entry("a", "one", 0.0))).await;
    send(&tx, &StreamEvent::transcript(entry("b", "two", 5.0))).await;
    send(&tx, &StreamEvent::transcript(entry("c", "three", 20.0))).await;

    let _ = wait_for(&binder, |s| s.transcript.len() == 3).await;

    assert_eq!(binder.seek(5.5).await, Some(1));
    binder.set_playing(true).await;
    binder.search("no such phrase").await;

    let snapshot = binder.snapshot().await;
    assert_eq!(snapshot.selected_entry_id.as_deref(), Some("b"));
    assert!(snapshot.playing);
    assert!(snapshot.transcript.is_empty());

    binder.search("three").await;
    assert_eq!(binder.snapshot().await.transcript.len(), 1);
}

/// Loader whose "slow" session resolves long after "fast"
struct StaggeredLoader;

#[async_trait]
impl SessionLoader for StaggeredLoader {
    async fn load_session(&self, interview_id: &str) -> Result<InterviewDetail> {
        if interview_id == "slow" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(InterviewDetail::bare(interview(interview_id)))
    }
}

#[tokio::test]
async fn test_stale_load_result_is_discarded_after_reattach() {
    let (_tx, feed) = ChannelFeed::pair(8);
    let binder = StreamBinder::new(Arc::new(StaggeredLoader), Arc::new(feed));

    binder.attach("slow").await;
    binder.attach("fast").await;

    // Give the slow load plenty of time to resolve and be discarded
    tokio::time::sleep(Duration::from_millis(400)).await;

    let snapshot = binder.snapshot().await;
    assert_eq!(snapshot.load, LoadState::Ready);
    assert_eq!(snapshot.session.unwrap().id, "fast");
}
