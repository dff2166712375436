use serde::Serialize;
use tracing::debug;

use crate::model::{
    EventPayload, Interview, InterviewDetail, MetricsSnapshot, StreamEvent, TranscriptEntry,
};

/// Seek matches the first entry within this many seconds of the target offset
pub const SEEK_TOLERANCE_SECS: f64 = 2.0;

/// Outcome of the one-shot initial load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Load still in flight
    Loading,
    /// Session metadata is present
    Ready,
    /// Load failed; the view shows an explicit "not found" state instead
    /// of an empty shell
    Unavailable,
}

/// Lifecycle of the live feed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connecting,
    Open,
    ClosedClean,
    ClosedError,
}

impl ConnectionState {
    /// Whether the "recording" indicator should be lit
    pub fn is_live(self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

/// A discrete signal from the feed pump. All connection transitions and
/// event applications funnel through [`ViewState::on_signal`] so the
/// reaction to each one is testable in one place.
#[derive(Debug, Clone)]
pub enum StreamSignal {
    Opened,
    Event(StreamEvent),
    Closed { clean: bool },
}

/// Read-only snapshot handed to the render surface. The transcript here is
/// the visible projection (search applied); the underlying sequence stays
/// inside the state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub load: LoadState,
    pub session: Option<Interview>,
    pub transcript: Vec<TranscriptEntry>,
    pub metrics: Option<MetricsSnapshot>,
    pub playing: bool,
    pub selected_entry_id: Option<String>,
    pub connection: ConnectionState,
}

/// Per-session view state with a single writer path: every mutation comes
/// in through one of the methods below, in arrival order.
#[derive(Debug)]
pub struct ViewState {
    load: LoadState,
    session: Option<Interview>,
    transcript: Vec<TranscriptEntry>,
    metrics: Option<MetricsSnapshot>,
    query: String,
    selected: Option<String>,
    playing: bool,
    connection: ConnectionState,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            session: None,
            transcript: Vec::new(),
            metrics: None,
            query: String::new(),
            selected: None,
            playing: false,
            connection: ConnectionState::Connecting,
        }
    }

    /// Merge the loader's initial snapshot. Historical transcript entries
    /// land *before* anything the live feed has already delivered, keeping
    /// the visible sequence equal to "initial ++ delivered".
    pub fn apply_initial(&mut self, detail: InterviewDetail) {
        let InterviewDetail {
            interview,
            transcript,
            metrics,
        } = detail;

        if let Some(history) = transcript {
            let live = std::mem::replace(&mut self.transcript, history);
            self.transcript.extend(live);
        }
        if self.metrics.is_none() {
            self.metrics = metrics;
        }
        self.session = Some(interview);
        self.load = LoadState::Ready;
    }

    /// The initial load failed and no fallback was substituted
    pub fn mark_unavailable(&mut self) {
        if self.load == LoadState::Loading {
            self.load = LoadState::Unavailable;
        }
    }

    /// Central dispatch for feed signals
    pub fn on_signal(&mut self, signal: StreamSignal) {
        match signal {
            StreamSignal::Opened => {
                self.connection = ConnectionState::Open;
            }
            StreamSignal::Event(event) => self.apply_event(event),
            StreamSignal::Closed { clean } => {
                self.connection = if clean {
                    ConnectionState::ClosedClean
                } else {
                    ConnectionState::ClosedError
                };
            }
        }
    }

    fn apply_event(&mut self, event: StreamEvent) {
        match event.payload {
            // Append in arrival order, no dedup by id, no resort by
            // timestamp. Entries arriving after a "completed" status are
            // appended like any other (closing remarks may be in flight).
            EventPayload::Transcript(entry) => {
                debug!(entry_id = %entry.id, "transcript entry appended");
                self.transcript.push(entry);
            }
            // Wholesale replacement, no merge, no history
            EventPayload::Metrics(snapshot) => {
                self.metrics = Some(snapshot);
            }
            EventPayload::Status(change) => {
                if let Some(session) = self.session.as_mut() {
                    session.status = change.status;
                }
            }
        }
    }

    /// Select the first entry in arrival order whose timestamp falls
    /// within the tolerance window of `offset` and return its position so
    /// the render surface can scroll it into view. A miss leaves the
    /// current selection unchanged.
    pub fn seek(&mut self, offset: f64) -> Option<usize> {
        let hit = self
            .transcript
            .iter()
            .position(|entry| (entry.timestamp - offset).abs() <= SEEK_TOLERANCE_SECS);
        if let Some(index) = hit {
            self.selected = Some(self.transcript[index].id.clone());
        }
        hit
    }

    /// Set the search query. Filtering only narrows the visible projection;
    /// the underlying sequence is untouched.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// The visible transcript: full sequence for an empty query, otherwise
    /// the case-insensitive substring matches in original order
    pub fn visible_transcript(&self) -> Vec<&TranscriptEntry> {
        if self.query.is_empty() {
            return self.transcript.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.transcript
            .iter()
            .filter(|entry| entry.text.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            load: self.load,
            session: self.session.clone(),
            transcript: self.visible_transcript().into_iter().cloned().collect(),
            metrics: self.metrics.clone(),
            playing: self.playing,
            selected_entry_id: self.selected.clone(),
            connection: self.connection,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
