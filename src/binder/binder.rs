use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::loader::SessionLoader;
use super::view::{StreamSignal, ViewSnapshot, ViewState};
use crate::model::StreamEvent;
use crate::stream::EventFeed;

/// One live attachment: the session it belongs to and the feed pump task.
/// Dropping it aborts the pump, so a binder going away cannot leave the
/// connection dangling.
struct Attachment {
    interview_id: String,
    pump: JoinHandle<()>,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Binds one interview session's live event feed to view state.
///
/// The binder owns at most one feed connection at a time. The initial load
/// and the feed subscription run independently: a feed failure never blocks
/// display of loaded data, and a load failure never stops the feed from
/// connecting. All state mutation funnels through one mutex, so events and
/// user intents apply one at a time in arrival order.
///
/// Both collaborators are injected at construction; there is no shared
/// global client.
pub struct StreamBinder {
    loader: Arc<dyn SessionLoader>,
    feed: Arc<dyn EventFeed>,
    state: Arc<Mutex<ViewState>>,
    attachment: Mutex<Option<Attachment>>,
    /// Bumped on every attach/detach; an initial load whose generation no
    /// longer matches discards its result instead of touching state that
    /// has since been reset or released.
    generation: Arc<AtomicU64>,
}

impl StreamBinder {
    pub fn new(loader: Arc<dyn SessionLoader>, feed: Arc<dyn EventFeed>) -> Self {
        Self {
            loader,
            feed,
            state: Arc::new(Mutex::new(ViewState::new())),
            attachment: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Attach to a session. Re-attaching with the same id while already
    /// attached is a no-op; a different id tears down the previous
    /// connection first, keeping at most one live connection per binder.
    pub async fn attach(&self, interview_id: &str) {
        let mut attachment = self.attachment.lock().await;

        if let Some(current) = attachment.as_ref() {
            if current.interview_id == interview_id {
                return;
            }
        }
        // Tear down any previous attachment before switching sessions
        attachment.take();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            *state = ViewState::new();
        }

        info!("Attaching to interview session: {}", interview_id);

        self.spawn_initial_load(interview_id, generation);
        let pump = self.spawn_feed_pump(interview_id);

        *attachment = Some(Attachment {
            interview_id: interview_id.to_string(),
            pump,
        });
    }

    /// Release the feed connection. Unconditional and idempotent: safe
    /// after a feed error, on an already-detached binder, and on repeated
    /// calls. Already-applied state is not undone.
    pub async fn detach(&self) {
        let mut attachment = self.attachment.lock().await;
        if let Some(released) = attachment.take() {
            let interview_id = released.interview_id.clone();
            // Abort the pump before recording the close, so a pump waiting
            // on the state lock cannot slip a late signal in behind it.
            drop(released);
            // An in-flight load with the old generation discards its result
            self.generation.fetch_add(1, Ordering::SeqCst);
            let mut state = self.state.lock().await;
            state.on_signal(StreamSignal::Closed { clean: true });
            info!("Detached from interview session: {}", interview_id);
        }
    }

    /// Seek the transcript to a playback offset. Returns the position of
    /// the selected entry so the render surface can scroll it into view,
    /// or None when nothing falls within the tolerance window.
    pub async fn seek(&self, offset: f64) -> Option<usize> {
        let mut state = self.state.lock().await;
        state.seek(offset)
    }

    /// Case-insensitive substring filter over the visible transcript
    pub async fn search(&self, query: &str) {
        let mut state = self.state.lock().await;
        state.set_query(query);
    }

    /// Pure play/pause flag; no effect on the feed
    pub async fn set_playing(&self, playing: bool) {
        let mut state = self.state.lock().await;
        state.set_playing(playing);
    }

    /// Read-only snapshot for the render surface
    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.lock().await;
        state.snapshot()
    }

    fn spawn_initial_load(&self, interview_id: &str, generation: u64) {
        let loader = Arc::clone(&self.loader);
        let state = Arc::clone(&self.state);
        let current_generation = Arc::clone(&self.generation);
        let interview_id = interview_id.to_string();

        tokio::spawn(async move {
            let result = loader.load_session(&interview_id).await;

            let mut state = state.lock().await;
            if current_generation.load(Ordering::SeqCst) != generation {
                // The view re-attached or detached while the load was in
                // flight; its result no longer belongs to anyone.
                return;
            }
            match result {
                Ok(detail) => state.apply_initial(detail),
                Err(e) => {
                    warn!("Failed to load session {}: {}", interview_id, e);
                    state.mark_unavailable();
                }
            }
        });
    }

    fn spawn_feed_pump(&self, interview_id: &str) -> JoinHandle<()> {
        let feed = Arc::clone(&self.feed);
        let state = Arc::clone(&self.state);
        let interview_id = interview_id.to_string();

        tokio::spawn(async move {
            let mut events = match feed.subscribe(&interview_id).await {
                Ok(events) => events,
                Err(e) => {
                    // Live updates stay absent; loaded data still renders
                    warn!("Failed to open event feed for {}: {}", interview_id, e);
                    let mut state = state.lock().await;
                    state.on_signal(StreamSignal::Closed { clean: false });
                    return;
                }
            };

            {
                let mut state = state.lock().await;
                state.on_signal(StreamSignal::Opened);
            }

            while let Some(payload) = events.next().await {
                match serde_json::from_slice::<StreamEvent>(&payload) {
                    Ok(event) => {
                        let mut state = state.lock().await;
                        state.on_signal(StreamSignal::Event(event));
                    }
                    Err(e) => {
                        // Drop the one malformed event, keep consuming
                        warn!("Dropping malformed stream event: {}", e);
                    }
                }
            }

            let mut state = state.lock().await;
            state.on_signal(StreamSignal::Closed { clean: true });
        })
    }
}
