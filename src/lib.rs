pub mod binder;
pub mod config;
pub mod directory;
pub mod http;
pub mod model;
pub mod settings;
pub mod stream;

pub use binder::{
    ConnectionState, LoadState, SessionLoader, StreamBinder, StreamSignal, ViewSnapshot,
    ViewState, SEEK_TOLERANCE_SECS,
};
pub use config::Config;
pub use directory::{InterviewDirectory, ListQuery};
pub use http::{create_router, AppState};
pub use model::{
    EventPayload, Interview, InterviewDetail, InterviewStatus, MetricsSnapshot, Speaker,
    StreamEvent, TranscriptEntry,
};
pub use settings::{CriteriaWeights, FileStore, SettingsStore, CRITERIA_WEIGHTS_KEY};
pub use stream::{ChannelFeed, EventFeed, NatsFeed, StreamClient};
