//! Live transcript/metrics stream binder
//!
//! This module provides the `StreamBinder` abstraction that manages:
//! - The one-shot initial session load (metadata + history)
//! - One live feed connection per attached session
//! - Merging typed events into per-session view state
//! - Seek/search/play-pause intents from the render surface
//! - Connection teardown on every exit path

mod binder;
mod loader;
mod view;

pub use binder::StreamBinder;
pub use loader::SessionLoader;
pub use view::{
    ConnectionState, LoadState, StreamSignal, ViewSnapshot, ViewState, SEEK_TOLERANCE_SECS,
};
