//! Live event transport: NATS publish/subscribe per session subject, the
//! feed seam the binder consumes, and the scripted replay used in place of
//! a real interview engine.

mod client;
mod feed;
mod simulate;

pub use client::{event_subject, StreamClient};
pub use feed::{ChannelFeed, EventFeed, NatsFeed};
pub use simulate::{demo_script, run_scripted_feed};
