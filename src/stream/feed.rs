use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::{mpsc, Mutex};

use super::client::StreamClient;

/// Source of raw event payloads for one session, one message per event.
/// The binder owns parsing so a malformed payload can be dropped without
/// killing the stream.
#[async_trait]
pub trait EventFeed: Send + Sync {
    async fn subscribe(&self, interview_id: &str) -> Result<BoxStream<'static, Vec<u8>>>;
}

/// Feed backed by a NATS subscription on the session's subject
pub struct NatsFeed {
    client: StreamClient,
}

impl NatsFeed {
    pub fn new(client: StreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventFeed for NatsFeed {
    async fn subscribe(&self, interview_id: &str) -> Result<BoxStream<'static, Vec<u8>>> {
        let subscriber = self.client.subscribe_events(interview_id).await?;
        Ok(subscriber.map(|message| message.payload.to_vec()).boxed())
    }
}

/// In-process feed over a bounded channel, for tests and local demos.
/// Single-shot: the receiver can be claimed by exactly one subscription,
/// matching the one-connection-per-binder ownership rule.
pub struct ChannelFeed {
    receiver: Mutex<Option<mpsc::Receiver<Vec<u8>>>>,
}

impl ChannelFeed {
    /// Returns the sender half and the feed wrapping the receiver half
    pub fn pair(buffer: usize) -> (mpsc::Sender<Vec<u8>>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        let feed = Self {
            receiver: Mutex::new(Some(rx)),
        };
        (tx, feed)
    }
}

#[async_trait]
impl EventFeed for ChannelFeed {
    async fn subscribe(&self, _interview_id: &str) -> Result<BoxStream<'static, Vec<u8>>> {
        let receiver = self
            .receiver
            .lock()
            .await
            .take()
            .context("Channel feed already subscribed")?;

        let stream = futures::stream::unfold(receiver, |mut rx| async move {
            rx.recv().await.map(|payload| (payload, rx))
        });
        Ok(stream.boxed())
    }
}
