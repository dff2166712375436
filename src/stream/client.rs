use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

use crate::model::StreamEvent;

/// NATS subject carrying one session's live events
pub fn event_subject(interview_id: &str) -> String {
    format!("interview.events.{}", interview_id)
}

pub struct StreamClient {
    client: Client,
}

impl StreamClient {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Publish one stream event onto a session's subject
    pub async fn publish_event(&self, interview_id: &str, event: &StreamEvent) -> Result<()> {
        let subject = event_subject(interview_id);
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish stream event")?;

        info!(
            "Published event to {} (timestamp={})",
            subject, event.timestamp
        );

        Ok(())
    }

    /// Subscribe to one session's live events
    pub async fn subscribe_events(&self, interview_id: &str) -> Result<async_nats::Subscriber> {
        let subject = event_subject(interview_id);

        info!("Subscribing to events on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to stream events")?;

        Ok(subscriber)
    }

    /// Close NATS connection
    pub async fn close(self) -> Result<()> {
        info!("Closing NATS connection");
        // async-nats handles cleanup on drop
        Ok(())
    }
}
