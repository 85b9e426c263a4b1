//! Event pipeline orchestration.
//!
//! Composes classification, simplification, card formatting, and delivery
//! for single events and batches. Batches drain strictly sequentially with
//! a fixed delay between events: an explicit backpressure policy that
//! bounds simultaneous load on Bedrock and the Teams webhook.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::cards::{AdaptiveCard, build_card};
use crate::classifier::is_maintenance_relevant;
use crate::clients::{BedrockClient, TeamsClient};
use crate::core::config::AppConfig;
use crate::core::models::{HealthEvent, SimplifiedMessage};
use crate::errors::HealthNotifierError;

/// Pause inserted after every batch event, success or failure.
pub const INTER_EVENT_DELAY: Duration = Duration::from_secs(1);

/// Rewrites a health event into a user-facing summary.
#[async_trait]
pub trait MessageSimplifier: Send + Sync {
    async fn simplify(&self, event: &HealthEvent)
    -> Result<SimplifiedMessage, HealthNotifierError>;
}

/// Delivers a finished card to the notification channel.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, card: AdaptiveCard) -> Result<(), HealthNotifierError>;
}

pub struct EventPipeline {
    simplifier: Box<dyn MessageSimplifier>,
    sender: Box<dyn NotificationSender>,
}

impl EventPipeline {
    pub fn new(simplifier: Box<dyn MessageSimplifier>, sender: Box<dyn NotificationSender>) -> Self {
        Self { simplifier, sender }
    }

    /// Wire the pipeline with the real Bedrock and Teams clients.
    ///
    /// Configuration is injected here; no component below this point reads
    /// the process environment.
    pub async fn from_config(config: &AppConfig) -> Result<Self, HealthNotifierError> {
        let bedrock = BedrockClient::new(config).await;
        let teams = TeamsClient::new(config.teams_webhook_url.clone())?;
        Ok(Self::new(Box::new(bedrock), Box::new(teams)))
    }

    /// Process a single event: classify, simplify, format, send.
    ///
    /// Irrelevant events are a logged no-op. Simplification and delivery
    /// errors propagate to the caller unchanged.
    pub async fn process_one(&self, event: &HealthEvent) -> Result<(), HealthNotifierError> {
        info!("Processing AWS Health event: {}", event.id);

        if !is_maintenance_relevant(event) {
            info!(
                "Skipping non-maintenance event: {}",
                event.detail.event_type_category
            );
            return Ok(());
        }

        let message = self.simplifier.simplify(event).await?;
        info!("Simplified message generated: {:?}", message);

        let card = build_card(&message);
        self.sender.send(card).await?;

        info!("Health event processed successfully");
        Ok(())
    }

    /// Drain a batch through the pipeline, best-effort.
    ///
    /// Relevant events are processed one at a time; each failure is logged
    /// and the iteration continues. Partial success is the normal outcome,
    /// so this never returns an error.
    pub async fn process_batch(&self, events: &[HealthEvent]) {
        info!("Processing batch of {} health events", events.len());

        let maintenance_events: Vec<&HealthEvent> = events
            .iter()
            .filter(|event| is_maintenance_relevant(event))
            .collect();

        info!(
            "Found {} maintenance events to process",
            maintenance_events.len()
        );

        for event in maintenance_events {
            if let Err(e) = self.process_one(event).await {
                error!("Failed to process event {}: {}", event.id, e);
            }
            tokio::time::sleep(INTER_EVENT_DELAY).await;
        }
    }
}
