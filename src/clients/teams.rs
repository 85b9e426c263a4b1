//! Teams incoming-webhook delivery.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{error, info};

use crate::cards::{AdaptiveCard, TeamsWebhookPayload};
use crate::errors::HealthNotifierError;
use crate::pipeline::NotificationSender;

/// Budget for one webhook POST, connection setup included.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts adaptive cards to a Teams incoming webhook. One attempt per
/// card; retrying is the caller's decision.
pub struct TeamsClient {
    http: HttpClient,
    webhook_url: String,
}

impl TeamsClient {
    pub fn new(webhook_url: String) -> Result<Self, HealthNotifierError> {
        let http = HttpClient::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self { http, webhook_url })
    }
}

#[async_trait]
impl NotificationSender for TeamsClient {
    async fn send(&self, card: AdaptiveCard) -> Result<(), HealthNotifierError> {
        let payload = TeamsWebhookPayload::new(card);

        let response = self
            .http
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending message to Teams: {}", e);
                HealthNotifierError::from(e)
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            error!("Teams webhook returned status {}", status);
            return Err(HealthNotifierError::Delivery(format!(
                "Teams webhook returned status {status}"
            )));
        }

        info!("Message sent to Teams successfully");
        Ok(())
    }
}
