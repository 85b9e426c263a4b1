use std::env;

use crate::errors::HealthNotifierError;

/// Default region for the Bedrock runtime endpoint.
pub const DEFAULT_BEDROCK_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub teams_webhook_url: String,
    pub bedrock_region: String,
    pub bedrock_model_id: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from the Lambda environment.
    ///
    /// `TEAMS_WEBHOOK_URL` is mandatory; the function fails without it.
    /// `BEDROCK_REGION` and `BEDROCK_MODEL_ID` are optional overrides.
    pub fn from_env() -> Result<Self, HealthNotifierError> {
        Ok(Self {
            teams_webhook_url: env::var("TEAMS_WEBHOOK_URL").map_err(|_| {
                HealthNotifierError::Configuration(
                    "TEAMS_WEBHOOK_URL environment variable is required".to_string(),
                )
            })?,
            bedrock_region: env::var("BEDROCK_REGION")
                .unwrap_or_else(|_| DEFAULT_BEDROCK_REGION.to_string()),
            bedrock_model_id: env::var("BEDROCK_MODEL_ID").ok(),
        })
    }
}
