//! Bedrock runtime client for message simplification.
//!
//! Builds the prompt, invokes the model, and defensively parses the reply.
//! The model is treated as an untrusted formatter: malformed output never
//! surfaces as an error, only a failed `InvokeModel` call does.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::Region;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::core::config::AppConfig;
use crate::core::models::{HealthEvent, SimplifiedMessage};
use crate::errors::HealthNotifierError;
use crate::pipeline::MessageSimplifier;

/// Model invoked when `BEDROCK_MODEL_ID` is not set.
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";

const MAX_TOKEN_COUNT: u32 = 1000;
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.9;

// Aligned with the webhook delivery budget.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback values for fields the model fails to supply.
pub const DEFAULT_TITLE: &str = "Maintenance Update";
pub const DEFAULT_SUMMARY: &str = "No summary available";
pub const DEFAULT_IMPACT: &str = "Impact not specified";
pub const DEFAULT_TIMEFRAME: &str = "Timeframe not specified";
pub const DEFAULT_STATUS: &str = "Status unknown";

const PARSE_FAILURE_SUMMARY: &str = "Unable to parse maintenance details";

/// Bedrock-backed simplifier.
pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockClient {
    pub async fn new(config: &AppConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(OPERATION_TIMEOUT)
            .build();
        let sdk_config = aws_config::from_env()
            .region(Region::new(config.bedrock_region.clone()))
            .timeout_config(timeouts)
            .load()
            .await;

        Self {
            client: aws_sdk_bedrockruntime::Client::new(&sdk_config),
            model_id: config
                .bedrock_model_id
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        }
    }
}

#[async_trait]
impl MessageSimplifier for BedrockClient {
    async fn simplify(
        &self,
        event: &HealthEvent,
    ) -> Result<SimplifiedMessage, HealthNotifierError> {
        let prompt = build_prompt(event);

        let request_body = json!({
            "inputText": prompt,
            "textGenerationConfig": {
                "maxTokenCount": MAX_TOKEN_COUNT,
                "stopSequences": [],
                "temperature": TEMPERATURE,
                "topP": TOP_P
            }
        });

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_body.to_string().into_bytes()))
            .send()
            .await
            .map_err(|e| {
                error!("Error calling Bedrock: {:?}", e);
                HealthNotifierError::from(e)
            })?;

        let response_body: Value =
            serde_json::from_slice(response.body().as_ref()).map_err(|e| {
                HealthNotifierError::Generation(format!("Unreadable model response body: {e}"))
            })?;

        Ok(parse_model_reply(&extract_completion_text(&response_body)))
    }
}

/// Build the simplification prompt for one health event.
///
/// The prompt instructs the model to reply with only a JSON object in the
/// documented seven-key shape.
pub fn build_prompt(event: &HealthEvent) -> String {
    let detail = &event.detail;

    let description = detail
        .event_description
        .first()
        .map_or("No description available", |d| {
            d.latest_description.as_str()
        });
    let affected_entities = if detail.affected_entities.is_empty() {
        "None specified".to_string()
    } else {
        detail
            .affected_entities
            .iter()
            .map(|e| e.entity_value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Please analyze this AWS Health event and provide a simplified, user-friendly \
         maintenance message in the following JSON format:\n\
         \n\
         {{\n\
         \x20 \"title\": \"Brief, clear title\",\n\
         \x20 \"summary\": \"Simple explanation of what's happening\",\n\
         \x20 \"affectedServices\": [\"List of affected services\"],\n\
         \x20 \"impact\": \"What this means for users\",\n\
         \x20 \"timeframe\": \"When this will happen or is expected to resolve\",\n\
         \x20 \"status\": \"Current status\",\n\
         \x20 \"recommendations\": [\"Action items for users\"]\n\
         }}\n\
         \n\
         AWS Health Event Details:\n\
         - Service: {}\n\
         - Event Type: {}\n\
         - Category: {}\n\
         - Description: {}\n\
         - Start Time: {}\n\
         - End Time: {}\n\
         - Status: {}\n\
         - Affected Entities: {}\n\
         \n\
         Please provide only the JSON response, no additional text.",
        detail.service,
        detail.event_type_code,
        detail.event_type_category,
        description,
        detail.start_time.as_deref().unwrap_or("Not specified"),
        detail.end_time.as_deref().unwrap_or("Not specified"),
        detail.status_code.as_deref().unwrap_or("Unknown"),
        affected_entities,
    )
}

/// Pull the generated text out of the model response body.
///
/// Titan-family responses nest the text under `results[].outputText`;
/// older completion-style bodies use `completion` or `text`.
pub fn extract_completion_text(body: &Value) -> String {
    body.get("completion")
        .and_then(Value::as_str)
        .or_else(|| body.get("text").and_then(Value::as_str))
        .or_else(|| {
            body.get("results")
                .and_then(Value::as_array)
                .and_then(|results| results.first())
                .and_then(|r| r.get("outputText"))
                .and_then(Value::as_str)
        })
        .unwrap_or_default()
        .to_string()
}

/// Parse the model's raw reply into a fully populated message.
///
/// Searches for the first brace-delimited JSON object (greedy: first `{`
/// to last `}`). Missing keys take their named defaults; an unparseable
/// reply falls back to the raw text as the summary. This function never
/// fails.
pub fn parse_model_reply(raw: &str) -> SimplifiedMessage {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            match serde_json::from_str::<Value>(&raw[start..=end]) {
                Ok(parsed) => return message_from_json(&parsed),
                Err(e) => {
                    warn!("Error parsing Bedrock response: {}", e);
                    return fallback_message(PARSE_FAILURE_SUMMARY.to_string());
                }
            }
        }
    }

    let summary = if raw.is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        raw.to_string()
    };
    fallback_message(summary)
}

fn message_from_json(parsed: &Value) -> SimplifiedMessage {
    SimplifiedMessage {
        title: string_field(parsed, "title", DEFAULT_TITLE),
        summary: string_field(parsed, "summary", DEFAULT_SUMMARY),
        affected_services: list_field(parsed, "affectedServices"),
        impact: string_field(parsed, "impact", DEFAULT_IMPACT),
        timeframe: string_field(parsed, "timeframe", DEFAULT_TIMEFRAME),
        status: string_field(parsed, "status", DEFAULT_STATUS),
        recommendations: list_field(parsed, "recommendations"),
    }
}

fn fallback_message(summary: String) -> SimplifiedMessage {
    SimplifiedMessage {
        title: DEFAULT_TITLE.to_string(),
        summary,
        affected_services: Vec::new(),
        impact: DEFAULT_IMPACT.to_string(),
        timeframe: DEFAULT_TIMEFRAME.to_string(),
        status: DEFAULT_STATUS.to_string(),
        recommendations: Vec::new(),
    }
}

fn string_field(parsed: &Value, key: &str, default: &str) -> String {
    parsed
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn list_field(parsed: &Value, key: &str) -> Vec<String> {
    parsed
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
