//! Lambda handler: envelope normalization, config resolution, and the
//! invocation response contract.
//!
//! This is the only layer that reads the process environment or sees the
//! loosely shaped invocation payload. Everything below it works with
//! typed `HealthEvent` values and an injected `AppConfig`.

use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::core::config::AppConfig;
use crate::core::models::{HealthEvent, InboundEvent};
use crate::errors::HealthNotifierError;
use crate::pipeline::EventPipeline;

const AWS_HEALTH_SOURCE: &str = "aws.health";

/// Invocation result in the proxy-response shape.
#[derive(Debug, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: ResponseHeaders,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
}

impl HandlerResponse {
    fn success() -> Self {
        Self {
            status_code: 200,
            headers: ResponseHeaders {
                content_type: "application/json",
            },
            body: json!({
                "message": "Health events processed successfully",
                "processedAt": Utc::now().to_rfc3339(),
            })
            .to_string(),
        }
    }

    fn failure(error: &HealthNotifierError) -> Self {
        Self {
            status_code: 500,
            headers: ResponseHeaders {
                content_type: "application/json",
            },
            body: json!({
                "error": "Internal server error",
                "message": error.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            })
            .to_string(),
        }
    }
}

/// Classify the raw invocation payload into one of the recognized
/// envelope shapes.
///
/// Supported shapes: a bare AWS Health event (`source == "aws.health"`),
/// or a `Records` envelope whose entries carry a health event in their
/// `body` (JSON string) or `detail`. Records that fail to parse are
/// logged and skipped; a payload matching neither shape is `Unsupported`.
pub fn normalize(payload: &Value) -> InboundEvent {
    if payload.get("source").and_then(Value::as_str) == Some(AWS_HEALTH_SOURCE) {
        match serde_json::from_value::<HealthEvent>(payload.clone()) {
            Ok(event) => return InboundEvent::Single(event),
            Err(e) => {
                warn!("Failed to parse aws.health payload: {}", e);
                return InboundEvent::Unsupported;
            }
        }
    }

    if let Some(records) = payload.get("Records").and_then(Value::as_array) {
        let mut events = Vec::new();
        for record in records {
            match parse_record(record) {
                Some(event) if event.source == AWS_HEALTH_SOURCE => events.push(event),
                Some(event) => {
                    info!("Skipping record from source: {}", event.source);
                }
                None => warn!("Failed to parse event record"),
            }
        }
        return InboundEvent::Batch(events);
    }

    InboundEvent::Unsupported
}

/// Extract the embedded health event from one batch record.
///
/// The event sits either in `body` as a JSON string or in `detail` as an
/// object (or string, depending on the routing hop).
fn parse_record(record: &Value) -> Option<HealthEvent> {
    let embedded = match record.get("body").and_then(Value::as_str) {
        Some(body) => serde_json::from_str(body).ok()?,
        None => match record.get("detail") {
            Some(Value::String(detail)) => serde_json::from_str(detail).ok()?,
            Some(detail) => detail.clone(),
            None => return None,
        },
    };
    serde_json::from_value(embedded).ok()
}

async fn handle(payload: Value) -> Result<(), HealthNotifierError> {
    let config = AppConfig::from_env()?;
    let pipeline = EventPipeline::from_config(&config).await?;

    match normalize(&payload) {
        InboundEvent::Single(event) => pipeline.process_one(&event).await?,
        InboundEvent::Batch(events) if !events.is_empty() => {
            pipeline.process_batch(&events).await;
        }
        InboundEvent::Batch(_) => info!("Batch envelope contained no AWS Health events"),
        InboundEvent::Unsupported => info!("Unsupported event format, skipping processing"),
    }

    Ok(())
}

/// Lambda entry point. Never returns an error to the runtime for
/// processing failures; everything is folded into the 200/500 response
/// body.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<HandlerResponse, Error> {
    info!("Lambda function started");

    match handle(event.payload).await {
        Ok(()) => Ok(HandlerResponse::success()),
        Err(e) => {
            error!("Error in Lambda handler: {}", e);
            Ok(HandlerResponse::failure(&e))
        }
    }
}

pub use self::function_handler as handler;
