/// Health Notifier - a Lambda function that turns AWS Health events into
/// plain-language Microsoft Teams notifications.
///
/// The function receives AWS Health events from EventBridge, filters them
/// down to maintenance-relevant ones, asks Amazon Bedrock to rewrite each
/// event into a short user-facing summary, and posts the summary as an
/// adaptive card to a Teams incoming webhook.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - Amazon Bedrock (`InvokeModel`) for message simplification
/// - reqwest for the Teams webhook delivery
/// - Tokio for async runtime
///
/// Events flow one direction through the pipeline:
/// classification -> simplification -> card formatting -> webhook POST.
/// Batches are drained strictly sequentially with a fixed delay between
/// events so neither Bedrock nor the webhook sees a burst of requests.
///
/// # Example
///
/// ```no_run
/// use health_notifier::core::config::AppConfig;
/// use health_notifier::pipeline::EventPipeline;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     health_notifier::setup_logging();
///
///     let config = AppConfig {
///         teams_webhook_url: "https://example.webhook.office.com/hook".to_string(),
///         bedrock_region: "us-east-1".to_string(),
///         bedrock_model_id: None,
///     };
///
///     let pipeline = EventPipeline::from_config(&config).await?;
///     let event = serde_json::from_str(r#"{
///         "id": "evt-1",
///         "source": "aws.health",
///         "detail": {
///             "eventTypeCode": "AWS_RDS_MAINTENANCE_SCHEDULED",
///             "eventTypeCategory": "scheduledChange",
///             "service": "RDS",
///             "eventDescription": []
///         }
///     }"#)?;
///     pipeline.process_one(&event).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod cards;
pub mod classifier;
pub mod clients;
pub mod core;
pub mod errors;
pub mod handler;
pub mod pipeline;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at the start of the
/// Lambda bootstrap.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
