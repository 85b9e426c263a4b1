use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthNotifierError {
    #[error("Missing required configuration: {0}")]
    Configuration(String),

    #[error("Failed to invoke text generation model: {0}")]
    Generation(String),

    #[error("Failed to deliver notification to webhook: {0}")]
    Delivery(String),
}

impl From<reqwest::Error> for HealthNotifierError {
    fn from(error: reqwest::Error) -> Self {
        HealthNotifierError::Delivery(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<aws_sdk_bedrockruntime::error::SdkError<E, R>> for HealthNotifierError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    fn from(error: aws_sdk_bedrockruntime::error::SdkError<E, R>) -> Self {
        HealthNotifierError::Generation(format!("{error:?}"))
    }
}
