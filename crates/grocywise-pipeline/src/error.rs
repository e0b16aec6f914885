use thiserror::Error;

/// Why a service payload was rejected. Internal: callers of the pipeline
/// only ever see [`ServiceError`].
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("generation service returned an empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("response is missing required field `{0}`")]
    MissingRequiredField(&'static str),
}

/// The one failure kind surfaced to the presentation layer.
///
/// Empty responses, malformed JSON, missing fields and transport failures
/// are all logged with their detail and then reported with this generic
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub const GENERIC_MESSAGE: &'static str = "Failed to fetch grocery data. Please try again.";

    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-facing failure with the standard message.
    #[must_use]
    pub fn generic() -> Self {
        Self::new(Self::GENERIC_MESSAGE)
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
