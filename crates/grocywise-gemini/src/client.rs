//! HTTP client for the Gemini REST API.
//!
//! Wraps `reqwest` with API key handling, non-2xx error mapping and typed
//! envelope deserialization. A call is made exactly once; there is no retry
//! and no overall request timeout, so callers that need one must impose it.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationRequest,
    GenerationResponse,
};
use crate::GenerationService;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// A missing `api_key` does not fail construction; every subsequent
    /// [`generate`](GenerationService::generate) call fails with
    /// [`GeminiError::MissingApiKey`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, model: &str) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("grocywise/0.1 (market-report)")
            .build()?;

        // Keep exactly one trailing slash so `Url::join` appends to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToOwned::to_owned);
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; generation calls will fail authentication");
        }

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn endpoint(&self) -> Result<Url, GeminiError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| GeminiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn post_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = self.endpoint()?;
        let body = GenerateContentRequest::from(request);

        tracing::debug!(
            model = %self.model,
            web_search = request.web_search_enabled,
            schema_constrained = request.output_schema.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        if let Some(candidate) = parsed.candidates.first() {
            tracing::debug!(
                finish_reason = candidate.finish_reason.as_deref().unwrap_or("unknown"),
                grounded = candidate.grounding_metadata.is_some(),
                "generateContent response received"
            );
        } else {
            tracing::warn!(model = %self.model, "generateContent returned no candidates");
        }

        Ok(GenerationResponse::from(parsed))
    }
}

impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeminiError> {
        self.post_generate(request).await
    }
}

/// Extracts the message from a Gemini error envelope, falling back to the
/// raw body when it is not one.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(500).collect(),
    }
}
