//! Client for the Gemini `generateContent` endpoint with search grounding.
//!
//! [`GeminiClient`] sends one structured-output request per call and hands
//! back the generated text plus grounding metadata. The pipeline depends on
//! the [`GenerationService`] trait rather than the concrete client.

pub mod client;
pub mod error;
pub mod types;

use std::future::Future;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{
    GenerationRequest, GenerationResponse, GroundingChunk, GroundingMetadata, SearchEntryPoint,
    WebSource, JSON_MIME_TYPE,
};

/// The external generation service: one prompt in, text plus grounding out.
///
/// Implementations must not retry; a failed call is reported once.
pub trait GenerationService {
    /// Generate a response for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError`] when the service cannot be reached, rejects
    /// the request, or returns an unreadable envelope.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResponse, GeminiError>> + Send;
}
