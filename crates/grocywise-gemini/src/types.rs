//! Gemini `generateContent` request and response types.
//!
//! The wire types mirror the REST API's camelCase JSON. Only the fields the
//! pipeline reads are modelled; everything else in the response is ignored.

use serde::{Deserialize, Serialize};

/// MIME type requested for structured output.
pub const JSON_MIME_TYPE: &str = "application/json";

/// What the pipeline asks of the service, independent of the wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: String,
    pub web_search_enabled: bool,
    pub output_mime_type: String,
    /// Response schema passed as a generation constraint, when supported.
    pub output_schema: Option<serde_json::Value>,
}

/// What the service returned: the generated text of the first candidate
/// and that candidate's grounding metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub text: Option<String>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let tools = if request.web_search_enabled {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            contents: vec![Content::text("user", &request.prompt)],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.system_instruction.clone()),
                }],
            },
            tools,
            generation_config: GenerationConfig {
                response_mime_type: request.output_mime_type.clone(),
                response_schema: request.output_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Response body
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl From<GenerateContentResponse> for GenerationResponse {
    /// Concatenates the text parts of the first candidate, as the official
    /// SDKs do for `response.text`.
    fn from(response: GenerateContentResponse) -> Self {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return GenerationResponse::default();
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        };

        GenerationResponse {
            text,
            grounding_metadata: candidate.grounding_metadata,
        }
    }
}

/// Citation and provenance data attached to a grounded candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_queries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<SearchEntryPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
}

/// Error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(web_search: bool, schema: Option<serde_json::Value>) -> GenerationRequest {
        GenerationRequest {
            prompt: "prices in Toronto".to_string(),
            system_instruction: "You are an analyst.".to_string(),
            web_search_enabled: web_search,
            output_mime_type: JSON_MIME_TYPE.to_string(),
            output_schema: schema,
        }
    }

    #[test]
    fn request_body_includes_search_tool_and_schema() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let body = GenerateContentRequest::from(&request(true, Some(schema.clone())));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prices in Toronto");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are an analyst."
        );
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn request_body_omits_tools_and_schema_when_disabled() {
        let body = GenerateContentRequest::from(&request(false, None));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let raw = serde_json::json!({
            "candidates": [
                {
                    "content": {"role": "model", "parts": [{"text": "{\"summary\":"}, {"text": "\"x\"}"}]},
                    "groundingMetadata": {
                        "groundingChunks": [{"web": {"uri": "https://a.example", "title": "A"}}],
                        "searchEntryPoint": {"renderedContent": "<div>chips</div>"}
                    }
                },
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = GenerationResponse::from(parsed);

        assert_eq!(response.text.as_deref(), Some("{\"summary\":\"x\"}"));
        let metadata = response.grounding_metadata.unwrap();
        assert_eq!(metadata.grounding_chunks.unwrap().len(), 1);
        assert_eq!(
            metadata.search_entry_point.unwrap().rendered_content.as_deref(),
            Some("<div>chips</div>")
        );
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        let response = GenerationResponse::from(parsed);
        assert!(response.text.is_none());
        assert!(response.grounding_metadata.is_none());
    }
}
