use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use grocywise_core::{FilterCategory, LocationDirectory};
use grocywise_gemini::{
    GeminiError, GenerationResponse, GroundingChunk, GroundingMetadata, WebSource,
};

use super::*;

/// Generation service double that replays a canned reply and records calls.
struct FakeService {
    reply: Option<GenerationResponse>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl FakeService {
    fn replying(text: &str) -> Self {
        Self::with_response(GenerationResponse {
            text: Some(text.to_string()),
            grounding_metadata: None,
        })
    }

    fn with_response(response: GenerationResponse) -> Self {
        Self {
            reply: Some(response),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> GenerationRequest {
        self.last_request.lock().unwrap().clone().expect("a request was sent")
    }
}

impl GenerationService for FakeService {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone().ok_or(GeminiError::Api {
            status: 500,
            message: "INTERNAL: backend unavailable".to_string(),
        })
    }
}

fn toronto() -> LocationSelector {
    LocationSelector::new(&LocationDirectory::builtin(), "Canada", "Toronto").unwrap()
}

const REPORT: &str = r#"{
    "summary": "Apples and carrots are the best buys.",
    "produce": [
        {"name": "Apples", "priceEstimate": "$1.99/lb", "seasonality": "In-Season", "reason": "Ontario harvest"}
    ],
    "stores": [
        {"name": "FreshCo", "category": "Discount Store", "highlights": "Weekly flyers", "accessibility": "Subway accessible"}
    ]
}"#;

const REPORT_WITH_COMPARISON: &str = r#"{
    "summary": "Comparison ready.",
    "produce": [],
    "stores": [],
    "shoppingComparison": [
        {"storeName": "Loblaws", "items": [], "totalCost": "$15.50", "isLowestPrice": true},
        {"storeName": "No Frills", "items": [], "totalCost": "$12.00", "isLowestPrice": false},
        {"storeName": "FreshCo", "items": [], "totalCost": "$12.00", "isLowestPrice": false}
    ]
}"#;

#[tokio::test]
async fn no_list_makes_one_call_and_omits_comparison() {
    let pipeline = QueryPipeline::new(FakeService::replying(REPORT), PipelineOptions::default());

    let result = pipeline.run(&toronto(), None, None).await.unwrap();

    assert_eq!(pipeline.service().calls(), 1);
    assert_eq!(result.summary, "Apples and carrots are the best buys.");
    assert_eq!(result.produce.len(), 1);
    assert_eq!(result.stores[0].name, "FreshCo");
    assert!(result.shopping_comparison.is_none());
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn request_carries_search_tool_schema_and_instruction() {
    let pipeline = QueryPipeline::new(FakeService::replying(REPORT), PipelineOptions::default());
    pipeline.run(&toronto(), None, None).await.unwrap();

    let request = pipeline.service().last_request();
    assert!(request.web_search_enabled);
    assert_eq!(request.output_mime_type, JSON_MIME_TYPE);
    assert!(request.output_schema.is_some());
    assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
    assert!(request.prompt.contains("Toronto, Canada"));
}

#[tokio::test]
async fn disabled_capabilities_are_not_requested() {
    let options = PipelineOptions {
        web_search_enabled: false,
        schema_constraint_enabled: false,
    };
    let pipeline = QueryPipeline::new(FakeService::replying(REPORT), options);
    pipeline.run(&toronto(), None, None).await.unwrap();

    let request = pipeline.service().last_request();
    assert!(!request.web_search_enabled);
    assert!(request.output_schema.is_none());
}

#[tokio::test]
async fn comparison_is_reranked_client_side() {
    let pipeline = QueryPipeline::new(
        FakeService::replying(REPORT_WITH_COMPARISON),
        PipelineOptions::default(),
    );
    let result = pipeline
        .run(&toronto(), Some("2kg apples, 1L milk"), None)
        .await
        .unwrap();

    let comparison = result.shopping_comparison.as_deref().unwrap();
    let flags: Vec<bool> = comparison.iter().map(|c| c.is_lowest_price).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(comparison[0].total_numeric, Some(15.5));
    assert_eq!(result.lowest_price_store().unwrap().store_name, "No Frills");
}

#[tokio::test]
async fn comparison_without_list_is_discarded() {
    let pipeline = QueryPipeline::new(
        FakeService::replying(REPORT_WITH_COMPARISON),
        PipelineOptions::default(),
    );
    let result = pipeline.run(&toronto(), Some("   "), None).await.unwrap();
    assert!(result.shopping_comparison.is_none());
    assert!(!pipeline.service().last_request().prompt.contains("shopping list"));
}

#[tokio::test]
async fn filters_reach_the_prompt() {
    let mut filters = FilterSet::new();
    filters.insert(FilterCategory::Dietary, "Halal").unwrap();
    let pipeline = QueryPipeline::new(FakeService::replying(REPORT), PipelineOptions::default());
    pipeline.run(&toronto(), None, Some(&filters)).await.unwrap();

    let prompt = pipeline.service().last_request().prompt;
    assert!(prompt.contains("Halal"));
    assert!(prompt.contains("must strictly adhere"));
}

#[tokio::test]
async fn grounding_sources_are_attached() {
    let response = GenerationResponse {
        text: Some(REPORT.to_string()),
        grounding_metadata: Some(GroundingMetadata {
            grounding_chunks: Some(vec![
                GroundingChunk {
                    web: Some(WebSource {
                        uri: Some("https://flyers.example/toronto".to_string()),
                        title: Some("Toronto flyers".to_string()),
                    }),
                },
                GroundingChunk {
                    web: Some(WebSource {
                        uri: Some("https://prices.example".to_string()),
                        title: None,
                    }),
                },
            ]),
            ..GroundingMetadata::default()
        }),
    };
    let pipeline = QueryPipeline::new(FakeService::with_response(response), PipelineOptions::default());
    let result = pipeline.run(&toronto(), None, None).await.unwrap();

    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[0].title, "Toronto flyers");
    assert_eq!(result.sources[1].title, "Search Reference");
}

#[tokio::test]
async fn transport_failure_collapses_to_generic_error() {
    let pipeline = QueryPipeline::new(FakeService::failing(), PipelineOptions::default());
    let err = pipeline.run(&toronto(), None, None).await.unwrap_err();
    assert_eq!(err, ServiceError::generic());
    assert_eq!(err.message(), "Failed to fetch grocery data. Please try again.");
    assert_eq!(pipeline.service().calls(), 1);
}

#[tokio::test]
async fn invalid_payloads_collapse_to_generic_error() {
    for text in ["", "not json", r#"{"summary": "s", "produce": []}"#] {
        let pipeline = QueryPipeline::new(FakeService::replying(text), PipelineOptions::default());
        let err = pipeline.run(&toronto(), None, None).await.unwrap_err();
        assert_eq!(err.message(), ServiceError::GENERIC_MESSAGE, "payload: {text:?}");
    }
}

#[tokio::test]
async fn missing_text_is_an_empty_response() {
    let pipeline = QueryPipeline::new(
        FakeService::with_response(GenerationResponse::default()),
        PipelineOptions::default(),
    );
    assert!(pipeline.run(&toronto(), None, None).await.is_err());
}
