//! End-to-end pipeline runs against a wiremock Gemini endpoint.

use grocywise_core::{LocationDirectory, LocationSelector};
use grocywise_gemini::GeminiClient;
use grocywise_pipeline::{PipelineOptions, QueryPipeline, QuerySession, QueryState, ServiceError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn pipeline(base_url: &str) -> QueryPipeline<GeminiClient> {
    let client = GeminiClient::with_base_url(Some("test-key"), "gemini-test", base_url)
        .expect("client construction should not fail");
    QueryPipeline::new(client, PipelineOptions::default())
}

fn toronto() -> LocationSelector {
    LocationSelector::new(&LocationDirectory::builtin(), "Canada", "Toronto").unwrap()
}

fn envelope(report: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": report.to_string()}]},
            "finishReason": "STOP",
            "groundingMetadata": {
                "groundingChunks": [
                    {"web": {"uri": "https://flyers.example/toronto", "title": "Weekly flyers"}},
                    {"web": {"title": "No link"}}
                ],
                "searchEntryPoint": {"renderedContent": "<div class=\"chip\">toronto grocery deals</div>"}
            }
        }]
    })
}

#[tokio::test]
async fn toronto_without_list_calls_service_once() {
    let server = MockServer::start().await;
    let report = serde_json::json!({
        "summary": "Apples are in season.",
        "produce": [{"name": "Apples", "priceEstimate": "$1.99/lb", "seasonality": "In-Season", "reason": "Local"}],
        "stores": [{"name": "FreshCo", "category": "Discount Store", "highlights": "Cheap", "accessibility": "TTC"}]
    });

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "tools": [{"googleSearch": {}}],
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&report)))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server.uri())
        .run(&toronto(), None, None)
        .await
        .expect("pipeline should succeed");

    assert_eq!(result.summary, "Apples are in season.");
    assert!(result.shopping_comparison.is_none());
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].uri, "https://flyers.example/toronto");
    assert!(result
        .search_affordance
        .as_ref()
        .is_some_and(|a| a.untrusted_html().contains("toronto grocery deals")));
}

#[tokio::test]
async fn shopping_list_comparison_is_reranked() {
    let server = MockServer::start().await;
    let report = serde_json::json!({
        "summary": "Compared three stores.",
        "produce": [],
        "stores": [],
        "shoppingComparison": [
            {"storeName": "Loblaws", "items": [{"itemName": "Apples 2kg", "price": "$6.00"}], "totalCost": "$15.50", "isLowestPrice": true},
            {"storeName": "No Frills", "items": [], "totalCost": "$12.00", "isLowestPrice": true},
            {"storeName": "Metro", "items": [], "totalCost": "$12.00", "isLowestPrice": false}
        ]
    });

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&report)))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server.uri())
        .run(&toronto(), Some("2kg apples, 1L milk, bread"), None)
        .await
        .unwrap();

    let flags: Vec<bool> = result
        .shopping_comparison
        .as_deref()
        .unwrap()
        .iter()
        .map(|c| c.is_lowest_price)
        .collect();
    assert_eq!(flags, vec![false, true, false]);
}

#[tokio::test]
async fn upstream_error_surfaces_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = pipeline(&server.uri())
        .run(&toronto(), None, None)
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::generic());
}

#[tokio::test]
async fn session_records_failure_for_missing_field() {
    let server = MockServer::start().await;
    let report = serde_json::json!({"summary": "No stores listed.", "produce": []});
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&report)))
        .mount(&server)
        .await;

    let pipeline = pipeline(&server.uri());
    let mut session = QuerySession::new();
    let state = session
        .submit(&pipeline, &toronto(), None, None)
        .await
        .unwrap();

    assert!(matches!(state, QueryState::Failed(err) if err.message() == ServiceError::GENERIC_MESSAGE));
    assert!(session.result().is_none());
}
