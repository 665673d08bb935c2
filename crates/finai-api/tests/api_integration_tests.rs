//! API Integration Tests
//!
//! Drives the full router (demo advisor, in-memory store seeded with the
//! dashboard sample) through the request/response cycle.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use finai_advisor::{AdvisorOptions, FinancialAdvisor};
use finai_api::{create_router, create_test_router, ApiConfig, AppState};
use finai_llm::{
    CompletionRequest, CompletionResponse, LLMProvider, LLMRouter, ProviderKind, TokenUsage,
};
use finai_store::Store;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn demo_router() -> Router {
    let store = Store::with_sample_data().await.unwrap();
    create_test_router(Arc::new(AppState::demo(store)))
}

/// Provider double that always answers with the same text
struct CannedProvider(&'static str);

#[async_trait]
impl LLMProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "Canned"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    fn model(&self) -> &str {
        "canned-model"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, _request: CompletionRequest) -> finai_llm::Result<CompletionResponse> {
        Ok(CompletionResponse {
            content: self.0.to_string(),
            usage: TokenUsage {
                prompt_tokens: 500,
                completion_tokens: 250,
                total_tokens: 750,
            },
            model: Some("canned-model".to_string()),
        })
    }
}

async fn provider_router(reply: &'static str) -> Router {
    let store = Store::with_sample_data().await.unwrap();
    let router = LLMRouter::new(Arc::new(CannedProvider(reply)));
    let advisor = FinancialAdvisor::new(Arc::new(router), AdvisorOptions::default());
    create_test_router(Arc::new(AppState::new(store, Arc::new(advisor))))
}

/// Make a request and get the JSON response
async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(json_body) => Body::from(serde_json::to_vec(&json_body).unwrap()),
        None => Body::empty(),
    };
    raw_request(router, method, uri, body).await
}

async fn raw_request(router: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));

    (status, json)
}

async fn sample_transactions(router: &Router) -> Value {
    let (_, json) = json_request(router, "GET", "/api/transactions", None).await;
    json["transactions"].clone()
}

// =============================================================================
// Status Endpoints
// =============================================================================

mod status_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_status_reports_demo_mode() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["mode"], "demo");
        assert_eq!(json["model"], "simulation");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["transactions"], 10);
        assert_eq!(json["analyses"], 0);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["info"]["title"], "FinAI API");
        assert!(json["paths"]["/api/analyze"].is_object());
    }

    #[tokio::test]
    async fn test_full_router_sets_request_id() {
        let store = Store::with_sample_data().await.unwrap();
        let router = create_router(Arc::new(AppState::demo(store)), ApiConfig::default());

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}

// =============================================================================
// Transaction Endpoints
// =============================================================================

mod transaction_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/api/transactions", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);

        let transactions = json["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 10);
        assert_eq!(transactions[0]["description"], "Netflix");
        assert_eq!(transactions[0]["date"], "2026-01-01");
        assert_eq!(transactions[0]["amount"], -15.99);
        assert_eq!(transactions[9]["description"], "HBO Max");

        let dates: Vec<&str> = transactions
            .iter()
            .map(|t| t["date"].as_str().unwrap())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_create_transaction() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "POST",
            "/api/transactions",
            Some(json!({
                "description": "YouTube Premium",
                "amount": -11.99,
                "category": "Suscripción",
                "date": "2026-01-02"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["transaction"]["id"], 11);
        assert_eq!(json["transaction"]["amount"], -11.99);

        let listed = sample_transactions(&router).await;
        assert_eq!(listed.as_array().unwrap().len(), 11);
        assert_eq!(listed[0]["description"], "YouTube Premium");
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_is_bad_request() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "POST",
            "/api/transactions",
            Some(json!({ "description": "No amount" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_with_empty_description_is_bad_request() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "POST",
            "/api/transactions",
            Some(json!({
                "description": "",
                "amount": -5,
                "category": "Comida",
                "date": "2026-01-02"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("description"));
    }

    #[tokio::test]
    async fn test_update_transaction() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "PUT",
            "/api/transactions/4",
            Some(json!({
                "description": "Supermercado Central",
                "amount": -90.25,
                "category": "Comida",
                "date": "2025-12-29"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["transaction"]["id"], 4);
        assert_eq!(json["transaction"]["description"], "Supermercado Central");
        assert_eq!(json["transaction"]["amount"], -90.25);
    }

    #[tokio::test]
    async fn test_update_unknown_transaction_is_not_found() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "PUT",
            "/api/transactions/999",
            Some(json!({
                "description": "Ghost",
                "amount": -1,
                "category": "Otros",
                "date": "2026-01-01"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let router = demo_router().await;
        let before = sample_transactions(&router).await;

        let (status, json) = json_request(&router, "DELETE", "/api/transactions/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["transaction"]["id"], 3);
        assert_eq!(json["transaction"]["description"], "Amazon Prime");

        let after = sample_transactions(&router).await;
        let expected: Vec<Value> = before
            .as_array()
            .unwrap()
            .iter()
            .filter(|t| t["id"] != 3)
            .cloned()
            .collect();
        assert_eq!(after.as_array().unwrap(), &expected);

        let (status, _) = json_request(&router, "DELETE", "/api/transactions/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trends_compare_latest_months() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/api/transactions/trends", None).await;

        assert_eq!(status, StatusCode::OK);
        let trends = &json["trends"];
        let monthly = trends["monthly"].as_array().unwrap();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0]["month"], "2025-12");
        assert_eq!(monthly[0]["count"], 9);
        assert_eq!(monthly[1]["month"], "2026-01");
        assert_eq!(monthly[1]["total"], 15.99);

        assert_eq!(trends["comparison"]["currentMonth"], "2026-01");
        assert_eq!(trends["comparison"]["previousMonth"], "2025-12");
        assert_eq!(trends["comparison"]["isIncreasing"], false);
    }

    #[tokio::test]
    async fn test_out_of_range_amount_is_rejected() {
        let router = demo_router().await;
        for _ in 0..2 {
            let (status, json) = json_request(
                &router,
                "POST",
                "/api/transactions",
                Some(json!({
                    "description": "Yacht",
                    "amount": -5e28,
                    "category": "Ocio",
                    "date": "2026-01-20"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(json["error"].as_str().unwrap().contains("amount"));
        }

        let (status, json) = json_request(&router, "GET", "/api/transactions/trends", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["trends"]["monthly"][1]["total"], 15.99);
    }

    #[tokio::test]
    async fn test_non_numeric_id_gets_error_body() {
        let router = demo_router().await;

        let (status, json) = json_request(&router, "DELETE", "/api/transactions/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("abc"));

        let (status, json) = json_request(
            &router,
            "PUT",
            "/api/transactions/abc",
            Some(json!({
                "description": "Netflix",
                "amount": -15.99,
                "category": "Suscripción",
                "date": "2026-01-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let after = sample_transactions(&router).await;
        assert_eq!(after.as_array().unwrap().len(), 10);
    }
}

// =============================================================================
// Analysis Endpoints
// =============================================================================

mod analysis_endpoints {
    use super::*;

    const VALID_REPLY: &str = "```json\n{\"totalSpent\":\"294.74\",\"subscriptions\":6,\"subscriptionCost\":\"72.94\",\"predictions\":{\"nextMonth\":\"309.48\",\"savings\":\"29.18\"},\"insights\":[\"a\",\"b\",\"c\",\"d\"],\"duplicates\":[{\"name\":\"Streaming\",\"count\":4,\"saving\":20.5}]}\n```";

    #[tokio::test]
    async fn test_empty_batch_is_bad_request() {
        let router = demo_router().await;
        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No transactions were sent for analysis");
    }

    #[tokio::test]
    async fn test_missing_batch_is_bad_request() {
        let router = demo_router().await;
        let (status, _) = json_request(&router, "POST", "/api/analyze", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let router = demo_router().await;
        let (status, json) =
            raw_request(&router, "POST", "/api/analyze", Body::from("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_demo_analysis_totals() {
        let router = demo_router().await;
        let transactions = sample_transactions(&router).await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["mode"], "demo");
        assert_eq!(json["model"], "simulation");
        assert_eq!(json["tokensUsed"], 0);

        let analysis = &json["analysis"];
        assert_eq!(analysis["totalSpent"], "294.74");
        assert_eq!(analysis["subscriptions"], 6);
        assert_eq!(analysis["subscriptionCost"], "72.94");
        assert_eq!(analysis["predictions"]["nextMonth"], "309.48");
        assert_eq!(analysis["insights"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_analysis_is_saved_to_history() {
        let router = demo_router().await;
        let transactions = sample_transactions(&router).await;
        json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        let (status, json) = json_request(&router, "GET", "/api/analyses", None).await;
        assert_eq!(status, StatusCode::OK);

        let analyses = json["analyses"].as_array().unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0]["totalSpent"], 294.74);
        assert_eq!(analyses[0]["savingsPotential"], 29.18);
        assert_eq!(analyses[0]["subscriptions"], 6);
        assert!(analyses[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_history_keeps_ten_newest() {
        let router = demo_router().await;
        let transactions = sample_transactions(&router).await;
        for _ in 0..12 {
            let (status, _) = json_request(
                &router,
                "POST",
                "/api/analyze",
                Some(json!({ "transactions": transactions })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, json) = json_request(&router, "GET", "/api/analyses", None).await;
        let ids: Vec<i64> = json["analyses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (3..=12).rev().collect::<Vec<i64>>());

        let (_, json) = json_request(&router, "GET", "/api/analyses?limit=2", None).await;
        assert_eq!(json["analyses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_reply_in_fences() {
        let router = provider_router(VALID_REPLY).await;
        let transactions = sample_transactions(&router).await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "groq");
        assert_eq!(json["model"], "canned-model");
        assert_eq!(json["tokensUsed"], 750);
        assert_eq!(json["analysis"]["duplicates"][0]["saving"], 20.5);
    }

    #[tokio::test]
    async fn test_malformed_provider_reply_returns_raw_text() {
        let router = provider_router("Here is your analysis: spend less.").await;
        let transactions = sample_transactions(&router).await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Could not process the AI response");
        assert_eq!(json["details"], "Here is your analysis: spend less.");

        let (_, history) = json_request(&router, "GET", "/api/analyses", None).await;
        assert!(history["analyses"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_provider_reply_is_server_error() {
        let router = provider_router("").await;
        let transactions = sample_transactions(&router).await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "The AI did not generate a response");
    }

    #[tokio::test]
    async fn test_out_of_range_batch_is_bad_request() {
        let router = demo_router().await;
        let huge = json!({
            "id": 1,
            "date": "2026-01-01",
            "description": "Yacht",
            "amount": -5e28,
            "category": "Ocio"
        });

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": [huge.clone(), huge] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("amount"));
    }

    #[tokio::test]
    async fn test_provider_counts_as_text_are_accepted() {
        const REPLY: &str = "{\"totalSpent\":\"294.74\",\"subscriptions\":\"6\",\"subscriptionCost\":\"72.94\",\"predictions\":{\"nextMonth\":\"309.48\",\"savings\":\"29.18\"},\"insights\":[\"a\"],\"duplicates\":[{\"name\":\"Streaming\",\"count\":\"4\",\"saving\":\"20.50\"}]}";
        let router = provider_router(REPLY).await;
        let transactions = sample_transactions(&router).await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/analyze",
            Some(json!({ "transactions": transactions })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["analysis"]["subscriptions"], 6);
        assert_eq!(json["analysis"]["duplicates"][0]["count"], 4);
    }

    #[tokio::test]
    async fn test_invalid_history_limit_gets_error_body() {
        let router = demo_router().await;
        let (status, json) = json_request(&router, "GET", "/api/analyses?limit=abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }
}
