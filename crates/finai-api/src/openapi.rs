//! OpenAPI Documentation
//!
//! OpenAPI 3.0 document for the FinAI API, served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// FinAI API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FinAI API",
        description = "Personal-finance API: transactions, AI spending analysis and analysis history.",
        version = "0.1.0",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::service_status,
        handlers::health::health_check,
        // Transactions
        handlers::transactions::list_transactions,
        handlers::transactions::create_transaction,
        handlers::transactions::update_transaction,
        handlers::transactions::delete_transaction,
        handlers::transactions::transaction_trends,
        // Analysis
        handlers::analyze::analyze_transactions,
        handlers::analyses::list_analyses,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            dto::StatusResponse,
            dto::HistoryParams,
            handlers::health::HealthResponse,
            // Transactions
            dto::TransactionRequest,
            dto::TransactionResponse,
            dto::TransactionListResponse,
            dto::TrendsResponse,
            // Analysis
            dto::AnalyzeRequest,
            dto::AnalyzeResponse,
            dto::AnalysisHistoryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service status and health"),
        (name = "Transactions", description = "Transaction management and trends"),
        (name = "Analysis", description = "AI spending analysis and history")
    )
)]
pub struct ApiDoc;
