//! The analysis pipeline

use std::sync::Arc;
use std::time::Duration;

use finai_llm::{CompletionRequest, LLMRouter, Message};
use finai_types::{Analysis, Transaction};

use crate::error::{AdvisorError, AdvisorResult};
use crate::parse::parse_analysis;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::simulate::simulate_analysis;

/// Tunables for analysis requests
#[derive(Debug, Clone)]
pub struct AdvisorOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response
    pub json_mode: bool,
    /// Artificial delay in demo mode so the dashboard shows its spinner
    pub demo_latency: Duration,
}

impl Default for AdvisorOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            json_mode: false,
            demo_latency: Duration::from_millis(1500),
        }
    }
}

/// Result of a successful analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    /// Total tokens billed by the provider (0 in demo mode)
    pub tokens_used: u32,
    /// Provider label, `"demo"` when simulated
    pub mode: String,
    pub model: String,
}

/// Turns transactions into an [`Analysis`]
pub struct FinancialAdvisor {
    router: Arc<LLMRouter>,
    options: AdvisorOptions,
}

impl FinancialAdvisor {
    pub fn new(router: Arc<LLMRouter>, options: AdvisorOptions) -> Self {
        Self { router, options }
    }

    /// Advisor in demo mode with no artificial delay
    pub fn simulated() -> Self {
        Self::new(
            Arc::new(LLMRouter::simulation()),
            AdvisorOptions {
                demo_latency: Duration::ZERO,
                ..AdvisorOptions::default()
            },
        )
    }

    /// Whether analyses are simulated locally
    pub fn is_demo(&self) -> bool {
        self.router.is_simulated()
    }

    /// Provider label reported to clients
    pub fn mode(&self) -> &'static str {
        self.router.kind().mode_label()
    }

    /// Model name reported to clients
    pub fn model(&self) -> &str {
        self.router.model()
    }

    /// Analyze a batch of transactions
    pub async fn analyze(&self, transactions: &[Transaction]) -> AdvisorResult<AnalysisOutcome> {
        if transactions.is_empty() {
            return Err(AdvisorError::NoTransactions);
        }

        tracing::info!(
            transactions = transactions.len(),
            mode = self.mode(),
            "Analyzing transactions"
        );

        let (raw, tokens_used) = if self.is_demo() {
            self.simulate(transactions).await?
        } else {
            self.ask_provider(transactions).await?
        };

        let analysis = parse_analysis(&raw)?;

        tracing::info!(tokens_used, mode = self.mode(), "Analysis completed");

        Ok(AnalysisOutcome {
            analysis,
            tokens_used,
            mode: self.mode().to_string(),
            model: self.model().to_string(),
        })
    }

    async fn simulate(&self, transactions: &[Transaction]) -> AdvisorResult<(String, u32)> {
        tracing::debug!("Demo mode, generating simulated analysis");

        let simulated = simulate_analysis(transactions);
        let raw = serde_json::to_string(&simulated)
            .map_err(|e| AdvisorError::Serialization(e.to_string()))?;

        if !self.options.demo_latency.is_zero() {
            tokio::time::sleep(self.options.demo_latency).await;
        }

        Ok((raw, 0))
    }

    async fn ask_provider(&self, transactions: &[Transaction]) -> AdvisorResult<(String, u32)> {
        let mut request = CompletionRequest::new(vec![Message::user(build_prompt(transactions))])
            .with_system(SYSTEM_PROMPT)
            .with_temperature(self.options.temperature)
            .with_max_tokens(self.options.max_tokens);
        if self.options.json_mode {
            request = request.with_json_mode();
        }

        tracing::debug!(model = self.model(), "Sending analysis request to provider");

        let response = self.router.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "Provider request failed");
            AdvisorError::from(e)
        })?;

        if response.content.trim().is_empty() {
            tracing::error!("Provider returned an empty response");
            return Err(AdvisorError::EmptyResponse);
        }

        Ok((response.content, response.usage.total_tokens))
    }
}
