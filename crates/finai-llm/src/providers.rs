//! LLM Provider implementations

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::*;

/// Default timeout applied to every provider HTTP client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Get the provider kind
    fn kind(&self) -> ProviderKind;

    /// Model used when a request does not name one
    fn model(&self) -> &str;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Complete a conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LLMError::ConfigurationError {
            message: format!("HTTP client: {}", e),
        })
}

// ============================================================================
// OpenAI chat-completions wire format (shared by Groq and OpenAI-compatible)
// ============================================================================

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

impl OpenAIChatRequest {
    fn from_request(request: CompletionRequest, default_model: &str) -> Self {
        let messages = request
            .all_messages()
            .into_iter()
            .map(|m| OpenAIChatMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content),
            })
            .collect();

        Self {
            model: request.model.unwrap_or_else(|| default_model.to_string()),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
            response_format: if request.json_mode {
                Some(serde_json::json!({"type": "json_object"}))
            } else {
                None
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OpenAIChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIChatChoice {
    message: OpenAIChatMessage,
}

#[derive(Deserialize, Default)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Turn a non-success HTTP response into an error
async fn error_from_status(response: reqwest::Response) -> LLMError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_seconds = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(60);
        return LLMError::RateLimited { retry_after_seconds };
    }
    let body = response.text().await.unwrap_or_default();
    LLMError::RequestFailed {
        message: format!("HTTP {}: {}", status, body),
    }
}

/// POST a chat-completions request and map the answer
async fn openai_chat(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    chat_request: OpenAIChatRequest,
) -> Result<CompletionResponse> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let requested_model = chat_request.model.clone();

    let mut req = client.post(&url).json(&chat_request);
    if let Some(key) = api_key {
        req = req.bearer_auth(key);
    }

    let response = req.send().await?;
    if !response.status().is_success() {
        return Err(error_from_status(response).await);
    }

    let chat_response: OpenAIChatResponse =
        response.json().await.map_err(|e| LLMError::InvalidResponse {
            message: e.to_string(),
        })?;

    let content = chat_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    let usage = chat_response.usage.unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
        model: Some(chat_response.model.unwrap_or(requested_model)),
    })
}

// ============================================================================
// Groq Provider (Cloud, Default)
// ============================================================================

/// Default Groq model
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for Groq provider
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GROQ_BASE_URL.to_string(),
            model: GROQ_DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Groq chat-completions provider
pub struct GroqProvider {
    config: GroqConfig,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn is_available(&self) -> bool {
        self.has_api_key()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::ConfigurationError {
                message: "Groq API key is not configured".to_string(),
            })?;

        tracing::debug!(model = %self.config.model, "Sending chat completion to Groq");

        let chat_request = OpenAIChatRequest::from_request(request, &self.config.model);
        openai_chat(&self.client, &self.config.base_url, Some(api_key), chat_request).await
    }
}

// ============================================================================
// OpenAI-Compatible Provider
// ============================================================================

/// Configuration for OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAICompatConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OpenAICompatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: None,
            model: "default".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// OpenAI-compatible API provider (vLLM, llama.cpp, OpenAI, etc.)
pub struct OpenAICompatProvider {
    config: OpenAICompatConfig,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(config: OpenAICompatConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatProvider {
    fn name(&self) -> &'static str {
        "OpenAI-Compatible"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAICompat
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.base_url.trim_end_matches('/'));
        let mut req = self.client.get(&url);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }
        req.send().await.is_ok()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = OpenAIChatRequest::from_request(request, &self.config.model);
        openai_chat(
            &self.client,
            &self.config.base_url,
            self.config.api_key.as_deref(),
            chat_request,
        )
        .await
    }
}

// ============================================================================
// Ollama Provider (Local)
// ============================================================================

/// Configuration for Ollama provider
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Ollama local LLM provider
pub struct OllamaProvider {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    options: OllamaOptions,
}

#[derive(Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let messages = request
            .all_messages()
            .into_iter()
            .map(|m| OllamaMessage {
                role: m.role.as_str().to_string(),
                content: m.content,
            })
            .collect();

        let model = request.model.unwrap_or_else(|| self.config.model.clone());
        let ollama_request = OllamaChatRequest {
            model: model.clone(),
            messages,
            stream: false,
            format: request.json_mode.then(|| "json".to_string()),
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let url = format!("{}/api/chat", self.config.base_url);
        let response = self.client.post(&url).json(&ollama_request).send().await?;

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let ollama_response: OllamaChatResponse =
            response.json().await.map_err(|e| LLMError::InvalidResponse {
                message: e.to_string(),
            })?;

        let prompt_tokens = ollama_response.prompt_eval_count;
        let completion_tokens = ollama_response.eval_count;

        Ok(CompletionResponse {
            content: ollama_response
                .message
                .map(|m| m.content.trim().to_string())
                .unwrap_or_default(),
            usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            model: Some(model),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_includes_system_and_json_mode() {
        let request = CompletionRequest::new(vec![Message::user("analyze")])
            .with_system("advisor")
            .with_temperature(0.7)
            .with_max_tokens(1000)
            .with_json_mode();

        let chat = OpenAIChatRequest::from_request(request, GROQ_DEFAULT_MODEL);
        let body = serde_json::to_value(&chat).unwrap();

        assert_eq!(body["model"], GROQ_DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "analyze");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["stream"], false);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_chat_response_tolerates_null_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: OpenAIChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.usage.is_none());
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_default_configs_are_fixed() {
        let groq = GroqConfig::default();
        assert!(groq.api_key.is_none());
        assert_eq!(groq.base_url, GROQ_BASE_URL);
        assert_eq!(groq.model, GROQ_DEFAULT_MODEL);
        assert!(OpenAICompatConfig::default().api_key.is_none());
        assert_eq!(OllamaConfig::default().base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_groq_without_key_is_unavailable() {
        let provider = GroqProvider::new(GroqConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            model: GROQ_DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        assert!(!provider.is_available().await);
        let err = provider
            .complete(CompletionRequest::new(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::ConfigurationError { .. }));
    }
}
