//! LLM Router - Selects the provider, or demo mode when there is none

use std::sync::Arc;
use std::time::Duration;

use crate::providers::*;
use crate::types::*;

/// Model name reported while in demo mode
pub const SIMULATION_MODEL: &str = "simulation";

/// Provider selection settings
///
/// `None` fields fall back to the provider's built-in defaults.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: ProviderKind,
    /// Force demo mode even if a provider is configured
    pub demo_mode: bool,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Groq,
            demo_mode: false,
            api_key: None,
            base_url: None,
            model: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The LLM Router holds the selected provider
///
/// A router without a provider is in demo mode.
pub struct LLMRouter {
    provider: Option<Arc<dyn LLMProvider>>,
    kind: ProviderKind,
}

impl LLMRouter {
    /// Create a router with a specific provider
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        let kind = provider.kind();
        Self {
            provider: Some(provider),
            kind,
        }
    }

    /// Create a router in demo mode
    pub fn simulation() -> Self {
        Self {
            provider: None,
            kind: ProviderKind::Simulation,
        }
    }

    /// Create a router from explicit settings
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        if settings.demo_mode {
            tracing::info!("Demo mode requested, analyses will be simulated");
            return Ok(Self::simulation());
        }

        let router = match settings.provider {
            ProviderKind::Groq => {
                let mut config = GroqConfig {
                    timeout: settings.timeout,
                    ..GroqConfig::default()
                };
                if let Some(ref key) = settings.api_key {
                    config.api_key = Some(key.clone()).filter(|k| !k.trim().is_empty());
                }
                if let Some(ref url) = settings.base_url {
                    config.base_url = url.clone();
                }
                if let Some(ref model) = settings.model {
                    config.model = model.clone();
                }

                let provider = GroqProvider::new(config)?;
                if !provider.has_api_key() {
                    tracing::warn!("No Groq API key configured, falling back to demo mode");
                    return Ok(Self::simulation());
                }
                Self::new(Arc::new(provider))
            }
            ProviderKind::OpenAICompat => {
                let mut config = OpenAICompatConfig {
                    timeout: settings.timeout,
                    ..OpenAICompatConfig::default()
                };
                if settings.api_key.is_some() {
                    config.api_key = settings.api_key.clone();
                }
                if let Some(ref url) = settings.base_url {
                    config.base_url = url.clone();
                }
                if let Some(ref model) = settings.model {
                    config.model = model.clone();
                }
                Self::new(Arc::new(OpenAICompatProvider::new(config)?))
            }
            ProviderKind::Ollama => {
                let mut config = OllamaConfig {
                    timeout: settings.timeout,
                    ..OllamaConfig::default()
                };
                if let Some(ref url) = settings.base_url {
                    config.base_url = url.clone();
                }
                if let Some(ref model) = settings.model {
                    config.model = model.clone();
                }
                Self::new(Arc::new(OllamaProvider::new(config)?))
            }
            ProviderKind::Simulation => Self::simulation(),
        };

        Ok(router)
    }

    /// Get the provider kind
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Whether analyses are simulated locally
    pub fn is_simulated(&self) -> bool {
        self.provider.is_none()
    }

    /// Model name used for completions
    pub fn model(&self) -> &str {
        self.provider
            .as_ref()
            .map(|p| p.model())
            .unwrap_or(SIMULATION_MODEL)
    }

    /// Check if the provider is available
    pub async fn is_available(&self) -> bool {
        match self.provider {
            Some(ref provider) => provider.is_available().await,
            None => true,
        }
    }

    /// Complete a request using the current provider
    pub async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        match self.provider {
            Some(ref provider) => provider.complete(request).await,
            None => Err(LLMError::ProviderNotAvailable {
                provider: self.kind.to_string(),
            }),
        }
    }
}
