//! Server Configuration
//!
//! Configuration management for the FinAI server.
//! Supports config files, environment variables, and CLI arguments.

use anyhow::Context;
use finai_advisor::AdvisorOptions;
use finai_api::{ApiConfig, DEFAULT_FRONTEND_URL};
use finai_llm::{LlmSettings, ProviderKind};
use finai_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server binding configuration
    pub server: ServerSettings,

    /// HTTP layer configuration
    pub api: ApiSettings,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Storage configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Enable CORS
    pub enable_cors: bool,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,

    /// Enable response compression
    pub enable_compression: bool,

    /// Enable request tracing
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Log slow requests threshold in ms
    pub slow_request_threshold_ms: u64,

    /// Slow threshold for AI analysis requests in ms
    pub slow_analysis_threshold_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let defaults = ApiConfig::default();
        Self {
            enable_cors: defaults.enable_cors,
            cors_origins: vec![DEFAULT_FRONTEND_URL.to_string()],
            enable_compression: defaults.enable_compression,
            enable_tracing: defaults.enable_tracing,
            max_body_size: defaults.max_body_size,
            slow_request_threshold_ms: defaults.slow_request_threshold.as_millis() as u64,
            slow_analysis_threshold_ms: defaults.slow_analysis_threshold.as_millis() as u64,
        }
    }
}

impl ApiSettings {
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            enable_cors: self.enable_cors,
            cors_origins: self.cors_origins.clone(),
            enable_compression: self.enable_compression,
            enable_tracing: self.enable_tracing,
            max_body_size: self.max_body_size,
            slow_request_threshold: Duration::from_millis(self.slow_request_threshold_ms),
            slow_analysis_threshold: Duration::from_millis(self.slow_analysis_threshold_ms),
        }
    }
}

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider kind (groq, openai_compat, ollama, demo)
    pub provider: String,

    /// Simulate analyses instead of calling the provider
    pub demo_mode: bool,

    /// Provider API key (Groq reads `GROQ_API_KEY` when unset)
    pub api_key: Option<String>,

    /// Provider base URL override
    pub base_url: Option<String>,

    /// Model override
    pub model: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token limit
    pub max_tokens: u32,

    /// Ask the provider for a JSON object response
    pub json_mode: bool,

    /// Artificial delay for demo analyses in ms
    pub demo_latency_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let options = AdvisorOptions::default();
        Self {
            provider: "groq".to_string(),
            demo_mode: false,
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: 60,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            json_mode: options.json_mode,
            demo_latency_ms: options.demo_latency.as_millis() as u64,
        }
    }
}

impl LlmConfig {
    /// Provider selection for the LLM router
    pub fn to_settings(&self) -> anyhow::Result<LlmSettings> {
        let provider = ProviderKind::from_str(&self.provider)
            .with_context(|| format!("Unknown LLM provider '{}'", self.provider))?;

        Ok(LlmSettings {
            provider,
            demo_mode: self.demo_mode,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// Request tuning for the advisor
    pub fn advisor_options(&self) -> AdvisorOptions {
        AdvisorOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_mode: self.json_mode,
            demo_latency: Duration::from_millis(self.demo_latency_ms),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from an optional file, default locations and
    /// `FINAI__SECTION__KEY` environment variables
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        // Add config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        // Add default config locations
        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Add environment variables with FINAI prefix
        builder = builder.add_source(
            config::Environment::with_prefix("FINAI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let server_config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(server_config)
    }
}
