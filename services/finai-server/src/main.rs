//! FinAI Server
//!
//! Backend for the FinAI personal-finance dashboard: stores transactions,
//! asks an LLM (or the built-in simulation) for a spending analysis and
//! keeps the analysis history.
//!
//! # Usage
//!
//! ```bash
//! # Demo mode, no provider needed
//! DEMO_MODE=true finai-server
//!
//! # Groq
//! GROQ_API_KEY=gsk_... finai-server --port 3000
//!
//! # Local Ollama with JSON logs
//! FINAI__LLM__PROVIDER=ollama finai-server --log-format json
//! ```

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finai_advisor::FinancialAdvisor;
use finai_api::{create_router, AppState};
use finai_llm::LLMRouter;
use finai_store::Store;

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// FinAI Server - personal-finance API with AI spending analysis
#[derive(Parser, Debug)]
#[command(name = "finai-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "FINAI_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "FINAI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FINAI_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "FINAI_LOG_FORMAT")]
    log_format: Option<String>,

    /// Dashboard origin allowed by CORS
    #[arg(long, env = "FRONTEND_URL")]
    frontend_url: Option<String>,

    /// LLM provider (groq, openai_compat, ollama, demo)
    #[arg(long, env = "FINAI_LLM_PROVIDER")]
    llm_provider: Option<String>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: Option<String>,

    /// Simulate analyses instead of calling the provider
    ///
    /// `DEMO_MODE` accepts any value; `false`, `0`, `no`, `off` and empty mean off.
    #[arg(
        long,
        env = "DEMO_MODE",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    demo_mode: bool,
}

impl Args {
    /// Apply CLI and well-known environment overrides
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(origin) = self.frontend_url {
            config.api.cors_origins = vec![origin];
        }
        if let Some(provider) = self.llm_provider {
            config.llm.provider = provider;
        }
        if self.groq_api_key.is_some() {
            config.llm.api_key = self.groq_api_key;
        }
        if self.demo_mode {
            config.llm.demo_mode = true;
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads the environment
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut server_config);

    init_logging(&server_config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting FinAI Server");

    let advisor = init_advisor(&server_config.llm)?;

    let store = Store::from_config(&server_config.store)
        .await
        .context("Failed to initialize store")?;

    let state = Arc::new(
        AppState::new(store, advisor).with_history_limit(server_config.store.history_limit),
    );

    let app = create_router(state, server_config.api.to_api_config());

    let addr = server_config.server.socket_addr()?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        cors_origins = ?server_config.api.cors_origins,
        "Server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
    }

    Ok(())
}

/// Select the LLM provider and build the advisor
fn init_advisor(config: &config::LlmConfig) -> anyhow::Result<Arc<FinancialAdvisor>> {
    let settings = config.to_settings()?;
    let router = LLMRouter::from_settings(&settings).context("Failed to configure LLM provider")?;

    let advisor = FinancialAdvisor::new(Arc::new(router), config.advisor_options());

    tracing::info!(
        mode = advisor.mode(),
        model = advisor.model(),
        demo = advisor.is_demo(),
        "Analysis provider ready"
    );

    Ok(Arc::new(advisor))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["finai-server", "--port", "8080", "--demo-mode"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.demo_mode);
    }

    #[test]
    fn test_demo_mode_env_values() {
        // Only this test touches DEMO_MODE
        let cases = [
            ("1", true),
            ("true", true),
            ("0", false),
            ("off", false),
            ("", false),
        ];
        for (value, expected) in cases {
            std::env::set_var("DEMO_MODE", value);
            let args = Args::try_parse_from(["finai-server"]).unwrap();
            assert_eq!(args.demo_mode, expected, "DEMO_MODE={value:?}");
        }
        std::env::remove_var("DEMO_MODE");
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "finai-server",
            "--host",
            "127.0.0.1",
            "--frontend-url",
            "http://localhost:4000",
            "--log-format",
            "json",
            "--llm-provider",
            "ollama",
        ]);
        let mut config = ServerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.api.cors_origins, vec!["http://localhost:4000".to_string()]);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.llm.provider, "ollama");
    }

    #[test]
    fn test_demo_advisor_from_config() {
        let llm = config::LlmConfig {
            provider: "demo".to_string(),
            ..config::LlmConfig::default()
        };
        let advisor = init_advisor(&llm).unwrap();
        assert!(advisor.is_demo());
        assert_eq!(advisor.mode(), "demo");
    }
}
