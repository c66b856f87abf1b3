//! REST API server for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! card-validator-server
//!
//! # With custom port and lookups disabled
//! PORT=3000 ENABLE_BIN_LOOKUP=false card-validator-server
//!
//! # Without the /metrics endpoint
//! METRICS_ENABLED=false card-validator-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:8080/swagger-ui/ for interactive API documentation.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use card_validator::config::DEFAULT_BIN_SERVICE_URL;
use card_validator::metrics::Metrics;
use card_validator::{server, Validator, ValidatorConfig};

/// Server settings, read from flags or the environment.
#[derive(Debug, Parser)]
#[command(name = "card-validator-server")]
#[command(author, version, about = "Card validation REST API", long_about = None)]
struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "JSON_LOGS", default_value_t = false)]
    json_logs: bool,

    /// Look up issuer data for valid numbers
    #[arg(long, env = "ENABLE_BIN_LOOKUP", default_value_t = true, action = clap::ArgAction::Set)]
    enable_bin_lookup: bool,

    /// Timeout for one BIN lookup, in seconds
    #[arg(long, env = "BIN_LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    bin_lookup_timeout_secs: u64,

    /// Base URL of the BIN lookup service
    #[arg(long, env = "BIN_SERVICE_URL", default_value = DEFAULT_BIN_SERVICE_URL)]
    bin_service_url: String,

    /// Attach the masked card number to outcome log lines
    #[arg(long, env = "MASK_SENSITIVE", default_value_t = true, action = clap::ArgAction::Set)]
    mask_sensitive: bool,

    /// Record request metrics and serve them at /metrics
    #[arg(long, env = "METRICS_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    metrics_enabled: bool,
}

impl Config {
    fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_bin_lookup(self.enable_bin_lookup)
            .with_timeout(Duration::from_secs(self.bin_lookup_timeout_secs))
            .with_service_url(self.bin_service_url.clone())
            .with_mask_sensitive(self.mask_sensitive)
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=debug", config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(&config);

    let validator = match Validator::new(config.validator_config()) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "invalid validator configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        enrichment = validator.enrichment_enabled(),
        bin_service_url = %config.bin_service_url,
        "validator ready"
    );

    let app = if config.metrics_enabled {
        match Metrics::new() {
            Ok(metrics) => server::router_with_metrics(validator, metrics),
            Err(e) => {
                tracing::error!(error = %e, "failed to register metrics");
                return ExitCode::FAILURE;
            }
        }
    } else {
        server::router(validator)
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", config.port);
    if config.metrics_enabled {
        tracing::info!("Metrics available at http://localhost:{}/metrics", config.port);
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server stopped");
    ExitCode::SUCCESS
}
