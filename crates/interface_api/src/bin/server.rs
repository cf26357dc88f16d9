//! Claims Intake - API Server Binary
//!
//! Composition root: loads configuration, builds the adapters, wires them
//! into the claim orchestrator and serves the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! CLAIMS__DATABASE__URL=postgres://... \
//! CLAIMS__WEATHER__API_KEY=... \
//! CLAIMS__PAYMENTS__API_KEY=sk_test_... \
//! cargo run --bin claims-api
//! ```
//!
//! See `interface_api::config` for every setting.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::Currency;
use domain_claims::{ClaimOrchestrator, StaticPolicyRegistry};
use infra_db::{create_pool, run_migrations, PostgresAuditStore};
use infra_external::{HttpDamageClassifier, OpenWeatherCorroborator, StripeRefundIssuer};
use interface_api::config::{AppConfig, LogFormat};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.server.log_level, config.server.log_format);

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting claims intake API server"
    );

    let state = build_state(&config).await?;
    let app = create_router(state, config.server.max_upload_bytes);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wires every adapter into the application state
async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = create_pool(config.database.pool_config())
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("database migrations failed")?;

    let currency: Currency = config
        .payments
        .currency
        .parse()
        .context("invalid payments.currency")?;

    let audit = Arc::new(PostgresAuditStore::new(pool));
    let classifier = Arc::new(
        HttpDamageClassifier::new(config.classifier.clone()).context("classifier adapter")?,
    );
    let weather = Arc::new(
        OpenWeatherCorroborator::new(config.weather.clone()).context("weather adapter")?,
    );
    let refunds =
        Arc::new(StripeRefundIssuer::new(config.payments.clone()).context("payments adapter")?);

    let orchestrator =
        ClaimOrchestrator::new(classifier, weather, refunds, audit.clone()).with_currency(currency);
    let policies = Arc::new(StaticPolicyRegistry::new(&config.policies.known));
    tracing::info!(
        known_policies = policies.len(),
        currency = %currency,
        "Claim pipeline ready"
    );

    Ok(AppState::new(orchestrator, policies).with_readiness_check(audit))
}

/// Installs the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer().with_target(true)), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
