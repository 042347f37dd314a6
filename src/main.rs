use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use namaste_core::{CoreConfig, MapperService};

/// Main entry point for the diagnosis mapper server
///
/// Resolves configuration once, loads the vocabulary and serves the REST API
/// (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `NAMASTE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NAMASTE_VOCABULARY_FILE`: YAML vocabulary replacing the built-in one (optional)
/// - `NAMASTE_MAX_SUGGESTIONS`: default suggestion count (default: 8)
/// - `NAMASTE_MAX_SUGGESTIONS_LIMIT`: cap on requested suggestion counts (default: 50)
/// - `NAMASTE_CONFIRMATION_LOG_CAPACITY`: receipts kept in memory, oldest dropped first
///   (default: 1000)
/// - `NAMASTE_SIMULATED_LATENCY_MS`: artificial delay before lookup responses (default: 0)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is malformed or the vocabulary cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("namaste_run=info".parse()?)
                .add_directive("namaste_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("NAMASTE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let latency_ms = std::env::var("NAMASTE_SIMULATED_LATENCY_MS")
        .ok()
        .map(|v| v.trim().parse::<u64>())
        .transpose()?
        .unwrap_or(0);

    let cfg = Arc::new(CoreConfig::from_env_lookup(|name| std::env::var(name).ok())?);

    let vocabulary = cfg.load_vocabulary()?;
    let mapper = MapperService::new(vocabulary, Arc::new(cfg.confirmation_log()));

    let state =
        AppState::new(cfg.clone(), mapper).with_simulated_latency(Duration::from_millis(latency_ms));

    tracing::info!("++ Starting NAMASTE mapper REST on {}", rest_addr);
    if latency_ms > 0 {
        tracing::info!("simulated latency {} ms", latency_ms);
    }

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
