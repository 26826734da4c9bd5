mod answers;
mod applications;
mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod resumes;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::fetch::HttpPageFetcher;
use crate::matching::keywords::{KeywordExtractor, STOPWORDS};
use crate::matching::scoring::KeywordOverlapScorer;
use crate::resumes::storage::ensure_upload_dir;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobfit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    ensure_upload_dir(&config.upload_dir).await?;

    // Tokenizer and scorer are built once and shared read-only
    let keywords = Arc::new(KeywordExtractor::new().context("Invalid keyword token pattern")?);
    info!("Keyword extractor ready ({} stopwords)", STOPWORDS.len());
    let fit_scorer = Arc::new(KeywordOverlapScorer);

    let page_fetcher = Arc::new(HttpPageFetcher::new(Duration::from_secs(
        config.job_fetch_timeout_secs,
    ))?);
    info!(
        "Job page fetcher initialized (timeout {}s)",
        config.job_fetch_timeout_secs
    );

    let cors = build_cors(&config.cors_allowed_origins);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        keywords,
        fit_scorer,
        page_fetcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the configured frontend origins. Unparseable origins are skipped.
fn build_cors(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {o:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
