use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::jobs::fetch::PageFetcher;
use crate::matching::keywords::KeywordExtractor;
use crate::matching::scoring::FitScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Compiled tokenizer + stopword list, built once in `main`.
    pub keywords: Arc<KeywordExtractor>,
    /// Pluggable fit scorer. Default: KeywordOverlapScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    /// Outbound fetcher used when a job is created from a URL.
    pub page_fetcher: Arc<dyn PageFetcher>,
}
