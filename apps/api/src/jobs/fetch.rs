use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

const USER_AGENT: &str = concat!("jobfit-api/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 5;

/// Raw result of fetching a job posting page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Fetches job posting pages. Held in `AppState` as `Arc<dyn PageFetcher>`
/// so tests can answer without the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Transport failures are errors; non-2xx responses are returned as pages.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// reqwest-backed fetcher with a whole-request timeout.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        debug!("Fetching job posting {url}");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchedPage { status, body })
    }
}
