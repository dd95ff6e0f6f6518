use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; product_scraper/0.1; catalog research)";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves raw markup. Any failure yields an empty string, which callers
/// treat as "unknown content".
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> String;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> String {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, "fetch failed: {}", e);
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, "fetch returned HTTP {}", status);
            return String::new();
        }

        match response.text().await {
            Ok(body) => {
                debug!(url = %url, bytes = body.len(), "fetched page");
                body
            }
            Err(e) => {
                warn!(url = %url, "failed to read body: {}", e);
                String::new()
            }
        }
    }
}
