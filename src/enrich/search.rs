use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SearchCredentials;
use crate::error::SearchError;
use crate::fetch::USER_AGENT;
use crate::record::SearchResult;

pub const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchResult>, SearchError>;
}

/// Google Programmable Search JSON client.
pub struct GoogleSearch {
    client: reqwest::Client,
    credentials: SearchCredentials,
    endpoint: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

impl GoogleSearch {
    pub fn new(credentials: SearchCredentials, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            credentials,
            endpoint: CUSTOM_SEARCH_URL.to_string(),
            timeout,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchClient for GoogleSearch {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchResult>, SearchError> {
        info!("Searching: {}", query);
        let num = num.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        let items = parse_response(&body)?;
        debug!(query = %query, results = items.len(), "search returned");
        Ok(items)
    }
}

/// Decode a search response body. A body without `items` means no results.
pub fn parse_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_order() {
        let body = r#"{
            "kind": "customsearch#search",
            "items": [
                {"link": "https://shop.test/product/rose/", "title": "Rose Serum"},
                {"formattedUrl": "https://roselab.test/serum", "title": "RoseLab"}
            ]
        }"#;
        let items = parse_response(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].target(), "https://shop.test/product/rose/");
        assert_eq!(items[1].target(), "https://roselab.test/serum");
    }

    #[test]
    fn missing_items_is_zero_results() {
        let items = parse_response(r#"{"kind": "customsearch#search", "searchInformation": {}}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(parse_response("<html>quota</html>"), Err(SearchError::Decode(_))));
        assert!(matches!(parse_response(r#"{"items": 3}"#), Err(SearchError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let creds = SearchCredentials {
            api_key: "k".into(),
            engine_id: "cx".into(),
        };
        let search = GoogleSearch::new(creds, Duration::from_millis(500))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/customsearch/v1");
        assert!(matches!(search.search("rose serum", 5).await, Err(SearchError::Http(_))));
    }
}
