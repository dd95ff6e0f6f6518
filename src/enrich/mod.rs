pub mod compare;
pub mod search;
pub mod select;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::fetch::PageFetcher;
use crate::record::{EnrichedRecord, ProductRecord};
use search::SearchClient;
use select::{host_of, CandidateSelector, MAX_CANDIDATES};

pub const QUERY_SUFFIX: &str = "official site";

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Results requested from the search endpoint.
    pub result_count: u32,
    pub page_timeout: Duration,
    /// Pause between consecutive records.
    pub delay: Duration,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            result_count: MAX_CANDIDATES as u32,
            page_timeout: crate::fetch::DEFAULT_TIMEOUT,
            delay: Duration::from_secs(1),
        }
    }
}

/// Search-then-inspect enrichment of scraped products.
pub struct Enricher<S, F> {
    search: S,
    fetcher: F,
    options: EnrichOptions,
}

impl<S: SearchClient, F: PageFetcher> Enricher<S, F> {
    pub fn new(search: S, fetcher: F, options: EnrichOptions) -> Self {
        Self {
            search,
            fetcher,
            options,
        }
    }

    /// Enrich one product. A failed search yields a record with every
    /// enrichment field empty.
    pub async fn enrich(&self, product: ProductRecord) -> EnrichedRecord {
        let query = build_query(&product);
        let items = match self.search.search(&query, self.options.result_count).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Search failed for '{}': {}", product.product_name, e);
                return EnrichedRecord::unenriched(product);
            }
        };

        let catalog_host = host_of(&product.product_page_url).unwrap_or_default();
        let selection = CandidateSelector::new(&self.fetcher, &catalog_host, self.options.page_timeout)
            .scan(&items, &product.brand)
            .await;

        EnrichedRecord {
            product,
            search_items: items,
            manufacturer_page: selection.manufacturer_page,
            manufacturer_domain: selection.manufacturer_domain,
            brand_confirmed: selection.brand_confirmed,
            comparison: selection.comparison,
        }
    }

    /// Enrich records one after another, pausing between them. Records with
    /// no page URL are logged and skipped.
    pub async fn enrich_all(&self, products: Vec<ProductRecord>) -> Vec<EnrichedRecord> {
        let pb = ProgressBar::new(products.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=> "));
        }

        let mut enriched = Vec::with_capacity(products.len());
        for (i, product) in products.into_iter().enumerate() {
            if product.product_page_url.is_empty() {
                warn!("Skipping '{}': record has no product_page_url", product.product_name);
                pb.inc(1);
                continue;
            }
            if i > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            info!("Enriching: {}", product.product_name);
            pb.set_message(product.product_name.clone());
            enriched.push(self.enrich(product).await);
            pb.inc(1);
        }

        pb.finish_and_clear();
        enriched
    }
}

/// `<name> <brand> official site`, skipping empty parts.
pub fn build_query(product: &ProductRecord) -> String {
    [product.product_name.trim(), product.brand.trim(), QUERY_SUFFIX]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick up to `limit` records, complete ones first, each group in input order.
pub fn select_for_enrichment(products: Vec<ProductRecord>, limit: usize) -> Vec<ProductRecord> {
    let (complete, partial): (Vec<_>, Vec<_>) =
        products.into_iter().partition(ProductRecord::is_complete);
    if complete.len() < limit {
        info!(
            "Found {} fully complete products; filling up to {} with partial ones",
            complete.len(),
            limit
        );
    }
    complete.into_iter().chain(partial).take(limit).collect()
}
