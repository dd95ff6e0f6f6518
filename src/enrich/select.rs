use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use super::compare;
use crate::fetch::PageFetcher;
use crate::record::{ComparisonFields, SearchResult};

pub const MAX_CANDIDATES: usize = 5;

/// Outcome of scanning ranked search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub manufacturer_page: String,
    pub manufacturer_domain: String,
    pub brand_confirmed: bool,
    pub comparison: ComparisonFields,
}

impl Selection {
    fn has_manufacturer(&self) -> bool {
        !self.manufacturer_page.is_empty()
    }
}

/// Walks search results in rank order. The first fetchable page hosted off
/// the catalog becomes the manufacturer page; later pages can only confirm
/// the brand. Stops once both are known.
pub struct CandidateSelector<'a, F: ?Sized> {
    fetcher: &'a F,
    catalog_host: String,
    timeout: Duration,
    max_candidates: usize,
}

impl<'a, F: PageFetcher + ?Sized> CandidateSelector<'a, F> {
    pub fn new(fetcher: &'a F, catalog_host: &str, timeout: Duration) -> Self {
        Self {
            fetcher,
            catalog_host: catalog_host.to_string(),
            timeout,
            max_candidates: MAX_CANDIDATES,
        }
    }

    pub async fn scan(&self, results: &[SearchResult], brand: &str) -> Selection {
        let mut selection = Selection::default();

        for result in results.iter().take(self.max_candidates) {
            let link = result.target();
            if link.is_empty() {
                continue;
            }

            let html = self.fetcher.fetch(link, self.timeout).await;
            if html.is_empty() {
                debug!(url = %link, "candidate unavailable, skipping");
                continue;
            }
            let page = compare::inspect(&html, brand);

            if page.brand_seen && !selection.brand_confirmed {
                debug!(url = %link, "brand confirmed");
                selection.brand_confirmed = true;
            }

            if !selection.has_manufacturer() {
                if let Some(host) = host_of(link).filter(|h| !same_site(h, &self.catalog_host)) {
                    info!("Manufacturer candidate: {}", link);
                    selection.manufacturer_page = link.to_string();
                    selection.manufacturer_domain = host;
                    selection.comparison = page.fields;
                }
            }

            if selection.has_manufacturer() && selection.brand_confirmed {
                break;
            }
        }

        selection
    }
}

/// Lowercased host of an absolute URL.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(str::to_lowercase)
        .filter(|h| !h.is_empty())
}

/// Whether `host` belongs to the catalog site (same host ignoring `www.`, or a
/// subdomain of it).
pub fn same_site(host: &str, catalog_host: &str) -> bool {
    let host = bare_host(host);
    let catalog = bare_host(catalog_host);
    if catalog.is_empty() {
        return false;
    }
    host == catalog || host.ends_with(&format!(".{catalog}"))
}

fn bare_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}
