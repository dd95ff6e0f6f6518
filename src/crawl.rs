use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::discovery::{self, Catalog};
use crate::fetch::PageFetcher;
use crate::parser;
use crate::record::ProductRecord;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub max_products: usize,
    /// Pause between product page requests.
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_products: 30,
            delay: Duration::from_secs(1),
            timeout: crate::fetch::DEFAULT_TIMEOUT,
        }
    }
}

/// Raw markup of one product page.
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

/// Discover, fetch and extract. Fetching is sequential and paced; parsing
/// runs across records in parallel.
pub async fn crawl<F: PageFetcher + ?Sized>(
    fetcher: &F,
    catalog: &Catalog,
    options: &CrawlOptions,
) -> Vec<ProductRecord> {
    let mut links = discovery::discover(fetcher, catalog).await;
    links.truncate(options.max_products);

    let t_fetch = Instant::now();
    let pages = fetch_pages(fetcher, &links, options).await;
    info!(
        "Fetched {} of {} product pages in {:.1}s",
        pages.len(),
        links.len(),
        t_fetch.elapsed().as_secs_f64()
    );

    extract_pages(&pages)
}

/// Fetch product pages one at a time. Pages that come back empty are skipped.
pub async fn fetch_pages<F: PageFetcher + ?Sized>(
    fetcher: &F,
    urls: &[String],
    options: &CrawlOptions,
) -> Vec<FetchedPage> {
    let pb = ProgressBar::new(urls.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut pages = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
        info!("Scraping: {}", url);
        let html = fetcher.fetch(url, options.timeout).await;
        if html.is_empty() {
            warn!("Error scraping {}: no content, skipping", url);
        } else {
            pages.push(FetchedPage {
                url: url.clone(),
                html,
            });
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    pages
}

pub fn extract_pages(pages: &[FetchedPage]) -> Vec<ProductRecord> {
    pages
        .par_iter()
        .map(|p| parser::extract_html(&p.html, &p.url))
        .collect()
}
