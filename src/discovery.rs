use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::fetch::PageFetcher;
use crate::parser::dom::selector;

static PRODUCT_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href*="/product/"]"#));

pub const DEFAULT_BASE_URL: &str = "https://qudobeauty.com";
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "cat/wholesale-face-care/",
    "cat/wholesale-face-care/cleanser/",
    "cat/wholesale-face-care/serums/",
    "cat/wholesale-face-care/face-masks-beauty/",
];

/// Where to look for product links.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub base_url: Url,
    /// Category listing URLs, absolute.
    pub categories: Vec<Url>,
    pub max_pages_per_category: u32,
    /// Links gathered before stopping early.
    pub link_budget: usize,
    pub delay: Duration,
    pub timeout: Duration,
}

impl Catalog {
    /// Resolve category paths against `base_url`.
    pub fn new(base_url: &str, categories: &[String]) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        let categories = categories
            .iter()
            .map(|c| base_url.join(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            base_url,
            categories,
            max_pages_per_category: 5,
            link_budget: 60,
            delay: Duration::from_millis(800),
            timeout: crate::fetch::DEFAULT_TIMEOUT,
        })
    }

    /// Listing URL for `page` (1-based) of a category.
    pub fn page_url(category: &Url, page: u32) -> String {
        if page == 1 {
            category.to_string()
        } else {
            format!("{}/page/{}/", category.as_str().trim_end_matches('/'), page)
        }
    }
}

/// Collect product page URLs from the catalog's category listings, in the
/// order first seen.
pub async fn discover<F: PageFetcher + ?Sized>(fetcher: &F, catalog: &Catalog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    'categories: for category in &catalog.categories {
        for page in 1..=catalog.max_pages_per_category {
            let url = Catalog::page_url(category, page);
            info!("Loading category page: {}", url);
            let html = fetcher.fetch(&url, catalog.timeout).await;
            if html.is_empty() {
                warn!("No listing at {}, moving to next category", url);
                break;
            }

            for link in product_links(&html, &catalog.base_url) {
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }

            if !catalog.delay.is_zero() {
                tokio::time::sleep(catalog.delay).await;
            }

            if links.len() >= catalog.link_budget {
                break 'categories;
            }
        }
    }

    info!("Total product URLs found: {}", links.len());
    links
}

/// Product links on one listing page, absolute, on the catalog, query stripped.
pub fn product_links(html: &str, base: &Url) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&PRODUCT_LINK_SEL)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(|u| u.host_str() == base.host_str() && u.path().contains("/product/"))
        .map(|mut u| {
            u.set_query(None);
            u.set_fragment(None);
            u.to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::stubs::StubFetcher;

    fn catalog(categories: &[&str]) -> Catalog {
        let cats: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
        let mut c = Catalog::new("https://shop.test", &cats).unwrap();
        c.delay = Duration::ZERO;
        c
    }

    #[test]
    fn pagination_urls() {
        let cat = Url::parse("https://shop.test/cat/serums/").unwrap();
        assert_eq!(Catalog::page_url(&cat, 1), "https://shop.test/cat/serums/");
        assert_eq!(Catalog::page_url(&cat, 3), "https://shop.test/cat/serums/page/3/");
    }

    #[test]
    fn listing_links_are_normalized() {
        let base = Url::parse("https://shop.test").unwrap();
        let html = r#"
            <a href="/product/rose-serum/?ref=grid">Rose</a>
            <a href="https://shop.test/product/lily-toner/#reviews">Lily</a>
            <a href="https://other.test/product/x/">Elsewhere</a>
            <a href="https://shop.testing.test/product/y/">Lookalike</a>
            <a href="/cat/serums/">Category</a>"#;
        assert_eq!(
            product_links(html, &base),
            vec![
                "https://shop.test/product/rose-serum/",
                "https://shop.test/product/lily-toner/",
            ]
        );
    }

    #[tokio::test]
    async fn paginates_until_a_page_is_missing() {
        let fetcher = StubFetcher::new(&[
            ("https://shop.test/cat/a/", r#"<a href="/product/one/">1</a><a href="/product/two/">2</a>"#),
            ("https://shop.test/cat/a/page/2/", r#"<a href="/product/two/">2</a><a href="/product/three/">3</a>"#),
            ("https://shop.test/cat/b/", r#"<a href="/product/four/">4</a>"#),
        ]);
        let links = discover(&fetcher, &catalog(&["cat/a/", "cat/b/"])).await;

        assert_eq!(
            links,
            vec![
                "https://shop.test/product/one/",
                "https://shop.test/product/two/",
                "https://shop.test/product/three/",
                "https://shop.test/product/four/",
            ]
        );
        assert!(fetcher.calls().contains(&"https://shop.test/cat/a/page/3/".to_string()));
        assert!(!fetcher.calls().contains(&"https://shop.test/cat/a/page/4/".to_string()));
    }

    #[tokio::test]
    async fn stops_at_link_budget() {
        let fetcher = StubFetcher::new(&[(
            "https://shop.test/cat/a/",
            r#"<a href="/product/one/">1</a><a href="/product/two/">2</a>"#,
        )]);
        let mut cat = catalog(&["cat/a/", "cat/b/"]);
        cat.link_budget = 2;
        let links = discover(&fetcher, &cat).await;
        assert_eq!(links.len(), 2);
        assert_eq!(fetcher.calls(), vec!["https://shop.test/cat/a/"]);
    }
}
