mod config;
mod crawl;
mod discovery;
mod enrich;
mod error;
mod export;
mod fetch;
mod parser;
mod record;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::SearchCredentials;
use crate::crawl::CrawlOptions;
use crate::discovery::Catalog;
use crate::enrich::search::GoogleSearch;
use crate::enrich::{EnrichOptions, Enricher};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::record::{EnrichedRecord, ProductRecord};

#[derive(Parser)]
#[command(name = "product_scraper", about = "Catalog product scraper with manufacturer enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover product pages across category listings and extract them
    Crawl {
        /// Catalog root URL
        #[arg(long, default_value = discovery::DEFAULT_BASE_URL)]
        base_url: String,
        /// Category listing path, relative to the base URL (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Max product pages to extract
        #[arg(short = 'n', long, default_value = "30")]
        limit: usize,
        /// Max listing pages per category
        #[arg(long, default_value = "5")]
        pages: u32,
        #[command(flatten)]
        pacing: Pacing,
        #[command(flatten)]
        output: Output,
    },
    /// Extract a single product page and print it as JSON
    Product {
        url: String,
        /// Request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Enrich previously extracted products via web search
    Enrich {
        /// Products JSON written by `crawl`
        #[arg(short, long, default_value = "products.json")]
        input: PathBuf,
        /// Max products to enrich (complete records first)
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
        /// Search results requested per product
        #[arg(long, default_value = "5")]
        results: u32,
        /// Search endpoint
        #[arg(long, default_value = enrich::search::CUSTOM_SEARCH_URL)]
        search_url: String,
        #[command(flatten)]
        pacing: Pacing,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args)]
struct Pacing {
    /// Pause between requests, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
    /// Per-request timeout, in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,
}

#[derive(Args)]
struct Output {
    /// Output path stem; writes <stem>.json and <stem>.csv
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl Output {
    fn paths(&self, default_stem: &str) -> (PathBuf, PathBuf) {
        let stem = self.out.clone().unwrap_or_else(|| PathBuf::from(default_stem));
        (stem.with_extension("json"), stem.with_extension("csv"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crawl {
            base_url,
            categories,
            limit,
            pages,
            pacing,
            output,
        } => {
            let categories = if categories.is_empty() {
                discovery::DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
            } else {
                categories
            };
            let mut catalog = Catalog::new(&base_url, &categories)
                .with_context(|| format!("invalid catalog URL {base_url}"))?;
            catalog.max_pages_per_category = pages;
            catalog.link_budget = limit * 2;
            catalog.timeout = Duration::from_secs(pacing.timeout);

            let options = CrawlOptions {
                max_products: limit,
                delay: Duration::from_millis(pacing.delay_ms),
                timeout: Duration::from_secs(pacing.timeout),
            };

            let fetcher = HttpFetcher::new()?;
            let products = crawl::crawl(&fetcher, &catalog, &options).await;
            if products.is_empty() {
                println!("No products extracted.");
                return Ok(());
            }

            let (json_path, csv_path) = output.paths("products");
            export::write_json(&json_path, &products)?;
            export::write_csv(&csv_path, &products)?;
            print_product_summary(&products);
            println!(
                "Scraping complete! {} products saved to {} and {}.",
                products.len(),
                json_path.display(),
                csv_path.display()
            );
            Ok(())
        }
        Commands::Product { url, timeout } => {
            let fetcher = HttpFetcher::new()?;
            let html = fetcher.fetch(&url, Duration::from_secs(timeout)).await;
            if html.is_empty() {
                anyhow::bail!("could not fetch {url}");
            }
            let record = parser::extract_html(&html, &url);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Enrich {
            input,
            limit,
            results,
            search_url,
            pacing,
            output,
        } => {
            // Credentials first: nothing goes out on the wire without them.
            let credentials = SearchCredentials::from_env()?;

            let products: Vec<ProductRecord> = export::read_json(&input).with_context(|| {
                format!("scraped products not found at {}; run `crawl` first", input.display())
            })?;
            println!("Loaded {} products from {}", products.len(), input.display());
            let selected = enrich::select_for_enrichment(products, limit);
            if selected.is_empty() {
                println!("Nothing to enrich.");
                return Ok(());
            }

            let timeout = Duration::from_secs(pacing.timeout);
            let options = EnrichOptions {
                result_count: results,
                page_timeout: timeout,
                delay: Duration::from_millis(pacing.delay_ms),
            };
            let enricher = Enricher::new(
                GoogleSearch::new(credentials, timeout)?.with_endpoint(search_url),
                HttpFetcher::new()?,
                options,
            );

            info!("Enriching {} products", selected.len());
            let enriched = enricher.enrich_all(selected).await;

            let (json_path, csv_path) = output.paths("enriched_products");
            export::write_json(&json_path, &enriched)?;
            export::write_csv(&csv_path, &enriched)?;
            print_enriched_summary(&enriched);
            println!(
                "Wrote enrichment to {} and {}",
                json_path.display(),
                csv_path.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_product_summary(products: &[ProductRecord]) {
    println!(
        "{:>3} | {:<32} | {:<16} | {:<10} | {:<5}",
        "#", "Product", "Brand", "Size", "Ingr."
    );
    println!("{}", "-".repeat(78));
    for (i, p) in products.iter().enumerate() {
        println!(
            "{:>3} | {:<32} | {:<16} | {:<10} | {:<5}",
            i + 1,
            truncate(&p.product_name, 32),
            truncate(&p.brand, 16),
            truncate(&p.size_packaging, 10),
            if p.ingredients.is_empty() { "-" } else { "yes" },
        );
    }
    let complete = products.iter().filter(|p| p.is_complete()).count();
    println!("\n{} of {} records complete", complete, products.len());
}

fn print_enriched_summary(records: &[EnrichedRecord]) {
    println!(
        "{:>3} | {:<32} | {:<24} | {:<5}",
        "#", "Product", "Manufacturer", "Brand"
    );
    println!("{}", "-".repeat(72));
    for (i, r) in records.iter().enumerate() {
        let domain = if r.manufacturer_domain.is_empty() {
            "-"
        } else {
            r.manufacturer_domain.as_str()
        };
        println!(
            "{:>3} | {:<32} | {:<24} | {:<5}",
            i + 1,
            truncate(&r.product.product_name, 32),
            truncate(domain, 24),
            if r.brand_confirmed { "yes" } else { "no" },
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
