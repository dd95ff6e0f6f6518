pub mod chain;
pub mod dom;
pub mod fields;
pub mod infer;
pub mod patterns;

use scraper::Html;
use url::Url;

use crate::record::ProductRecord;

/// Run every field chain over one product page. Pure: the same markup always
/// yields the same record.
pub fn extract(doc: &Html, product_page_url: &str) -> ProductRecord {
    ProductRecord {
        product_name: fields::name::extract(doc),
        brand: fields::brand::extract(doc),
        category: fields::category::extract(doc),
        ingredients: fields::ingredients::extract(doc),
        size_packaging: fields::size::extract(doc),
        product_image_url: absolutize(&fields::image::extract(doc), product_page_url),
        product_page_url: product_page_url.to_string(),
    }
}

/// Parse raw markup and extract.
pub fn extract_html(html: &str, product_page_url: &str) -> ProductRecord {
    let doc = Html::parse_document(html);
    extract(&doc, product_page_url)
}

/// Resolve a possibly relative reference against the page it came from.
fn absolutize(reference: &str, base: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }
    Url::parse(base)
        .and_then(|b| b.join(reference))
        .map(String::from)
        .unwrap_or_else(|_| reference.to_string())
}
