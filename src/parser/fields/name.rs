use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::chain::{first_non_empty, Strategy};
use crate::parser::dom::{first_attr, first_text, selector};

static PRODUCT_TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h1.product_title"));
static OG_TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:title"]"#));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("title"));

pub const CHAIN: &[Strategy] = &[product_title, og_title, document_title];

pub fn extract(doc: &Html) -> String {
    first_non_empty(doc, CHAIN)
}

pub fn product_title(doc: &Html) -> Option<String> {
    first_text(doc, &PRODUCT_TITLE_SEL)
}

pub fn og_title(doc: &Html) -> Option<String> {
    first_attr(doc, &OG_TITLE_SEL, "content")
}

pub fn document_title(doc: &Html) -> Option<String> {
    first_text(doc, &TITLE_SEL)
}
