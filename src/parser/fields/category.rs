use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::chain::{first_non_empty_list, ListStrategy};
use crate::parser::dom::{joined_text, selector};

static POSTED_IN_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span.posted_in a"));
static BREADCRUMB_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector("nav.woocommerce-breadcrumb a"));

pub const CHAIN: &[ListStrategy] = &[posted_in, breadcrumbs];

/// Category labels in document order.
pub fn labels(doc: &Html) -> Vec<String> {
    first_non_empty_list(doc, CHAIN)
}

pub fn extract(doc: &Html) -> String {
    labels(doc).join(", ")
}

pub fn posted_in(doc: &Html) -> Vec<String> {
    link_texts(doc, &POSTED_IN_SEL)
}

/// Breadcrumb trail minus its final entry, which names the current page.
/// A single-entry trail is kept whole.
pub fn breadcrumbs(doc: &Html) -> Vec<String> {
    let mut crumbs = link_texts(doc, &BREADCRUMB_SEL);
    if crumbs.len() > 1 {
        crumbs.pop();
    }
    crumbs
}

fn link_texts(doc: &Html, sel: &Selector) -> Vec<String> {
    doc.select(sel)
        .map(joined_text)
        .filter(|t| !t.is_empty())
        .collect()
}
