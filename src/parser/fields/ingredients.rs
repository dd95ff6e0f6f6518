use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::table;
use crate::parser::chain::{first_non_empty, Strategy};
use crate::parser::dom::{joined_text, next_sibling_element, page_text, parent_element, selector};
use crate::parser::patterns;

static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h2, h3, h4, strong, b"));
static TAB_SEL: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "#tab-ingredients, #tab-ingredient, #tab-description, .woocommerce-Tabs-panel, \
         .product-description, .woocommerce-product-details__short-description",
    )
});
static DESCRIPTION_SEL: LazyLock<Selector> = LazyLock::new(|| selector("#tab-description"));
static SHORT_DESCRIPTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(".woocommerce-product-details__short-description"));

pub const CHAIN: &[Strategy] = &[attribute_table, heading_section, label_pattern, description_block];

pub fn extract(doc: &Html) -> String {
    first_non_empty(doc, CHAIN)
}

pub fn attribute_table(doc: &Html) -> Option<String> {
    table::attribute(doc, &["ingredients"])
}

/// First heading-like element mentioning "ingredient". Takes its next sibling's
/// text, else the first tab/description panel, else the heading's parent.
pub fn heading_section(doc: &Html) -> Option<String> {
    let heading = doc
        .select(&HEADING_SEL)
        .find(|h| joined_text(*h).to_lowercase().contains("ingredient"))?;

    if let Some(text) = next_sibling_element(heading)
        .map(joined_text)
        .filter(|t| !t.is_empty())
    {
        return Some(text);
    }

    if let Some(tab) = doc.select(&TAB_SEL).next() {
        let text = joined_text(tab);
        if !text.is_empty() {
            return Some(text);
        }
    }

    parent_element(heading).map(joined_text)
}

pub fn label_pattern(doc: &Html) -> Option<String> {
    patterns::ingredients_label(&page_text(doc))
}

pub fn description_block(doc: &Html) -> Option<String> {
    [&*DESCRIPTION_SEL, &*SHORT_DESCRIPTION_SEL]
        .into_iter()
        .find_map(|sel| doc.select(sel).next().map(joined_text).filter(|t| !t.is_empty()))
}
