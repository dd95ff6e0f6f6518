use scraper::Html;

use super::table;
use crate::parser::chain::{first_non_empty, Strategy};
use crate::parser::dom::page_text;
use crate::parser::patterns;

pub const CHAIN: &[Strategy] = &[attribute_table, text_pattern];

pub fn extract(doc: &Html) -> String {
    first_non_empty(doc, CHAIN)
}

pub fn attribute_table(doc: &Html) -> Option<String> {
    table::attribute(doc, &["size", "volume"])
}

/// Quantity and unit found anywhere in the page text. Only ml, g, kg, oz and l
/// are recognised.
pub fn text_pattern(doc: &Html) -> Option<String> {
    patterns::size_quantity(&page_text(doc))
}
