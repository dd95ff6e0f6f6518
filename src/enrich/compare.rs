use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::dom::{first_attr, joined_text, page_text, selector};
use crate::parser::patterns;
use crate::record::ComparisonFields;

static OG_DESCRIPTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:description"]"#));
static META_DESCRIPTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static BLOCK_SEL: LazyLock<Selector> = LazyLock::new(|| selector("p, div, li"));

/// What a fetched search result page tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePage {
    pub fields: ComparisonFields,
    pub brand_seen: bool,
}

pub fn inspect(html: &str, brand: &str) -> CandidatePage {
    let doc = Html::parse_document(html);
    let text = page_text(&doc);

    let fields = ComparisonFields {
        description: description(&doc).unwrap_or_default(),
        ingredients_match: ingredients(&doc, &text).unwrap_or_default(),
        sku_or_barcode: patterns::sku_or_barcode(&text).unwrap_or_default(),
        country_of_origin: patterns::country_of_origin(&text).unwrap_or_default(),
    };

    CandidatePage {
        fields,
        brand_seen: mentions_brand(&text, brand),
    }
}

pub fn description(doc: &Html) -> Option<String> {
    first_attr(doc, &OG_DESCRIPTION_SEL, "content")
        .or_else(|| first_attr(doc, &META_DESCRIPTION_SEL, "content"))
}

/// Labelled ingredient list, else the first text block mentioning ingredients.
pub fn ingredients(doc: &Html, text: &str) -> Option<String> {
    patterns::ingredients_label_any_case(text).or_else(|| {
        doc.select(&BLOCK_SEL)
            .map(joined_text)
            .find(|t| t.to_lowercase().contains("ingredient"))
    })
}

/// Case-insensitive containment of the brand in the page's visible text.
pub fn mentions_brand(text: &str, brand: &str) -> bool {
    let brand = brand.trim();
    !brand.is_empty() && text.to_lowercase().contains(&brand.to_lowercase())
}
