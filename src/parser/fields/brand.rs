use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::{category, table};
use crate::parser::chain::{first_non_empty, Strategy};
use crate::parser::dom::{first_attr, first_text, selector};
use crate::parser::infer::BrandInferer;

static META_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="brand"], meta[property="product:brand"]"#));
static LD_JSON_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));
static BRAND_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href*="/brand/"]"#));
static TAG_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[rel="tag"]"#));

pub const CHAIN: &[Strategy] = &[
    attribute_table,
    meta_tag,
    structured_data,
    brand_link,
    tag_link,
    from_categories,
];

pub fn extract(doc: &Html) -> String {
    first_non_empty(doc, CHAIN)
}

pub fn attribute_table(doc: &Html) -> Option<String> {
    table::attribute(doc, &["brand"])
}

pub fn meta_tag(doc: &Html) -> Option<String> {
    first_attr(doc, &META_SEL, "content")
}

/// First JSON-LD object exposing `brand`, either as a string or as an object
/// with `name`. Blocks that fail to parse are skipped.
pub fn structured_data(doc: &Html) -> Option<String> {
    doc.select(&LD_JSON_SEL).find_map(|script| {
        let raw: String = script.text().collect();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => brand_in_ld(&value),
            Err(e) => {
                debug!("skipping malformed ld+json block: {}", e);
                None
            }
        }
    })
}

fn brand_in_ld(value: &Value) -> Option<String> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => std::iter::once(other)
            .chain(other.get("@graph").and_then(Value::as_array).into_iter().flatten())
            .collect(),
    };

    items.into_iter().find_map(|item| {
        let brand = item.as_object()?.get("brand")?;
        let name = match brand {
            Value::String(s) => s.as_str(),
            Value::Object(o) => o.get("name")?.as_str()?,
            _ => return None,
        };
        Some(name.trim().to_string()).filter(|n| !n.is_empty())
    })
}

pub fn brand_link(doc: &Html) -> Option<String> {
    first_text(doc, &BRAND_LINK_SEL)
}

pub fn tag_link(doc: &Html) -> Option<String> {
    first_text(doc, &TAG_LINK_SEL)
}

/// Last resort: the most specific category label, when it looks like a brand.
pub fn from_categories(doc: &Html) -> Option<String> {
    BrandInferer::default().infer(&category::labels(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_table_beats_everything() {
        let doc = Html::parse_document(
            r#"<head><meta name="brand" content="MetaBrand"></head>
               <table class="shop_attributes"><tr><th>Brand</th><td>TableBrand</td></tr></table>"#,
        );
        assert_eq!(extract(&doc), "TableBrand");
    }

    #[test]
    fn meta_tag_variants() {
        let doc = Html::parse_document(
            r#"<head><meta property="product:brand" content=" PropBrand "></head>"#,
        );
        assert_eq!(extract(&doc), "PropBrand");
    }

    #[test]
    fn ld_json_nested_name() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">
                 [{"@type": "BreadcrumbList"}, {"@type": "Product", "brand": {"@type": "Brand", "name": "RoseLab"}}]
               </script>"#,
        );
        assert_eq!(extract(&doc), "RoseLab");
    }

    #[test]
    fn ld_json_plain_string_inside_graph() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">
                 {"@context": "https://schema.org", "@graph": [{"@type": "Product", "brand": "Petal Co"}]}
               </script>"#,
        );
        assert_eq!(structured_data(&doc).as_deref(), Some("Petal Co"));
    }

    #[test]
    fn malformed_ld_json_falls_through() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">{"brand": </script>
               <script type="application/ld+json">{"brand": {"name": ""}}</script>
               <a href="/brand/glowco/">GlowCo</a>"#,
        );
        assert_eq!(structured_data(&doc), None);
        assert_eq!(extract(&doc), "GlowCo");
    }

    #[test]
    fn tag_link_used_without_brand_link() {
        let doc = Html::parse_document(r#"<a rel="tag" href="/tag/dewy/">Dewy</a>"#);
        assert_eq!(extract(&doc), "Dewy");
    }

    #[test]
    fn inferred_from_categories_last() {
        let doc = Html::parse_document(
            r#"<span class="posted_in">
                 <a>Wholesale Face Care</a><a>Serums</a><a>RoseLab</a>
               </span>"#,
        );
        assert_eq!(from_categories(&doc).as_deref(), Some("RoseLab"));
        assert_eq!(extract(&doc), "RoseLab");
    }

    #[test]
    fn tagged_category_links_win_over_inference() {
        let doc = Html::parse_document(
            r#"<span class="posted_in">
                 <a href="/cat/face/" rel="tag">Wholesale Face Care</a>
                 <a href="/cat/serums/" rel="tag">Serums</a>
                 <a href="/cat/roselab/" rel="tag">RoseLab</a>
               </span>"#,
        );
        assert_eq!(tag_link(&doc).as_deref(), Some("Wholesale Face Care"));
        assert_eq!(from_categories(&doc).as_deref(), Some("RoseLab"));
        assert_eq!(extract(&doc), "Wholesale Face Care");
    }

    #[test]
    fn generic_category_infers_nothing() {
        let doc = Html::parse_document(r#"<span class="posted_in"><a>Makeup Products</a></span>"#);
        assert_eq!(extract(&doc), "");
    }
}
