use serde::{Deserialize, Serialize};

/// One scraped product page. Every field except `product_page_url` may be
/// empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    pub product_name: String,
    pub brand: String,
    pub category: String,
    pub ingredients: String,
    pub size_packaging: String,
    pub product_image_url: String,
    pub product_page_url: String,
}

impl ProductRecord {
    /// True when every field the enrichment batch prefers is filled in.
    pub fn is_complete(&self) -> bool {
        [
            &self.product_name,
            &self.brand,
            &self.ingredients,
            &self.size_packaging,
            &self.product_image_url,
            &self.product_page_url,
        ]
        .iter()
        .all(|v| !v.is_empty())
    }
}

/// One item of the external search response. Unknown keys are carried in
/// `extra` so the raw item survives into the audit trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "formattedUrl")]
    pub formatted_url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchResult {
    /// `link`, falling back to `formattedUrl`.
    pub fn target(&self) -> &str {
        if self.link.is_empty() {
            &self.formatted_url
        } else {
            &self.link
        }
    }
}

/// Fields recovered from the chosen manufacturer page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonFields {
    pub description: String,
    pub sku_or_barcode: String,
    pub country_of_origin: String,
    pub ingredients_match: String,
}

/// A [`ProductRecord`] plus what the enrichment stage learned about it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub search_items: Vec<SearchResult>,
    pub manufacturer_page: String,
    pub manufacturer_domain: String,
    pub brand_confirmed: bool,
    #[serde(flatten)]
    pub comparison: ComparisonFields,
}

impl EnrichedRecord {
    /// Record with every enrichment field empty, used when the search call fails.
    pub fn unenriched(product: ProductRecord) -> Self {
        Self {
            product,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let p: ProductRecord =
            serde_json::from_str(r#"{"product_page_url": "https://shop.test/product/a/"}"#)
                .unwrap();
        assert_eq!(p.product_name, "");
        assert_eq!(p.brand, "");
        assert!(!p.is_complete());
    }

    #[test]
    fn search_result_falls_back_to_formatted_url() {
        let r: SearchResult =
            serde_json::from_str(r#"{"formattedUrl": "https://brand.test/x", "title": "X"}"#)
                .unwrap();
        assert_eq!(r.target(), "https://brand.test/x");
        assert_eq!(r.extra.get("title").and_then(|t| t.as_str()), Some("X"));
    }

    #[test]
    fn enriched_record_serializes_flat() {
        let rec = EnrichedRecord {
            product: ProductRecord {
                product_name: "Rose Serum".into(),
                product_page_url: "https://shop.test/product/rose/".into(),
                ..Default::default()
            },
            brand_confirmed: true,
            comparison: ComparisonFields {
                description: "A serum".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["product_name"], "Rose Serum");
        assert_eq!(v["description"], "A serum");
        assert_eq!(v["brand_confirmed"], true);
        assert_eq!(v["search_items"], serde_json::json!([]));

        let back: EnrichedRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, rec);
    }
}
