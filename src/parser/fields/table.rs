use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::dom::{joined_text, selector};

static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| selector("table.shop_attributes tr"));
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

/// Value of the product attributes table row whose header contains any of
/// `labels` (case-insensitive). When several rows match, the last non-empty
/// one wins.
pub fn attribute(doc: &Html, labels: &[&str]) -> Option<String> {
    doc.select(&ROW_SEL)
        .filter_map(|row| {
            let th = row.select(&TH_SEL).next()?;
            let td = row.select(&TD_SEL).next()?;
            let header = joined_text(th).to_lowercase();
            if !labels.iter().any(|l| header.contains(l)) {
                return None;
            }
            Some(joined_text(td)).filter(|v| !v.is_empty())
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        <table class="shop_attributes">
          <tr><th>Brand</th><td><p>RoseLab</p></td></tr>
          <tr><th>Volume (ml)</th><td>30ml</td></tr>
          <tr><th>Key Ingredients</th><td>Rose water</td></tr>
          <tr><td>orphan cell</td></tr>
        </table>"#;

    #[test]
    fn matches_header_substring() {
        let doc = Html::parse_document(TABLE);
        assert_eq!(attribute(&doc, &["brand"]).as_deref(), Some("RoseLab"));
        assert_eq!(attribute(&doc, &["size", "volume"]).as_deref(), Some("30ml"));
        assert_eq!(attribute(&doc, &["ingredients"]).as_deref(), Some("Rose water"));
        assert_eq!(attribute(&doc, &["origin"]), None);
    }

    #[test]
    fn ignores_tables_of_other_classes() {
        let doc = Html::parse_document("<table><tr><th>Brand</th><td>X</td></tr></table>");
        assert_eq!(attribute(&doc, &["brand"]), None);
    }
}
