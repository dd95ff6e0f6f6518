//! Loose textual rules run over a page's visible text. Each rule is tuned
//! against real catalog and brand pages, so keep them separate and tested.

use std::sync::LazyLock;

use regex::Regex;

static INGREDIENTS_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ingredients[:\s]+([A-Za-z0-9,(). %/-]+)").unwrap());
static INGREDIENTS_LABEL_CI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Ingredients[:\s]+([A-Za-z0-9,(). %/-]+)").unwrap());
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+[\s-]?(?:oz\.|(?:ml|kg|g|oz|l)\b)").unwrap());
static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:SKU|sku|UPC|EAN|Barcode)[:#\s]*([A-Z0-9-]{4,})").unwrap());
static BARCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{8,13})\b").unwrap());
static COUNTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Made in|Country of Origin)[:\s]*([A-Za-z\s]+)").unwrap());

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Ingredients:` followed by a printable run. Case-sensitive label.
pub fn ingredients_label(text: &str) -> Option<String> {
    capture(&INGREDIENTS_LABEL_RE, text)
}

/// Same as [`ingredients_label`] with a case-insensitive label.
pub fn ingredients_label_any_case(text: &str) -> Option<String> {
    capture(&INGREDIENTS_LABEL_CI_RE, text)
}

/// A quantity next to one of ml, g, kg, oz, l.
pub fn size_quantity(text: &str) -> Option<String> {
    SIZE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn sku_label(text: &str) -> Option<String> {
    capture(&SKU_RE, text)
}

/// Bare 8 to 13 digit run, typically an EAN/UPC printed without a label.
pub fn barcode_digits(text: &str) -> Option<String> {
    capture(&BARCODE_RE, text)
}

pub fn sku_or_barcode(text: &str) -> Option<String> {
    sku_label(text).or_else(|| barcode_digits(text))
}

pub fn country_of_origin(text: &str) -> Option<String> {
    capture(&COUNTRY_RE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredients_keeps_trailing_period() {
        assert_eq!(
            ingredients_label("Ingredients: Aqua, Glycerin, Rose Extract.").as_deref(),
            Some("Aqua, Glycerin, Rose Extract.")
        );
    }

    #[test]
    fn ingredients_run_stops_at_unlisted_punctuation() {
        assert_eq!(
            ingredients_label("Ingredients: Aqua, Niacinamide; Directions: apply").as_deref(),
            Some("Aqua, Niacinamide")
        );
    }

    #[test]
    fn ingredients_label_case() {
        assert_eq!(ingredients_label("INGREDIENTS: Aqua"), None);
        assert_eq!(ingredients_label_any_case("INGREDIENTS: Aqua").as_deref(), Some("Aqua"));
    }

    #[test]
    fn size_units() {
        assert_eq!(size_quantity("Rose Serum 30ml bottle").as_deref(), Some("30ml"));
        assert_eq!(size_quantity("net wt 50 g per jar").as_deref(), Some("50 g"));
        assert_eq!(size_quantity("1-kg tub").as_deref(), Some("1-kg"));
        assert_eq!(size_quantity("4 OZ. bottle").as_deref(), Some("4 OZ."));
        assert_eq!(size_quantity("2 L jug").as_deref(), Some("2 L"));
    }

    #[test]
    fn size_period_only_kept_for_oz() {
        assert_eq!(size_quantity("Net 30 ml. Made fresh").as_deref(), Some("30 ml"));
        assert_eq!(size_quantity("Net 4 oz. bottle").as_deref(), Some("4 oz."));
    }

    #[test]
    fn size_ignores_unknown_units_and_plurals() {
        assert_eq!(size_quantity("pack of 12 pcs"), None);
        assert_eq!(size_quantity("100 mls"), None);
        assert_eq!(size_quantity("3 fl"), None);
    }

    #[test]
    fn sku_prefers_label_over_bare_digits() {
        assert_eq!(
            sku_or_barcode("Ref 123456789012 SKU: RS-3030").as_deref(),
            Some("RS-3030")
        );
        assert_eq!(sku_or_barcode("EAN 8809123456789").as_deref(), Some("8809123456789"));
        assert_eq!(sku_or_barcode("call 0123456789 today").as_deref(), Some("0123456789"));
        assert_eq!(sku_or_barcode("no codes here 123"), None);
    }

    #[test]
    fn country_label() {
        assert_eq!(country_of_origin("Made in Korea").as_deref(), Some("Korea"));
        assert_eq!(
            country_of_origin("country of origin: South Korea").as_deref(),
            Some("South Korea")
        );
        assert_eq!(country_of_origin("Handmade with care"), None);
    }
}
