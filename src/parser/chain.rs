use scraper::Html;

/// One way of resolving a field from a parsed page.
pub type Strategy = fn(&Html) -> Option<String>;

/// Strategy producing an ordered list (category labels).
pub type ListStrategy = fn(&Html) -> Vec<String>;

/// Evaluate `chain` in order and return the first trimmed, non-empty result.
/// Later strategies are never called once one succeeds.
pub fn first_non_empty(doc: &Html, chain: &[Strategy]) -> String {
    chain
        .iter()
        .find_map(|strategy| {
            strategy(doc)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_default()
}

pub fn first_non_empty_list(doc: &Html, chain: &[ListStrategy]) -> Vec<String> {
    chain
        .iter()
        .map(|strategy| strategy(doc))
        .find(|labels| !labels.is_empty())
        .unwrap_or_default()
}
