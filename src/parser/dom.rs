use scraper::{ElementRef, Html, Node, Selector};

const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse a selector known at compile time.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Text of an element: every text run trimmed, empty runs dropped, joined by
/// a single space.
pub fn joined_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `sel`, if any and non-empty.
pub fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel)
        .next()
        .map(joined_text)
        .filter(|t| !t.is_empty())
}

/// Trimmed value of `attr` on the first element matching `sel`.
pub fn first_attr(doc: &Html, sel: &Selector, attr: &str) -> Option<String> {
    doc.select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Visible text of the whole document, script and style bodies excluded.
/// Walks with an explicit stack so arbitrarily deep markup is safe.
pub fn page_text(doc: &Html) -> String {
    let mut parts = Vec::new();
    let mut stack = vec![*doc.root_element()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t);
                }
            }
            Node::Element(e) if SKIP_TAGS.contains(&e.name()) => {}
            _ => stack.extend(node.children().rev()),
        }
    }
    parts.join(" ")
}

/// Next sibling that is an element, skipping text and comments.
pub fn next_sibling_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}
