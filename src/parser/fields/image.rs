use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::chain::{first_non_empty, Strategy};
use crate::parser::dom::{first_attr, selector};

static GALLERY_SEL: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "figure.woocommerce-product-gallery__wrapper img, \
         div.woocommerce-product-gallery__image img, \
         img.wp-post-image",
    )
});
static OG_IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
static LINK_IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"link[rel="image_src"]"#));

/// Attributes checked on the gallery image, lazy-load placeholders aside.
const IMAGE_ATTRS: &[&str] = &["src", "data-src", "data-large_image"];

pub const CHAIN: &[Strategy] = &[gallery_image, og_image, link_image];

pub fn extract(doc: &Html) -> String {
    first_non_empty(doc, CHAIN)
}

pub fn gallery_image(doc: &Html) -> Option<String> {
    let img = doc.select(&GALLERY_SEL).next()?;
    IMAGE_ATTRS
        .iter()
        .filter_map(|a| img.value().attr(a))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn og_image(doc: &Html) -> Option<String> {
    first_attr(doc, &OG_IMAGE_SEL, "content")
}

pub fn link_image(doc: &Html) -> Option<String> {
    first_attr(doc, &LINK_IMAGE_SEL, "href")
}
