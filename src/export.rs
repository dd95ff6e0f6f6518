use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::ExportError;
use crate::record::{EnrichedRecord, ProductRecord};

/// A record that flattens to one CSV row.
pub trait TabularRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

const PRODUCT_HEADERS: &[&str] = &[
    "product_name",
    "brand",
    "category",
    "ingredients",
    "size_packaging",
    "product_image_url",
    "product_page_url",
];

const ENRICHED_HEADERS: &[&str] = &[
    "product_name",
    "brand",
    "category",
    "ingredients",
    "size_packaging",
    "product_image_url",
    "product_page_url",
    "search_items",
    "manufacturer_page",
    "manufacturer_domain",
    "brand_confirmed",
    "description",
    "sku_or_barcode",
    "country_of_origin",
    "ingredients_match",
];

impl TabularRow for ProductRecord {
    fn headers() -> &'static [&'static str] {
        PRODUCT_HEADERS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.brand.clone(),
            self.category.clone(),
            self.ingredients.clone(),
            self.size_packaging.clone(),
            self.product_image_url.clone(),
            self.product_page_url.clone(),
        ]
    }
}

impl TabularRow for EnrichedRecord {
    fn headers() -> &'static [&'static str] {
        ENRICHED_HEADERS
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = self.product.cells();
        cells.extend([
            serde_json::to_string(&self.search_items).unwrap_or_default(),
            self.manufacturer_page.clone(),
            self.manufacturer_domain.clone(),
            self.brand_confirmed.to_string(),
            self.comparison.description.clone(),
            self.comparison.sku_or_barcode.clone(),
            self.comparison.country_of_origin.clone(),
            self.comparison.ingredients_match.clone(),
        ]);
        cells
    }
}

/// Pretty-printed UTF-8 JSON array.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| io_error(path, source))?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn write_csv<T: TabularRow>(path: &Path, records: &[T]) -> Result<(), ExportError> {
    let mut output = Vec::new();
    writeln!(output, "{}", T::headers().join(",")).map_err(|source| io_error(path, source))?;
    for record in records {
        let row: Vec<String> = record.cells().iter().map(|c| escape_csv(c)).collect();
        writeln!(output, "{}", row.join(",")).map_err(|source| io_error(path, source))?;
    }
    fs::write(path, output).map_err(|source| io_error(path, source))?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Load records written by [`write_json`].
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    Ok(serde_json::from_str(&raw)?)
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
