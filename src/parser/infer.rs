/// Guesses a brand from the most specific category label, for catalogs that
/// file products under a per-brand category.
#[derive(Debug, Clone)]
pub struct BrandInferer {
    stopwords: Vec<String>,
    max_len: usize,
}

pub const DEFAULT_STOPWORDS: &[&str] = &["wholesale", "products", "under", "makeup", "skincare"];
pub const DEFAULT_MAX_LEN: usize = 40;

impl Default for BrandInferer {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS, DEFAULT_MAX_LEN)
    }
}

impl BrandInferer {
    pub fn new(stopwords: &[&str], max_len: usize) -> Self {
        Self {
            stopwords: stopwords.iter().map(|s| s.to_lowercase()).collect(),
            max_len,
        }
    }

    /// Last label, unless it is a generic merchandising term or too long.
    pub fn infer<S: AsRef<str>>(&self, labels: &[S]) -> Option<String> {
        let last = labels.last()?.as_ref().trim();
        if last.is_empty() || last.chars().count() > self.max_len {
            return None;
        }
        let lower = last.to_lowercase();
        if self.stopwords.iter().any(|sw| lower.contains(sw.as_str())) {
            return None;
        }
        Some(last.to_string())
    }
}
