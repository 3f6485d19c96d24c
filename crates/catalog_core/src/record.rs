use serde::{Deserialize, Serialize};

/// Placeholder title for an item whose title selector matched nothing.
pub const NO_TITLE: &str = "No Title";
/// Placeholder price for an item whose price selector matched nothing.
pub const NO_PRICE: &str = "No Price";

/// One product as exported: `{"Product Title": ..., "Price": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product Title")]
    title: String,
    #[serde(rename = "Price")]
    price: String,
}

impl ProductRecord {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
        }
    }

    /// Builds a record from optional extracted fields, substituting sentinels.
    pub fn from_fields(title: Option<String>, price: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            price: price.unwrap_or_else(|| NO_PRICE.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

/// Records collected over a run, in page order then document order.
///
/// Only grows: there is no way to remove or edit a record once appended.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ScrapeResult {
    records: Vec<ProductRecord>,
}

impl ScrapeResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }
}

impl Extend<ProductRecord> for ScrapeResult {
    fn extend<I: IntoIterator<Item = ProductRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
