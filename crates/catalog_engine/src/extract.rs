use catalog_core::{ProductRecord, SelectorSet};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use scrape_logging::scrape_warn;

use crate::decode_html;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid {field} selector {selector:?}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
    /// The body cannot be turned into a queryable document.
    #[error("malformed document: {0}")]
    Malformed(String),
}

pub trait Extractor: Send + Sync {
    /// Turns a raw page body into products, in document order.
    ///
    /// An `Err` ends the crawl with a parse error; missing fields never do.
    fn extract(
        &self,
        body: &[u8],
        content_type: Option<&str>,
    ) -> Result<Vec<ProductRecord>, ExtractError>;
}

/// Selector-driven product extractor.
///
/// Every element matching the item selector becomes one record. Within an
/// item, the first descendant matching the title (price) selector supplies
/// the trimmed text; no match yields the `No Title` (`No Price`) sentinel.
#[derive(Debug, Clone)]
pub struct CssProductExtractor {
    item: Selector,
    title: Selector,
    price: Selector,
}

impl CssProductExtractor {
    /// Compiles the selectors up front so a typo fails before any page is requested.
    pub fn new(selectors: &SelectorSet) -> Result<Self, ExtractError> {
        Ok(Self {
            item: compile("item", &selectors.item)?,
            title: compile("title", &selectors.title)?,
            price: compile("price", &selectors.price)?,
        })
    }

    pub fn extract_html(&self, html: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(html);
        doc.select(&self.item)
            .map(|item| {
                ProductRecord::from_fields(
                    first_text(&item, &self.title),
                    first_text(&item, &self.price),
                )
            })
            .collect()
    }
}

impl Extractor for CssProductExtractor {
    fn extract(
        &self,
        body: &[u8],
        content_type: Option<&str>,
    ) -> Result<Vec<ProductRecord>, ExtractError> {
        let decoded = decode_html(body, content_type);
        if decoded.had_errors {
            scrape_warn!(
                "Page body had bytes invalid for its encoding ({}); replaced with U+FFFD",
                content_type.unwrap_or("no content type")
            );
        }
        Ok(self.extract_html(&decoded.html))
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn first_text(item: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
}
