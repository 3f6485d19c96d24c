use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Page count used when the settings file does not name one.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// CSS selectors locating a product container and its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet {
    pub item: String,
    pub title: String,
    pub price: String,
}

/// Settings for one run, resolved before the first page is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub selectors: SelectorSet,
    /// Politeness delay applied after every extracted record.
    pub wait_time: Duration,
    pub max_pages: u32,
    pub output_file: PathBuf,
    pub log_to_console: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("base url {0:?} must use http or https")]
    UnsupportedScheme(String),
    #[error("{field} selector is empty")]
    EmptySelector { field: &'static str },
    #[error("output file path is empty")]
    EmptyOutputPath,
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(self.base_url.clone()));
        }

        for (field, value) in [
            ("item", &self.selectors.item),
            ("title", &self.selectors.title),
            ("price", &self.selectors.price),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector { field });
            }
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        Ok(())
    }
}

/// URL of a 1-based catalog page: `{base}?page={n}`.
pub fn page_url(base_url: &str, page: u32) -> String {
    format!("{base_url}?page={page}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScrapeConfig {
        ScrapeConfig {
            base_url: "https://shop.example.com/catalog".into(),
            selectors: SelectorSet {
                item: "div.product".into(),
                title: "h2".into(),
                price: ".price".into(),
            },
            wait_time: Duration::ZERO,
            max_pages: DEFAULT_MAX_PAGES,
            output_file: PathBuf::from("out.json"),
            log_to_console: false,
        }
    }

    #[test]
    fn page_url_appends_page_query() {
        assert_eq!(page_url("http://x/catalog", 3), "http://x/catalog?page=3");
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn rejects_unparseable_and_non_http_urls() {
        let mut bad = config();
        bad.base_url = "not a url".into();
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidUrl { .. })));

        bad.base_url = "ftp://example.com/catalog".into();
        assert!(matches!(bad.validate(), Err(ConfigError::UnsupportedScheme(_))));
    }

    #[test]
    fn rejects_blank_selector() {
        let mut bad = config();
        bad.selectors.price = "  ".into();
        assert_eq!(
            bad.validate(),
            Err(ConfigError::EmptySelector { field: "price" })
        );
    }

    #[test]
    fn rejects_empty_output_path() {
        let mut bad = config();
        bad.output_file = PathBuf::new();
        assert_eq!(bad.validate(), Err(ConfigError::EmptyOutputPath));
    }
}
