//! Settings file loading.
//!
//! The file is read once at startup and turned into the immutable
//! [`ScrapeConfig`], [`FetchSettings`] and [`LogTargets`] values the rest of
//! the run is handed explicitly.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_core::{ConfigError, ScrapeConfig, SelectorSet, DEFAULT_MAX_PAGES};
use catalog_engine::FetchSettings;
use scrape_logging::LogTargets;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub scraping: ScrapingSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapingSection {
    pub url: String,
    pub product_item_selector: String,
    pub title_selector: String,
    pub price_selector: String,
    /// Seconds to wait after each extracted product.
    pub wait_time: u64,
    /// Negative values mean "fetch nothing".
    #[serde(default = "default_max_pages")]
    pub max_pages: i64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub output_file: PathBuf,
    pub log_to_console: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub log_file: PathBuf,
}

fn default_max_pages() -> i64 {
    i64::from(DEFAULT_MAX_PAGES)
}

fn default_connect_timeout() -> u64 {
    FetchSettings::default().connect_timeout.as_secs()
}

fn default_request_timeout() -> u64 {
    FetchSettings::default().request_timeout.as_secs()
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub max_pages: Option<u32>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the validated run configuration.
    pub fn scrape_config(&self, overrides: &Overrides) -> Result<ScrapeConfig, SettingsError> {
        let scraping = &self.scraping;
        let max_pages = overrides
            .max_pages
            .unwrap_or_else(|| u32::try_from(scraping.max_pages.max(0)).unwrap_or(u32::MAX));

        let config = ScrapeConfig {
            base_url: scraping.url.clone(),
            selectors: SelectorSet {
                item: scraping.product_item_selector.clone(),
                title: scraping.title_selector.clone(),
                price: scraping.price_selector.clone(),
            },
            wait_time: Duration::from_secs(scraping.wait_time),
            max_pages,
            output_file: overrides
                .output_file
                .clone()
                .unwrap_or_else(|| self.output.output_file.clone()),
            log_to_console: self.output.log_to_console && !overrides.quiet,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.scraping.connect_timeout),
            request_timeout: Duration::from_secs(self.scraping.request_timeout),
            ..FetchSettings::default()
        }
    }

    pub fn log_targets(&self) -> LogTargets {
        LogTargets {
            log_file: Some(self.logging.log_file.clone()),
            ..LogTargets::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL: &str = r#"
        [scraping]
        url = "https://shop.example.com/catalog"
        product_item_selector = "div.product"
        title_selector = "h2.title"
        price_selector = "span.price"
        wait_time = 2
        max_pages = 4
        connect_timeout = 3
        request_timeout = 7

        [output]
        output_file = "out/products.json"
        log_to_console = true

        [logging]
        log_file = "scraper.log"
    "#;

    fn without_line(prefix: &str) -> String {
        FULL.lines()
            .filter(|line| !line.trim_start().starts_with(prefix))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parses_all_sections() {
        let settings = Settings::from_toml(FULL).unwrap();
        let config = settings.scrape_config(&Overrides::default()).unwrap();

        assert_eq!(config.base_url, "https://shop.example.com/catalog");
        assert_eq!(config.selectors.item, "div.product");
        assert_eq!(config.selectors.title, "h2.title");
        assert_eq!(config.selectors.price, "span.price");
        assert_eq!(config.wait_time, Duration::from_secs(2));
        assert_eq!(config.max_pages, 4);
        assert_eq!(config.output_file, PathBuf::from("out/products.json"));
        assert!(config.log_to_console);

        let fetch = settings.fetch_settings();
        assert_eq!(fetch.connect_timeout, Duration::from_secs(3));
        assert_eq!(fetch.request_timeout, Duration::from_secs(7));
        assert_eq!(
            settings.log_targets().log_file,
            Some(PathBuf::from("scraper.log"))
        );
    }

    #[test]
    fn max_pages_defaults_to_ten() {
        let settings = Settings::from_toml(&without_line("max_pages")).unwrap();
        let config = settings.scrape_config(&Overrides::default()).unwrap();
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
        assert_eq!(config.max_pages, 10);
    }

    #[test]
    fn negative_max_pages_clamps_to_zero() {
        let text = FULL.replace("max_pages = 4", "max_pages = -3");
        let settings = Settings::from_toml(&text).unwrap();
        assert_eq!(
            settings.scrape_config(&Overrides::default()).unwrap().max_pages,
            0
        );
    }

    #[test]
    fn timeouts_fall_back_to_fetcher_defaults() {
        let text = without_line("connect_timeout");
        let settings = Settings::from_toml(&text).unwrap();
        assert_eq!(
            settings.fetch_settings().connect_timeout,
            FetchSettings::default().connect_timeout
        );
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = Settings::from_toml(FULL).unwrap();
        let overrides = Overrides {
            max_pages: Some(1),
            output_file: Some(PathBuf::from("other.json")),
            quiet: true,
        };
        let config = settings.scrape_config(&overrides).unwrap();

        assert_eq!(config.max_pages, 1);
        assert_eq!(config.output_file, PathBuf::from("other.json"));
        assert!(!config.log_to_console);
    }

    #[test]
    fn missing_required_key_is_a_parse_error() {
        let err = Settings::from_toml(&without_line("price_selector")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn negative_wait_time_is_rejected() {
        let text = FULL.replace("wait_time = 2", "wait_time = -1");
        assert!(matches!(
            Settings::from_toml(&text),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn invalid_url_is_reported_as_invalid_settings() {
        let text = FULL.replace("https://shop.example.com/catalog", "catalog");
        let settings = Settings::from_toml(&text).unwrap();
        assert!(matches!(
            settings.scrape_config(&Overrides::default()),
            Err(SettingsError::Invalid(ConfigError::InvalidUrl { .. }))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Settings::load(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, FULL).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::from_toml(FULL).unwrap());
    }
}
