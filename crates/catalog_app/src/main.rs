mod settings;

use std::path::PathBuf;

use anyhow::Context;
use catalog_engine::{run_crawl, CssProductExtractor, JsonFileSink, ReqwestFetcher};
use clap::Parser;
use scrape_logging::{scrape_error, scrape_info};

use crate::settings::{Overrides, Settings};

#[derive(Debug, Parser)]
#[command(
    name = "catalog_scraper",
    about = "Export paginated product listings to a JSON file"
)]
struct Cli {
    /// Settings file with [scraping], [output] and [logging] sections
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Override scraping.max_pages
    #[arg(long)]
    max_pages: Option<u32>,
    /// Override output.output_file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Do not echo the export to stdout
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            max_pages: self.max_pages,
            output_file: self.output.clone(),
            quiet: self.quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    scrape_logging::initialize(&settings.log_targets());

    let config = settings.scrape_config(&cli.overrides())?;
    let extractor = CssProductExtractor::new(&config.selectors)?;
    let fetcher = ReqwestFetcher::new(settings.fetch_settings());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    scrape_info!(
        "Scraping {} (up to {} pages)",
        config.base_url,
        config.max_pages
    );
    let report = runtime.block_on(run_crawl(&config, &fetcher, &extractor));
    scrape_info!(
        "{} products from {} page requests, {} politeness pauses",
        report.result.len(),
        report.fetches,
        report.pauses
    );

    // Whatever was collected is written even when the crawl stopped on an error.
    let sink = JsonFileSink::new(&config.output_file, config.log_to_console);
    if let Err(err) = sink.write(&report.result) {
        scrape_error!("Run failed: could not save results: {}", err);
        return Err(err)
            .with_context(|| format!("writing results to {}", config.output_file.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults_to_config_toml() {
        let cli = Cli::try_parse_from(["catalog_scraper"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert_eq!(cli.overrides(), Overrides::default());
    }

    #[test]
    fn cli_collects_overrides() {
        let cli = Cli::try_parse_from([
            "catalog_scraper",
            "--config",
            "shop.toml",
            "--max-pages",
            "3",
            "-o",
            "shop.json",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(
            cli.overrides(),
            Overrides {
                max_pages: Some(3),
                output_file: Some(PathBuf::from("shop.json")),
                quiet: true,
            }
        );
    }
}
