use std::collections::VecDeque;

use catalog_core::{
    update, Effect, Msg, PageError, PageErrorKind, Paginator, RunState, ScrapeConfig,
    ScrapeResult,
};
use scrape_logging::{scrape_debug, scrape_error, scrape_info};

use crate::{Extractor, Fetcher};

/// What a crawl produced and why it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub state: RunState,
    pub result: ScrapeResult,
    /// Page requests issued, successful or not.
    pub fetches: u32,
    /// Politeness delays taken.
    pub pauses: usize,
}

/// Drives the pagination state machine to a terminal state.
///
/// Pages are fetched strictly one after another. Page-level failures end the
/// crawl but never escape it: they show up as `RunState::StoppedOnError` with
/// whatever was collected before the failure still in `result`.
pub async fn run_crawl(
    config: &ScrapeConfig,
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
) -> CrawlReport {
    let mut fetches = 0u32;
    let mut pauses = 0usize;

    let (mut state, effects) = update(Paginator::new(config), Msg::Start);
    let mut queue: VecDeque<Effect> = effects.into();

    while let Some(effect) = queue.pop_front() {
        let msg = match effect {
            Effect::FetchPage { page, url } => {
                fetches += 1;
                fetch_page(page, &url, fetcher, extractor).await
            }
            Effect::Pause => {
                pauses += 1;
                if !config.wait_time.is_zero() {
                    tokio::time::sleep(config.wait_time).await;
                }
                continue;
            }
            Effect::Finish => break,
        };

        let (next, effects) = update(state, msg);
        state = next;
        queue.extend(effects);
    }

    let (state, result) = state.into_parts();
    match &state {
        RunState::StoppedOnError { .. } => scrape_error!("Scrape ended early: {}", state),
        _ => scrape_info!("Scrape finished: {}", state),
    }

    CrawlReport {
        state,
        result,
        fetches,
        pauses,
    }
}

async fn fetch_page(page: u32, url: &str, fetcher: &dyn Fetcher, extractor: &dyn Extractor) -> Msg {
    let output = match fetcher.fetch(url).await {
        Ok(output) => output,
        Err(err) => {
            scrape_error!("Failed to retrieve the webpage: {}. {}", url, err);
            return Msg::PageFailed {
                page,
                error: err.into(),
            };
        }
    };
    scrape_info!(
        "Successfully retrieved the webpage: {} (status {}, {} bytes)",
        url,
        output.status,
        output.metadata.byte_len
    );

    match extractor.extract(&output.bytes, output.metadata.content_type.as_deref()) {
        Ok(records) => {
            if records.is_empty() {
                scrape_info!("No more products found on page {}, assuming last page.", page);
            } else {
                scrape_debug!("Page {} yielded {} products", page, records.len());
            }
            Msg::PageExtracted { page, records }
        }
        Err(err) => {
            scrape_error!("Failed to parse the webpage: {}. {}", url, err);
            Msg::PageFailed {
                page,
                error: PageError::new(PageErrorKind::Parse, err.to_string()),
            }
        }
    }
}
