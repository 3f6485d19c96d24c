use std::fmt;

use crate::{page_url, ProductRecord, ScrapeConfig, ScrapeResult};

/// Why a page could not be turned into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageErrorKind {
    /// DNS, connect, timeout or body-limit failure.
    Transport,
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// The body could not be decoded into a queryable document.
    Parse,
}

impl fmt::Display for PageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageErrorKind::Transport => write!(f, "transport error"),
            PageErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            PageErrorKind::Parse => write!(f, "parse error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
    pub kind: PageErrorKind,
    pub message: String,
}

impl PageError {
    pub fn new(kind: PageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Lifecycle of a pagination run. Every state except `Running` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    /// Fetching or parsing `page` failed; later pages were not requested.
    StoppedOnError { page: u32, error: PageError },
    /// `page` matched no items, taken as the end of the catalog.
    StoppedOnEmptyPage { page: u32 },
    /// Every page up to the configured maximum was processed.
    StoppedOnMaxPages { pages: u32 },
    /// Nothing to do: the run was configured with zero pages.
    Completed,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunState::StoppedOnError { .. })
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::StoppedOnError { page, error } => {
                write!(f, "stopped on page {page} after {error}")
            }
            RunState::StoppedOnEmptyPage { page } => {
                write!(f, "stopped on page {page}: no more products")
            }
            RunState::StoppedOnMaxPages { pages } => {
                write!(f, "stopped after reaching the page limit ({pages})")
            }
            RunState::Completed => write!(f, "completed with no pages to fetch"),
        }
    }
}

/// Pagination state owned by the crawl loop: where it is, why it stopped
/// and the records collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    base_url: String,
    max_pages: u32,
    /// Last page requested; 0 until the run starts.
    page: u32,
    state: RunState,
    result: ScrapeResult,
}

impl Paginator {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            max_pages: config.max_pages,
            page: 0,
            state: RunState::Running,
            result: ScrapeResult::new(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn result(&self) -> &ScrapeResult {
        &self.result
    }

    /// Hands the collected records over, consuming the run state.
    pub fn into_parts(self) -> (RunState, ScrapeResult) {
        (self.state, self.result)
    }

    pub(crate) fn has_started(&self) -> bool {
        self.page > 0 || !self.state.is_running()
    }

    pub(crate) fn is_awaiting(&self, page: u32) -> bool {
        self.state.is_running() && self.page == page && page > 0
    }

    /// Advances to the next page and returns its URL.
    pub(crate) fn advance(&mut self) -> (u32, String) {
        self.page += 1;
        (self.page, page_url(&self.base_url, self.page))
    }

    pub(crate) fn append(&mut self, records: Vec<ProductRecord>) {
        self.result.extend(records);
    }

    pub(crate) fn stop(&mut self, state: RunState) {
        self.state = state;
    }
}
