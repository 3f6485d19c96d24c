//! Catalog core: data model, run configuration and the pure pagination state machine.
mod config;
mod effect;
mod msg;
mod record;
mod state;
mod update;

pub use config::{page_url, ConfigError, ScrapeConfig, SelectorSet, DEFAULT_MAX_PAGES};
pub use effect::Effect;
pub use msg::Msg;
pub use record::{ProductRecord, ScrapeResult, NO_PRICE, NO_TITLE};
pub use state::{PageError, PageErrorKind, Paginator, RunState};
pub use update::update;
