//! Catalog engine: page retrieval, product extraction, export and the crawl driver.
mod crawl;
mod decode;
mod extract;
mod fetch;
mod persist;
mod sink;
mod types;

pub use crawl::{run_crawl, CrawlReport};
pub use decode::{decode_html, DecodedHtml};
pub use extract::{CssProductExtractor, ExtractError, Extractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use sink::{render_json, JsonFileSink};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
