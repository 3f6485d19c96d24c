use crate::{PageError, ProductRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the run: request the first page, or finish at once for a zero-page run.
    Start,
    /// A page was fetched and parsed; `records` is in document order and may be empty.
    PageExtracted {
        page: u32,
        records: Vec<ProductRecord>,
    },
    /// A page could not be fetched or parsed.
    PageFailed { page: u32, error: PageError },
}
