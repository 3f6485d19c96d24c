#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request one catalog page.
    FetchPage { page: u32, url: String },
    /// Wait out the politeness delay once.
    Pause,
    /// The run reached a terminal state; hand the results to the sink.
    Finish,
}
