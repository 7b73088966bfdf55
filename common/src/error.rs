use thiserror::Error;

/// Errors that abort the whole run.
///
/// Everything else in the pipeline is per-domain and recoverable: the
/// offending domain is logged and dropped while the run continues.
#[derive(Debug, Error)]
pub enum FatalError {
    /// The provider range document could not be fetched or decoded.
    /// Without it there is nothing to classify against.
    #[error("failed to load provider address ranges: {0}")]
    RangeLoad(#[source] anyhow::Error),

    /// The input source failed mid-read. Silent partial runs would be
    /// worse than failing loudly.
    #[error("failed to read candidate domains: {0}")]
    Input(#[source] std::io::Error),
}
