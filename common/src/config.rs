use std::time::Duration;

/// Run configuration, built once by the cli and passed by reference
/// into the pipeline. There is no global state; every stage reads the
/// same immutable value.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of workers per pipeline stage.
    pub concurrency: usize,

    /// Timeout applied to every outbound HTTP request (the port-80
    /// precheck and the storage-endpoint probe).
    pub http_timeout: Duration,

    /// Performs a plain HTTP GET against each domain before resolving it.
    ///
    /// A domain that answers on port 80 is currently being served and
    /// cannot be dangling, so it is skipped entirely.
    pub precheck: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: 20,
            http_timeout: Duration::from_millis(5000),
            precheck: false,
        }
    }
}
