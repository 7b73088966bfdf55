use clap::Parser;
use danglr_common::config::Config;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "danglr")]
#[command(about = "Finds dangling DNS records pointing into cloud provider address space.")]
pub struct CommandLine {
    /// Concurrency level (workers per pipeline stage)
    #[arg(short = 'c', long = "concurrency", default_value_t = 20)]
    pub concurrency: usize,

    /// HTTP timeout in milliseconds
    #[arg(short = 't', long = "timeout", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Probe http://<domain> first and skip domains that answer
    #[arg(short = 'p', long = "precheck")]
    pub precheck: bool,

    /// Domains to check, whitespace separated. Reads stdin when omitted.
    pub domains: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            concurrency: self.concurrency.max(1),
            http_timeout: Duration::from_millis(self.timeout_ms),
            precheck: self.precheck,
        }
    }
}
