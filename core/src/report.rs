//! # Findings & Reporter
//!
//! One line per finding, comma-separated, matching the classic output
//! format: `domain,hostname-or-blank,ip` for dangling records and
//! `domain,uri` for storage-website candidates. Cloud-range matches are
//! rendered green; plain dangling records stay unstyled so the high
//! signal findings stand out in a long run.

use std::io::Write;
use std::net::IpAddr;

use colored::Colorize;
use tracing::error;

/// Outcome of classifying one resolved address. Transient: it exists to
/// drive a single reporter write and is dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Unreachable address outside every known provider range.
    Dead {
        domain: String,
        hostname: Option<String>,
        addr: IpAddr,
    },
    /// Unreachable address inside the provider's compute space. The
    /// primary signal this tool exists to surface.
    DeadInComputeRange {
        domain: String,
        hostname: Option<String>,
        addr: IpAddr,
        region: String,
    },
    /// Address in the storage partition whose constructed static-website
    /// endpoint answered with a non-200 status.
    StorageCandidate { domain: String, uri: String, status: u16 },
}

impl Finding {
    /// The unstyled, comma-separated output fields.
    pub fn csv(&self) -> String {
        match self {
            Finding::Dead { domain, hostname, addr }
            | Finding::DeadInComputeRange { domain, hostname, addr, .. } => {
                format!("{},{},{}", domain, hostname.as_deref().unwrap_or(""), addr)
            }
            Finding::StorageCandidate { domain, uri, .. } => format!("{domain},{uri}"),
        }
    }

    /// Cloud-range matches are the findings worth color.
    pub fn highlighted(&self) -> bool {
        !matches!(self, Finding::Dead { .. })
    }
}

/// Owns the output sink. Exactly one reporter runs per pipeline, so
/// every line lands atomically without interleaving.
pub struct Reporter {
    out: Box<dyn Write + Send>,
}

impl Reporter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn report(&mut self, finding: &Finding) {
        let line = finding.csv();
        let rendered = if finding.highlighted() {
            line.green().to_string()
        } else {
            line
        };

        if let Err(err) = writeln!(self.out, "{rendered}") {
            error!("writing finding: {err}");
        }
    }
}
