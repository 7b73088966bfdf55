//! # Classifier Stage
//!
//! Runs the per-address checks once resolution has produced a job:
//!
//! 1. Dead addresses are looked up in the compute partition; a hit is
//!    the highlighted takeover signal, a miss still reports a plain
//!    dangling record.
//! 2. Independently of liveness, the storage partition is consulted and
//!    a matched address gets an active probe against the constructed
//!    static-website endpoint. Anything but a 200 means nobody is
//!    serving content there.
//!
//! One address can therefore produce zero, one or two findings.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::debug;

use crate::liveness::LivenessProbe;
use crate::probe::HttpProbe;
use crate::ranges::{AddressRangeTable, ServiceClass};
use crate::report::Finding;
use crate::resolver::Resolve;

/// Static-website endpoint for a bucket named after the domain in the
/// matched region.
pub fn storage_website_uri(domain: &str, region: &str) -> String {
    format!("http://{domain}.s3-website-{region}.amazonaws.com")
}

pub struct Classifier {
    ranges: Arc<AddressRangeTable>,
    resolver: Arc<dyn Resolve>,
    liveness: Arc<dyn LivenessProbe>,
    http: Arc<dyn HttpProbe>,
}

impl Classifier {
    pub fn new(
        ranges: Arc<AddressRangeTable>,
        resolver: Arc<dyn Resolve>,
        liveness: Arc<dyn LivenessProbe>,
        http: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            ranges,
            resolver,
            liveness,
            http,
        }
    }

    pub async fn classify(&self, domain: &str, addr: IpAddr) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !self.liveness.is_alive(addr).await {
            let hostname = self.resolver.reverse(addr).await;
            let finding = match self.ranges.classify(&addr, ServiceClass::Compute) {
                Some(range) => Finding::DeadInComputeRange {
                    domain: domain.to_owned(),
                    hostname,
                    addr,
                    region: range.region.clone(),
                },
                None => Finding::Dead {
                    domain: domain.to_owned(),
                    hostname,
                    addr,
                },
            };
            findings.push(finding);
        }

        if let Some(range) = self.ranges.classify(&addr, ServiceClass::Storage) {
            let uri = storage_website_uri(domain, &range.region);
            match self.http.status(&uri).await {
                Ok(200) => {}
                Ok(status) => findings.push(Finding::StorageCandidate {
                    domain: domain.to_owned(),
                    uri,
                    status,
                }),
                // An unanswered probe is no evidence of a claimable bucket.
                Err(err) => debug!("storage probe {uri}: {err}"),
            }
        }

        findings
    }
}
