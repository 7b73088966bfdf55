//! # Pipeline Orchestrator
//!
//! Wires the stages together: a single ingesting task feeds deduplicated
//! domains into a bounded channel, a pool of resolver workers turns them
//! into per-address jobs, a pool of classifier workers probes and
//! classifies, and a single reporter task serializes output lines.
//!
//! Backpressure comes from the bounded channels: a full queue blocks the
//! producer until the slower stage catches up. Shutdown is two-phase per
//! boundary: the upstream senders are dropped once the stage's workers
//! have all finished, the downstream pool drains what is left, then its
//! own senders drop in turn. No in-flight job is lost across a close.

use std::net::IpAddr;
use std::sync::Arc;

use danglr_common::config::Config;
use danglr_common::domain::{CandidateDomain, Deduper};
use danglr_common::net;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::liveness::LivenessProbe;
use crate::probe::HttpProbe;
use crate::ranges::AddressRangeTable;
use crate::report::{Finding, Reporter};
use crate::resolver::Resolve;

/// One resolved address ready for classification. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    pub domain: String,
    pub addr: IpAddr,
}

/// Counters for the completed run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Distinct domains enqueued after normalization and dedup.
    pub candidates: usize,
    /// Jobs that reached the classifier stage.
    pub jobs: usize,
    /// Findings written by the reporter.
    pub findings: usize,
}

pub struct Pipeline {
    config: Config,
    ranges: Arc<AddressRangeTable>,
    resolver: Arc<dyn Resolve>,
    liveness: Arc<dyn LivenessProbe>,
    http: Arc<dyn HttpProbe>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        ranges: Arc<AddressRangeTable>,
        resolver: Arc<dyn Resolve>,
        liveness: Arc<dyn LivenessProbe>,
        http: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            config,
            ranges,
            resolver,
            liveness,
            http,
        }
    }

    /// Drains `input` through the full pipeline and blocks until every
    /// enqueued domain has been fully processed and reported.
    pub async fn run<I>(&self, input: I, reporter: Reporter) -> RunStats
    where
        I: IntoIterator<Item = String>,
    {
        let capacity = self.config.concurrency.max(1);
        let (domain_tx, domain_rx) = mpsc::channel::<CandidateDomain>(capacity);
        let (job_tx, job_rx) = mpsc::channel::<ResolvedJob>(capacity);
        let (finding_tx, finding_rx) = mpsc::channel::<Finding>(capacity);

        let resolver_pool = self.spawn_resolver_pool(domain_rx, job_tx);
        let classifier_pool = self.spawn_classifier_pool(job_rx, finding_tx);
        let reporter_task = spawn_reporter(finding_rx, reporter);

        // Single ingesting task; the dedup set never crosses a thread.
        let mut dedup = Deduper::new();
        for line in input {
            let Some(domain) = CandidateDomain::parse(&line) else {
                continue;
            };
            if !dedup.accept(&domain) {
                debug!("skipping duplicate {domain}");
                continue;
            }
            if domain_tx.send(domain).await.is_err() {
                break;
            }
        }
        drop(domain_tx);

        // Close-then-drain, one stage boundary at a time.
        for worker in resolver_pool {
            let _ = worker.await;
        }
        let jobs = {
            let mut jobs = 0;
            for worker in classifier_pool {
                jobs += worker.await.unwrap_or(0);
            }
            jobs
        };
        let findings = reporter_task.await.unwrap_or(0);

        let stats = RunStats {
            candidates: dedup.len(),
            jobs,
            findings,
        };
        info!(
            "processed {} domains, {} addresses, {} findings",
            stats.candidates, stats.jobs, stats.findings
        );
        stats
    }

    fn spawn_resolver_pool(
        &self,
        domain_rx: mpsc::Receiver<CandidateDomain>,
        job_tx: mpsc::Sender<ResolvedJob>,
    ) -> Vec<tokio::task::JoinHandle<()>> {
        let domain_rx = Arc::new(Mutex::new(domain_rx));

        (0..self.config.concurrency.max(1))
            .map(|_| {
                let domain_rx = domain_rx.clone();
                let job_tx = job_tx.clone();
                let resolver = self.resolver.clone();
                let http = self.http.clone();
                let precheck = self.config.precheck;

                tokio::spawn(async move {
                    loop {
                        let domain = { domain_rx.lock().await.recv().await };
                        let Some(domain) = domain else { break };

                        // Something already answers on port 80: the record
                        // is not dangling, skip it before spending a lookup.
                        if precheck && http.is_serving(domain.as_str()).await {
                            debug!("{domain} is being served, skipping");
                            continue;
                        }

                        let addrs = match resolver.lookup(domain.as_str()).await {
                            Ok(addrs) => addrs,
                            Err(err) => {
                                debug!("dropping {domain}: {err}");
                                continue;
                            }
                        };

                        for addr in addrs {
                            if !net::is_probeable(&addr) {
                                debug!("{domain} -> {addr} is not probeable, dropped");
                                continue;
                            }
                            let job = ResolvedJob {
                                domain: domain.as_str().to_owned(),
                                addr,
                            };
                            if job_tx.send(job).await.is_err() {
                                return;
                            }
                        }
                    }
                })
            })
            .collect()
    }

    fn spawn_classifier_pool(
        &self,
        job_rx: mpsc::Receiver<ResolvedJob>,
        finding_tx: mpsc::Sender<Finding>,
    ) -> Vec<tokio::task::JoinHandle<usize>> {
        let job_rx = Arc::new(Mutex::new(job_rx));
        let classifier = Arc::new(Classifier::new(
            self.ranges.clone(),
            self.resolver.clone(),
            self.liveness.clone(),
            self.http.clone(),
        ));

        (0..self.config.concurrency.max(1))
            .map(|_| {
                let job_rx = job_rx.clone();
                let finding_tx = finding_tx.clone();
                let classifier = classifier.clone();

                tokio::spawn(async move {
                    let mut processed: usize = 0;
                    loop {
                        let job = { job_rx.lock().await.recv().await };
                        let Some(job) = job else { break processed };
                        processed += 1;

                        for finding in classifier.classify(&job.domain, job.addr).await {
                            if finding_tx.send(finding).await.is_err() {
                                return processed;
                            }
                        }
                    }
                })
            })
            .collect()
    }
}

fn spawn_reporter(
    mut finding_rx: mpsc::Receiver<Finding>,
    mut reporter: Reporter,
) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move {
        let mut written = 0;
        while let Some(finding) = finding_rx.recv().await {
            reporter.report(&finding);
            written += 1;
        }
        written
    })
}
