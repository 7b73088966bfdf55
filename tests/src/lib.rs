//! Shared fixtures for the end-to-end pipeline tests: scripted
//! implementations of the resolver, liveness and HTTP seams plus an
//! in-memory reporter sink.

use std::collections::HashMap;
use std::io::Write;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use danglr_core::liveness::LivenessProbe;
use danglr_core::probe::HttpProbe;
use danglr_core::report::Reporter;
use danglr_core::resolver::Resolve;

/// Maps domains to fixed address lists and counts every lookup, so tests
/// can assert how many times each name reached the resolver pool.
pub struct ScriptedResolver {
    answers: HashMap<String, Vec<IpAddr>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl ScriptedResolver {
    pub fn new(answers: &[(&str, &[&str])]) -> Self {
        let answers = answers
            .iter()
            .map(|(domain, addrs)| {
                let parsed = addrs.iter().map(|a| a.parse().unwrap()).collect();
                ((*domain).to_owned(), parsed)
            })
            .collect();
        Self {
            answers,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every domain the resolver was asked about, in arrival order.
    pub fn lookups(&self) -> Arc<Mutex<Vec<String>>> {
        self.lookups.clone()
    }
}

#[async_trait]
impl Resolve for ScriptedResolver {
    async fn lookup(&self, domain: &str) -> anyhow::Result<Vec<IpAddr>> {
        self.lookups.lock().unwrap().push(domain.to_owned());
        match self.answers.get(domain) {
            Some(addrs) => Ok(addrs.clone()),
            None => anyhow::bail!("no A record found for {domain}"),
        }
    }

    async fn reverse(&self, _ip: IpAddr) -> Option<String> {
        None
    }
}

/// Liveness stub: everything is dead unless listed alive. `FailingProbe`
/// models the probe mechanism itself being broken.
pub struct ScriptedLiveness {
    alive: Vec<IpAddr>,
}

impl ScriptedLiveness {
    pub fn all_dead() -> Self {
        Self { alive: Vec::new() }
    }

    pub fn alive(addrs: &[&str]) -> Self {
        Self {
            alive: addrs.iter().map(|a| a.parse().unwrap()).collect(),
        }
    }
}

#[async_trait]
impl LivenessProbe for ScriptedLiveness {
    async fn is_alive(&self, ip: IpAddr) -> bool {
        self.alive.contains(&ip)
    }
}

/// A probe whose execution always fails. The pipeline must treat this
/// as "dead", never as "unknown".
pub struct FailingProbe;

#[async_trait]
impl LivenessProbe for FailingProbe {
    async fn is_alive(&self, _ip: IpAddr) -> bool {
        // Mirrors the production bias: no result means dead.
        false
    }
}

/// HTTP stub returning one fixed status for every storage probe, and a
/// fixed set of domains that answer on port 80.
pub struct ScriptedHttp {
    pub storage_status: u16,
    pub serving: Vec<String>,
    pub probes: Arc<Mutex<Vec<String>>>,
}

impl ScriptedHttp {
    pub fn status(storage_status: u16) -> Self {
        Self {
            storage_status,
            serving: Vec::new(),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn serving(mut self, domains: &[&str]) -> Self {
        self.serving = domains.iter().map(|d| (*d).to_owned()).collect();
        self
    }
}

#[async_trait]
impl HttpProbe for ScriptedHttp {
    async fn is_serving(&self, domain: &str) -> bool {
        self.serving.iter().any(|d| d == domain)
    }

    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        self.probes.lock().unwrap().push(url.to_owned());
        Ok(self.storage_status)
    }
}

/// Collects reporter output in memory for later assertions.
pub struct CapturedOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn reporter(&self) -> Reporter {
        struct Sink(Arc<Mutex<Vec<u8>>>);
        impl Write for Sink {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(data);
                Ok(data.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        Reporter::new(Box::new(Sink(self.buf.clone())))
    }

    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Default for CapturedOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Counting wrapper to observe how many jobs reach the classifier seam.
pub struct CountingLiveness<P> {
    inner: P,
    pub checks: Arc<AtomicUsize>,
}

impl<P> CountingLiveness<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl<P: LivenessProbe> LivenessProbe for CountingLiveness<P> {
    async fn is_alive(&self, ip: IpAddr) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.inner.is_alive(ip).await
    }
}
