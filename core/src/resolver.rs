//! # Resolver Stage
//!
//! Turns candidate domains into address records. The [`Resolve`] trait is
//! the seam the pipeline depends on; [`DnsResolver`] is the production
//! implementation, pinned to a fixed public upstream so results do not
//! depend on whatever resolver the scanning host happens to trust.
//!
//! A failed lookup only ever costs that one domain. Bulk runs over
//! thousands of names are the primary use case and a single NXDOMAIN or
//! timeout must never abort the run.

use std::net::IpAddr;

use anyhow::Context;
use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;

/// Address lookup seam between the pipeline and the DNS transport.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Every A record for `domain`, in the order the upstream supplied
    /// them. No record at all is an error, not an empty list.
    async fn lookup(&self, domain: &str) -> anyhow::Result<Vec<IpAddr>>;

    /// Best-effort PTR lookup used to enrich report lines. Failures
    /// collapse to `None`; a missing hostname is never an error.
    async fn reverse(&self, ip: IpAddr) -> Option<String>;
}

/// Production resolver over Google's public DNS (8.8.8.8).
pub struct DnsResolver {
    inner: TokioResolver,
}

impl DnsResolver {
    pub fn new() -> Self {
        let builder = TokioResolver::builder_with_config(
            ResolverConfig::google(),
            TokioConnectionProvider::default(),
        );
        Self {
            inner: builder.build(),
        }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn lookup(&self, domain: &str) -> anyhow::Result<Vec<IpAddr>> {
        let records = self
            .inner
            .ipv4_lookup(domain)
            .await
            .with_context(|| format!("resolving {domain}"))?;

        Ok(records.iter().map(|a| IpAddr::V4(a.0)).collect())
    }

    async fn reverse(&self, ip: IpAddr) -> Option<String> {
        let lookup = self.inner.reverse_lookup(ip).await.ok()?;
        lookup
            .iter()
            .next()
            .map(|ptr| ptr.0.to_string().trim_end_matches('.').to_owned())
    }
}
