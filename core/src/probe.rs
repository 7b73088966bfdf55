//! # HTTP Probes
//!
//! Two uses share one client: the optional port-80 precheck (a domain
//! answering plain HTTP is being served and cannot be dangling) and the
//! storage-endpoint content probe. Both want the same transport shape:
//! no redirects, no keep-alive, an explicit `Connection: close` and a
//! short operator-configured timeout.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONNECTION;
use reqwest::redirect::Policy;

/// HTTP seam for the pipeline; mocked in tests.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Whether `http://<domain>` answers at all. Any response, success
    /// or error status alike, counts as "being served"; only transport
    /// failures mean nothing is listening.
    async fn is_serving(&self, domain: &str) -> bool;

    /// Status code of a GET against `url`.
    async fn status(&self, url: &str) -> anyhow::Result<u16>;
}

pub struct WebProbe {
    client: reqwest::Client,
}

impl WebProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .pool_max_idle_per_host(0)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for WebProbe {
    async fn is_serving(&self, domain: &str) -> bool {
        self.client
            .get(format!("http://{domain}"))
            .header(CONNECTION, "close")
            .send()
            .await
            .is_ok()
    }

    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        let response = self
            .client
            .get(url)
            .header(CONNECTION, "close")
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        Ok(response.status().as_u16())
    }
}
