//! # Provider Address Range Table
//!
//! Loads the cloud provider's published ip-ranges document once at
//! startup and answers containment queries against it for the rest of
//! the run. The table is immutable after loading and is shared read-only
//! by every worker, so no locking is involved.
//!
//! Lookup is a linear scan returning the **first** containing prefix in
//! document order. The provider does not guarantee non-overlapping
//! prefixes, so this is not equivalent to longest-prefix matching; it is
//! kept deliberately because changing it could shift which region a
//! finding is attributed to. Known limitation.

use std::net::IpAddr;

use anyhow::Context;
use ipnetwork::IpNetwork;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const PROVIDER_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

const COMPUTE_SERVICE: &str = "EC2";
const STORAGE_SERVICE: &str = "S3";

/// Which partition of the table a lookup runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceClass {
    Compute,
    Storage,
}

/// One published prefix, parsed and ready for containment tests.
#[derive(Debug, Clone)]
pub struct AddressRange {
    pub cidr: IpNetwork,
    pub region: String,
    pub network_border_group: String,
}

/// Wire model of the provider document.
#[derive(Debug, Deserialize)]
struct RangeDocument {
    #[serde(rename = "syncToken")]
    sync_token: String,
    #[serde(rename = "createDate")]
    _create_date: Option<String>,
    prefixes: Vec<RangePrefix>,
}

#[derive(Debug, Deserialize)]
struct RangePrefix {
    ip_prefix: String,
    region: String,
    service: String,
    network_border_group: String,
}

/// Failure to obtain a usable range table. Always fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    #[error("fetching {PROVIDER_RANGES_URL}: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("decoding provider range document: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Default)]
pub struct AddressRangeTable {
    compute: Vec<AddressRange>,
    storage: Vec<AddressRange>,
}

impl AddressRangeTable {
    /// Fetches and indexes the provider document over HTTPS.
    ///
    /// Any network or decode error here is propagated; there is nothing
    /// useful to classify against without the table.
    pub async fn load(url: &str) -> Result<Self, RangeError> {
        let response = reqwest::get(url).await.map_err(RangeError::Fetch)?;
        let document: RangeDocument = response.json().await.map_err(RangeError::Decode)?;

        let table = Self::from_document(document);
        info!(
            "loaded {} compute and {} storage prefixes",
            table.compute.len(),
            table.storage.len()
        );
        Ok(table)
    }

    fn from_document(document: RangeDocument) -> Self {
        debug!(sync_token = %document.sync_token, "indexing provider prefixes");

        let mut table = Self::default();
        for prefix in document.prefixes {
            let partition = match prefix.service.as_str() {
                COMPUTE_SERVICE => &mut table.compute,
                STORAGE_SERVICE => &mut table.storage,
                _ => continue,
            };

            // A malformed entry only loses itself, never the run.
            match prefix.ip_prefix.parse::<IpNetwork>() {
                Ok(cidr) => partition.push(AddressRange {
                    cidr,
                    region: prefix.region,
                    network_border_group: prefix.network_border_group,
                }),
                Err(err) => {
                    warn!("skipping malformed prefix {:?}: {}", prefix.ip_prefix, err);
                }
            }
        }
        table
    }

    /// Builds a table directly from `(cidr, region)` pairs. Malformed
    /// CIDR strings fail loudly here since the caller wrote them.
    pub fn from_ranges<'a, I, J>(compute: I, storage: J) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
        J: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parse = |(cidr, region): (&str, &str)| -> anyhow::Result<AddressRange> {
            Ok(AddressRange {
                cidr: cidr.parse().with_context(|| format!("parsing {cidr}"))?,
                region: region.to_owned(),
                network_border_group: region.to_owned(),
            })
        };

        Ok(Self {
            compute: compute.into_iter().map(parse).collect::<anyhow::Result<_>>()?,
            storage: storage.into_iter().map(parse).collect::<anyhow::Result<_>>()?,
        })
    }

    /// First prefix in document order containing `ip`, if any.
    pub fn classify(&self, ip: &IpAddr, service: ServiceClass) -> Option<&AddressRange> {
        let partition = match service {
            ServiceClass::Compute => &self.compute,
            ServiceClass::Storage => &self.storage,
        };
        partition.iter().find(|range| range.cidr.contains(*ip))
    }

    pub fn len(&self) -> usize {
        self.compute.len() + self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compute.is_empty() && self.storage.is_empty()
    }
}
