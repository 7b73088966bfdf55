//! Address predicates shared by the pipeline stages.

use std::net::IpAddr;

/// Whether an address is worth probing at all.
///
/// Private, loopback, link-local and unspecified addresses are dropped
/// before the liveness stage: a record pointing at `10.0.0.5` or
/// `0.0.0.0` is a placeholder, not a takeover candidate, and reporting
/// it as dangling would be a false positive.
pub fn is_probeable(ip: &IpAddr) -> bool {
    if ip.is_unspecified() || ip.is_loopback() {
        return false;
    }
    match ip {
        IpAddr::V4(v4) => !v4.is_private() && !v4.is_link_local(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) != 0xfe80,
    }
}
