//! # danglr core
//!
//! The concurrent classification pipeline behind the `danglr` binary:
//! candidate intake → DNS resolution → liveness probing → cloud-range
//! classification → storage-bucket probing → reporting.
//!
//! **Architectural note:**
//! Every external touchpoint (DNS, ICMP, HTTP) sits behind a trait in its
//! own module. The [`pipeline`] orchestrator depends only on those
//! abstractions, so the whole pipeline runs against mocks in tests and
//! against the real network in the binary.

pub mod classifier;
pub mod liveness;
pub mod pipeline;
pub mod probe;
pub mod ranges;
pub mod report;
pub mod resolver;
