//! Shared models and configuration for the danglr workspace.
//!
//! Nothing in this crate performs I/O; it holds the run configuration,
//! the candidate-domain intake model and small address predicates that
//! every stage agrees on.

pub mod config;
pub mod domain;
pub mod error;
pub mod net;
