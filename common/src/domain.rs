//! # Candidate Domain Intake
//!
//! Normalization and run-lifetime deduplication of the domain names fed
//! into the pipeline. Input may repeat the same name thousands of times
//! (scope files are rarely clean); the invariant downstream stages rely
//! on is that each distinct normalized name is enqueued at most once.

use std::collections::HashSet;
use std::fmt;

/// A trimmed, lower-cased domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateDomain(String);

impl CandidateDomain {
    /// Normalizes a raw input line. Returns `None` for lines that are
    /// empty after trimming; an empty name can never resolve.
    pub fn parse(line: &str) -> Option<Self> {
        let name = line.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tracks every domain emitted so far in the run.
///
/// Mutated only by the single ingesting task, so it carries no locking.
#[derive(Debug, Default)]
pub struct Deduper {
    seen: HashSet<String>,
}

impl Deduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a normalized name is offered and
    /// `false` on every repeat.
    pub fn accept(&mut self, domain: &CandidateDomain) -> bool {
        self.seen.insert(domain.as_str().to_owned())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
