//! Candidate acquisition: a positional argument wins over stdin; a tty
//! stdin with no argument means the user forgot to pipe anything in.

use std::io::{IsTerminal, Read};

use danglr_common::error::FatalError;

/// Raw input lines for the pipeline, or `None` when no input source is
/// available at all (caller prints usage and exits non-zero).
pub fn read_candidates(positional: Option<String>) -> Result<Option<Vec<String>>, FatalError> {
    if let Some(arg) = positional {
        return Ok(Some(split_lines(&arg)));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buf = String::new();
    stdin.read_to_string(&mut buf).map_err(FatalError::Input)?;
    if buf.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(split_lines(&buf)))
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_owned).collect()
}
