//! Line-oriented token ingestion and the three-integer report printed after a stream
//! is exhausted.

use std::fmt;
use std::io::{self, BufRead};

use crate::estimator::KmvEstimator;
use crate::hash::SeededHasher;

/// Summary of an estimator after ingesting a stream.
///
/// Displayed as `"<estimate> <elements_added> <retained>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub estimate: u64,
    pub elements_added: u64,
    pub retained: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.estimate, self.elements_added, self.retained)
    }
}

/// Insert every whitespace-delimited token read from `reader` into `estimator`.
///
/// Lines are treated as raw bytes and split on ASCII whitespace. Returns the number
/// of tokens inserted. On a read error, tokens inserted before the failure stay
/// reflected in `estimator`.
pub fn ingest<H, R>(estimator: &mut KmvEstimator<H>, mut reader: R) -> io::Result<u64>
where
    H: SeededHasher,
    R: BufRead,
{
    let mut line = Vec::new();
    let mut tokens = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(tokens);
        }
        for token in line
            .split(|b| b.is_ascii_whitespace())
            .filter(|t| !t.is_empty())
        {
            estimator.insert_token(token);
            tokens += 1;
        }
    }
}
