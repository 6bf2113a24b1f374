//! Per-car queue lengths for one trial

use serde::Serialize;
use std::fmt;

/// Queue length of every car, car 0 first.
///
/// Lengths are unsigned, so a vector can never hold a negative queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueueVector(Vec<u64>);

impl QueueVector {
    pub fn new(lengths: Vec<u64>) -> Self {
        Self(lengths)
    }

    /// Number of cars covered by this vector
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Longest queue, or 0 for an empty vector
    pub fn longest(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Total passengers waiting across all cars
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &q| acc.saturating_add(q))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for QueueVector {
    fn from(lengths: Vec<u64>) -> Self {
        Self(lengths)
    }
}

/// Semicolon-joined lengths, e.g. `5;3;8;2;6;4`
impl fmt::Display for QueueVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for q in iter {
                write!(f, ";{}", q)?;
            }
        }
        Ok(())
    }
}
