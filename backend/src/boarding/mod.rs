//! Departure timing under the two boarding policies
//!
//! - **Unbalanced**: the train leaves once the longest queue has boarded.
//! - **Balanced**: passengers are spread evenly over all cars first, so the
//!   train leaves once the per-car share (rounded up) has boarded.
//!
//! # Critical Invariants
//!
//! - `time_with_balancing(q, q.len(), b) <= time_without_balancing(q, b)`
//! - Uniform queues give identical times under both policies
//! - `Improvement::pct` is in [0, 100] and is 0 when nothing was waiting

use crate::models::QueueVector;
use serde::Serialize;

/// Departure time when every car boards its own queue.
///
/// `max(queue) * board_secs`
///
/// # Example
/// ```
/// use train_boarding_sim_core::boarding::time_without_balancing;
/// use train_boarding_sim_core::QueueVector;
///
/// let queue = QueueVector::new(vec![5, 3, 8, 2, 6, 4]);
/// assert_eq!(time_without_balancing(&queue, 10), 80);
/// ```
pub fn time_without_balancing(queue: &QueueVector, board_secs: u64) -> u64 {
    queue.longest().saturating_mul(board_secs)
}

/// Departure time when the total load is redistributed across `cars`.
///
/// `ceil(sum(queue) / cars) * board_secs`. A leftover passenger still costs
/// a full boarding slot on some car, hence the ceiling. Returns 0 for
/// `cars == 0`; configs with no cars are rejected before any trial runs.
///
/// # Example
/// ```
/// use train_boarding_sim_core::boarding::time_with_balancing;
/// use train_boarding_sim_core::QueueVector;
///
/// let queue = QueueVector::new(vec![5, 3, 8, 2, 6, 4]);
/// assert_eq!(time_with_balancing(&queue, 6, 10), 50);
/// ```
pub fn time_with_balancing(queue: &QueueVector, cars: u32, board_secs: u64) -> u64 {
    if cars == 0 {
        return 0;
    }
    queue
        .total()
        .div_ceil(u64::from(cars))
        .saturating_mul(board_secs)
}

/// Time saved by balancing, absolute and relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    /// `time_without - time_with`
    pub secs: u64,

    /// `secs / time_without * 100`, rounded to 2 decimal places, ties to even
    pub pct: f64,
}

impl Improvement {
    /// Compare the two departure times.
    ///
    /// A zero `time_without` yields a 0% improvement rather than a division
    /// by zero. The percentage is computed exactly from the integer times,
    /// so a tie such as 1/32 = 3.125% rounds to 3.12.
    pub fn between(time_without: u64, time_with: u64) -> Self {
        let secs = time_without.saturating_sub(time_with);
        let pct = if time_without == 0 {
            0.0
        } else {
            hundredths_of_percent(secs, time_without) as f64 / 100.0
        };
        Self { secs, pct }
    }
}

/// `part / whole` in hundredths of a percent, rounded half to even.
///
/// `whole` must be non-zero.
fn hundredths_of_percent(part: u64, whole: u64) -> u128 {
    let numerator = u128::from(part) * 10_000;
    let denominator = u128::from(whole);
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
