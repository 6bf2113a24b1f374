//! Queue generation for platform arrivals.
//!
//! Each car's queue length is drawn independently from a normal distribution,
//! rounded to the nearest whole passenger (ties to even) and floored at zero. There is no
//! upper bound, so a large standard deviation can produce long tails.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same queues
//! 2. **Explicit entropy**: The caller owns the [`RngManager`] and passes it in
//! 3. **Fixed draw order**: Cars are sampled 0..n, two draws per car
//!
//! # Example
//!
//! ```
//! use train_boarding_sim_core::arrivals::generate_queue_lengths;
//! use train_boarding_sim_core::rng::RngManager;
//!
//! let mut rng = RngManager::new(42);
//! let queue = generate_queue_lengths(6, 40.0, 10.0, &mut rng);
//! assert_eq!(queue.len(), 6);
//! ```

use crate::models::QueueVector;
use crate::rng::RngManager;

/// Sample a queue length for every car.
///
/// # Arguments
///
/// * `cars` - Number of cars in the train
/// * `mean` - Mean queue length (may be negative; results are clamped)
/// * `stddev` - Standard deviation of the queue length
/// * `rng` - Shared generator, advanced by two draws per car
pub fn generate_queue_lengths(
    cars: u32,
    mean: f64,
    stddev: f64,
    rng: &mut RngManager,
) -> QueueVector {
    (0..cars)
        .map(|_| sample_queue_length(mean, stddev, rng))
        .collect::<Vec<_>>()
        .into()
}

/// Draw one queue length: round half to even, clamp at 0.
fn sample_queue_length(mean: f64, stddev: f64, rng: &mut RngManager) -> u64 {
    let raw = rng.gaussian(mean, stddev).round_ties_even();
    // `as` saturates: NaN and negatives become 0, overflow becomes u64::MAX
    raw.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_matches_car_count() {
        let mut rng = RngManager::new(42);
        for cars in [1, 2, 6, 12] {
            let queue = generate_queue_lengths(cars, 18.0, 6.0, &mut rng);
            assert_eq!(queue.len(), cars as usize);
        }
    }

    #[test]
    fn test_zero_cars_yields_empty_vector() {
        let mut rng = RngManager::new(42);
        let before = rng.get_state();
        let queue = generate_queue_lengths(0, 18.0, 6.0, &mut rng);
        assert!(queue.is_empty());
        assert_eq!(rng.get_state(), before, "no draws for zero cars");
    }

    #[test]
    fn test_zero_stddev_returns_rounded_mean() {
        let mut rng = RngManager::new(42);
        let queue = generate_queue_lengths(4, 17.6, 0.0, &mut rng);
        assert_eq!(queue.as_slice(), &[18, 18, 18, 18]);
    }

    #[test]
    fn test_half_rounds_to_even() {
        let mut rng = RngManager::new(42);
        assert_eq!(generate_queue_lengths(2, 2.5, 0.0, &mut rng).as_slice(), &[2, 2]);
        assert_eq!(generate_queue_lengths(2, 3.5, 0.0, &mut rng).as_slice(), &[4, 4]);
        assert_eq!(generate_queue_lengths(1, 2.6, 0.0, &mut rng).as_slice(), &[3]);
    }

    #[test]
    fn test_negative_mean_clamps_to_zero() {
        let mut rng = RngManager::new(42);
        let queue = generate_queue_lengths(6, -100.0, 1.0, &mut rng);
        assert_eq!(queue.as_slice(), &[0; 6]);
    }

    #[test]
    fn test_generation_deterministic() {
        let mut rng1 = RngManager::new(7);
        let mut rng2 = RngManager::new(7);

        for _ in 0..50 {
            assert_eq!(
                generate_queue_lengths(6, 40.0, 10.0, &mut rng1),
                generate_queue_lengths(6, 40.0, 10.0, &mut rng2)
            );
        }
    }

    #[test]
    fn test_sample_mean_near_configured_mean() {
        let mut rng = RngManager::new(2024);
        let trials = 2_000;
        let total: u64 = (0..trials)
            .map(|_| generate_queue_lengths(6, 40.0, 10.0, &mut rng).total())
            .sum();
        let mean = total as f64 / (trials * 6) as f64;
        assert!((mean - 40.0).abs() < 0.5, "sample mean {} too far from 40", mean);
    }
}
