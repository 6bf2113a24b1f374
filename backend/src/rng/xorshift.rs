//! xorshift64* random number generator
//!
//! A fast 64-bit PRNG with good statistical quality for simulation work.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws. The output CSV of a whole run is a
//! pure function of (config, seed) because of this.

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use train_boarding_sim_core::RngManager;
///
/// let mut rng = RngManager::new(42);
/// let u = rng.next_f64();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Debug, Clone)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1, since xorshift gets stuck at zero.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value, advancing the state.
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits scaled by 2^-53
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample from the standard normal distribution (Box-Muller transform).
    ///
    /// Consumes exactly two draws. `u1` is taken from (0, 1] so the
    /// logarithm is always finite.
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Sample from a normal distribution with the given mean and standard deviation.
    ///
    /// # Example
    /// ```
    /// use train_boarding_sim_core::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let x = rng.gaussian(40.0, 0.0);
    /// assert_eq!(x, 40.0);
    /// ```
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }
}
