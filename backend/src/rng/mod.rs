//! Deterministic random number generation
//!
//! Every queue-length draw in the simulator goes through [`RngManager`].
//! The generator is created once per run from the configured seed and passed
//! by reference to whoever needs entropy, so two runs with the same seed draw
//! the same stream in the same order.

mod xorshift;

pub use xorshift::RngManager;
