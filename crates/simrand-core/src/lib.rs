//! # simrand-core
//!
//! **Deterministic pseudo-random generation and bit-stream transformation
//! for statistical simulation.**
//!
//! The engine produces long-period, well-distributed 64-bit streams from a
//! seed or from the OS entropy source, then derives richer objects from
//! them: biased-probability bit vectors with any dyadic probability,
//! unbiased bounded integers, binomial counts, debiased bit streams, and
//! autocorrelation diagnostics. It is built for Monte Carlo statistics, not
//! cryptography — none of the output is secure against an adversary.
//!
//! ## Quick Start
//!
//! ```
//! use simrand_core::GeneratorState;
//!
//! // Nonzero seeds are deterministic; seed 0 taps the OS entropy source.
//! let mut rng = GeneratorState::new(42).unwrap();
//!
//! let word = rng.next();                  // one 64-bit draw
//! let roll = rng.bounded(1, 6);           // unbiased inclusive range
//! let coins = rng.bias(32, 8);            // 64 bits, each set with p = 32/256
//! let heads = rng.binomial(1000, 1, 1);   // successes in 1000 fair trials
//!
//! assert!((1..=6).contains(&roll));
//! assert!(heads <= 1000);
//! let _ = (word, coins);
//! ```
//!
//! ## Architecture
//!
//! Seed/entropy → generator state → raw words → {bias, bounded} →
//! {debias, binomial, autocorrelation} for derivation and validation.
//!
//! Every stream is an explicit, caller-owned value ([`GeneratorState`] or
//! the four-lane [`VectorState`]) advanced through `&mut self`. Nothing is
//! global and nothing is shared: run parallel simulations by giving each
//! thread its own state, seeded apart.
//!
//! The scalar generator also implements [`rand::RngCore`], so it plugs into
//! the wider `rand` ecosystem of distributions and adapters.

pub mod bitstream;
pub mod error;
pub mod rng;
pub mod seed;
pub mod vector;

pub use bitstream::{
    AutocorrProfile, BitBuffer, LagCorrelation, StreamResult, autocorr, autocorr_profile, debias,
};
pub use error::Error;
pub use rng::GeneratorState;
pub use seed::mix;
pub use vector::{LANES, VectorState};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
