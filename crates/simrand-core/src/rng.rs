//! 64-bit permuted congruential generator and the samplers built on it.
//!
//! The generator is O'Neill's insecure 64-bit RXS-M-XS PCG: a linear
//! congruential state advance whose output is a permuted version of the
//! *pre-update* state. One [`GeneratorState::next`] call is the unit of
//! randomness for every higher-level sampler in this crate.
//!
//! All state is caller-owned and advanced through `&mut self`; parallel
//! throughput comes from independent instances, never shared state.

use crate::error::Error;
use crate::seed::{entropy_word, mix};

/// Multiplier of the 64-bit congruential state advance.
const LCG_MULT: u64 = 0x5851_F42D_4C95_7F2D;

/// Avalanche multiplier of the RXS-M-XS output permutation.
const RXS_MULT: u64 = 0xAEF1_7502_108E_F2D9;

/// Exclusively owned state of one 64-bit generator stream.
///
/// `increment` doubles as the stream selector and is kept odd at all times;
/// an even increment would collapse the congruential step below full period.
/// Instances are cheap to clone and never shared between logical streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorState {
    pub(crate) current: u64,
    pub(crate) increment: u64,
}

impl GeneratorState {
    /// Initialize a generator stream.
    ///
    /// A nonzero `seed` yields a deterministic, reproducible stream:
    /// `current = mix(seed)` and `increment = mix(mix(seed)) | 1`, so that
    /// nearby seeds land on well-separated streams. Seed 0 requests
    /// nondeterministic initialization from the OS entropy source instead;
    /// each word is drawn under the bounded retry budget and the call fails
    /// with [`Error::EntropyUnavailable`] once the budget is exhausted.
    pub fn new(seed: u64) -> Result<Self, Error> {
        if seed != 0 {
            Ok(Self {
                current: mix(seed),
                increment: mix(mix(seed)) | 1,
            })
        } else {
            let current = entropy_word()?;
            let increment = entropy_word()? | 1;
            Ok(Self { current, increment })
        }
    }

    /// Advance the stream and return one 64-bit word.
    ///
    /// The return value is the RXS-M-XS permutation of the pre-update state;
    /// it is deliberately not the new state itself.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let x = self.current;
        self.current = x.wrapping_mul(LCG_MULT).wrapping_add(self.increment);

        let fx = ((x >> ((x >> 59) + 5)) ^ x).wrapping_mul(RXS_MULT);
        (fx >> 43) ^ fx
    }

    /// Unbiased integer in the inclusive range `[min, max]`.
    ///
    /// Bitmask rejection sampling: draws are masked down to the smallest
    /// all-ones mask covering the span and rejected while out of range, so
    /// every value in the range is exactly equally likely. Fewer than two
    /// draws are needed per call in expectation, for any span.
    ///
    /// # Panics
    ///
    /// If `min >= max`.
    pub fn bounded(&mut self, min: u64, max: u64) -> u64 {
        assert!(min < max, "bounds violation");

        let span = max - min;
        let mask = u64::MAX >> span.leading_zeros();

        loop {
            let sample = self.next() & mask;
            if sample <= span {
                return sample + min;
            }
        }
    }

    /// One 64-bit word whose bits are i.i.d. Bernoulli with p = n/2^m.
    ///
    /// The binary representation of `n`, read from its lowest set bit up to
    /// bit `m - 1`, is interpreted as a program over an accumulator: a zero
    /// bit ANDs in a fresh generator word, a one bit ORs one in. Each
    /// instruction costs exactly one generator call, so the total cost is
    /// `m - n.trailing_zeros()` calls and smaller exponents are cheaper.
    ///
    /// # Panics
    ///
    /// If `n == 0`, `m` is outside `1..=64`, or `n >= 2^m`.
    pub fn bias(&mut self, n: u64, m: u32) -> u64 {
        assert!(n != 0, "probability numerator is zero");
        assert!((1..=64).contains(&m), "invalid base 2 exponent");
        assert!(m == 64 || n >> m == 0, "numerator reaches 2^m");

        let mut accumulator = 0;

        for pc in n.trailing_zeros()..m {
            if (n >> pc) & 1 == 0 {
                accumulator &= self.next();
            } else {
                accumulator |= self.next();
            }
        }

        accumulator
    }

    /// Number of successes among `k` Bernoulli(n/2^m) trials.
    ///
    /// Trials are simulated 64 at a time by population-counting [`bias`]
    /// words. The final partial block is shifted right so that only its
    /// low-order `k mod 64` trial bits contribute.
    ///
    /// # Panics
    ///
    /// If `k == 0`, or if `(n, m)` violate the [`bias`] preconditions.
    ///
    /// [`bias`]: GeneratorState::bias
    pub fn binomial(&mut self, k: u64, n: u64, m: u32) -> u64 {
        assert!(k != 0, "no trials");

        let mut remaining = k;
        let mut successes: u64 = 0;

        while remaining > 64 {
            successes += u64::from(self.bias(n, m).count_ones());
            remaining -= 64;
        }

        successes + u64::from((self.bias(n, m) >> (64 - remaining)).count_ones())
    }
}

/// Ecosystem interop: a [`GeneratorState`] is usable anywhere a `rand`
/// generator is expected (distributions, shuffles, `Rng` adapters).
impl rand::RngCore for GeneratorState {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}
