//! Full bit-stream pipeline: generate a heavily biased stream, run it
//! through the Von Neumann extractor, and check both halves with the
//! autocorrelation profile.
//!
//! Run with `cargo run --example debias_pipeline`.

use simrand_core::{BitBuffer, GeneratorState, autocorr_profile, debias};

fn main() {
    let mut rng = GeneratorState::new(7).expect("deterministic seeding cannot fail");

    // 64k bits with p(one) = 32/256 = 0.125.
    let mut biased = BitBuffer::new(65_536);
    for word in biased.words_mut() {
        *word = rng.bias(32, 8);
    }

    let mut unbiased = BitBuffer::new(16_384);
    let info = debias(&biased, 65_536, &mut unbiased, 16_384);
    println!(
        "debias: consumed {} source bits, produced {} output bits",
        info.used, info.filled
    );

    let ones = (0..info.filled).filter(|&i| unbiased.test(i)).count();
    println!(
        "output mean: {:.4} (want ~0.5; input mean was ~0.125)",
        ones as f64 / info.filled as f64
    );

    let profile = autocorr_profile(&unbiased, info.filled, 16);
    println!(
        "autocorrelation over 16 lags: max |r| = {:.4} at lag {}, threshold {:.4}, {} violations",
        profile.max_abs_correlation, profile.max_abs_lag, profile.threshold, profile.violations
    );
}
