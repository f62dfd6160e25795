//! Estimate pi by sampling the unit square: the classic smoke test for a
//! simulation generator.
//!
//! Run with `cargo run --example monte_carlo_pi`.

use simrand_core::GeneratorState;

fn unit(rng: &mut GeneratorState) -> f64 {
    // Top 53 bits give a uniform double in [0, 1).
    (rng.next() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

fn main() {
    let mut rng = GeneratorState::new(42).expect("deterministic seeding cannot fail");
    let samples = 10_000_000u64;

    let mut inside = 0u64;
    for _ in 0..samples {
        let x = unit(&mut rng);
        let y = unit(&mut rng);
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }

    let estimate = 4.0 * inside as f64 / samples as f64;
    println!("pi ~= {estimate:.6} ({samples} samples, error {:+.6})", estimate - std::f64::consts::PI);
}
