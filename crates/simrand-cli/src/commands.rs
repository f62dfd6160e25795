//! Subcommand implementations. Each command constructs its own generator,
//! runs the engine, and prints; nothing here holds state between calls.

use std::io::Write;

use simrand_core::{BitBuffer, GeneratorState};

/// Build a generator, exiting with a message when the entropy path fails.
fn make_generator(seed: u64) -> GeneratorState {
    match GeneratorState::new(seed) {
        Ok(rng) => rng,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Validate CLI-level argument constraints before the engine asserts on them.
fn require(condition: bool, message: &str) {
    if !condition {
        eprintln!("error: {message}");
        std::process::exit(2);
    }
}

pub fn stream(count: u64, seed: u64, format: &str) {
    let mut rng = make_generator(seed);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for _ in 0..count {
        let word = rng.next();
        let write_result = match format {
            "hex" => writeln!(out, "{word:016x}"),
            "raw" => out.write_all(&word.to_le_bytes()),
            _ => writeln!(out, "{word}"),
        };
        if write_result.is_err() {
            break; // Broken pipe
        }
    }
}

pub fn bounded(min: u64, max: u64, count: u64, seed: u64) {
    require(min < max, "--min must be strictly below --max");
    let mut rng = make_generator(seed);

    for _ in 0..count {
        println!("{}", rng.bounded(min, max));
    }
}

pub fn bias(numerator: u64, exponent: u32, count: u64, seed: u64) {
    require_probability(numerator, exponent);
    let mut rng = make_generator(seed);

    for _ in 0..count {
        println!("{:016x}", rng.bias(numerator, exponent));
    }
}

pub fn binomial(trials: u64, numerator: u64, exponent: u32, count: u64, seed: u64) {
    require(trials != 0, "--trials must be at least 1");
    require_probability(numerator, exponent);
    let mut rng = make_generator(seed);

    for _ in 0..count {
        println!("{}", rng.binomial(trials, numerator, exponent));
    }
}

pub fn debias(bits: u64, capacity: u64, numerator: u64, exponent: u32, seed: u64) {
    require(bits != 0 && bits % 2 == 0, "--bits must be even and nonzero");
    require(capacity != 0, "--capacity must be nonzero");
    require_probability(numerator, exponent);
    let mut rng = make_generator(seed);

    let mut src = BitBuffer::new(bits);
    for word in src.words_mut() {
        *word = rng.bias(numerator, exponent);
    }

    let mut dest = BitBuffer::new(capacity);
    let info = simrand_core::debias(&src, bits, &mut dest, capacity);

    let p = numerator as f64 / 2f64.powi(exponent as i32);
    println!("source: {bits} bits at p(one) = {p:.6}");
    println!(
        "consumed {} source bits, produced {} of {} requested output bits",
        info.used, info.filled, capacity
    );

    if info.filled > 0 {
        let ones = (0..info.filled).filter(|&i| dest.test(i)).count();
        println!(
            "output mean: {:.4} (expected 0.5)",
            ones as f64 / info.filled as f64
        );
    }
}

pub fn autocorr(bits: u64, max_lag: u64, numerator: u64, exponent: u32, seed: u64, json: bool) {
    require(bits != 0, "--bits must be nonzero");
    require(max_lag != 0, "--max-lag must be nonzero");
    require_probability(numerator, exponent);
    let mut rng = make_generator(seed);

    let mut buf = BitBuffer::new(bits);
    for word in buf.words_mut() {
        *word = rng.bias(numerator, exponent);
    }

    let profile = simrand_core::autocorr_profile(&buf, bits, max_lag);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&profile).expect("profile serialization cannot fail")
        );
        return;
    }

    println!("autocorrelation profile: {bits} bits, lags 1..={}", profile.lags.len());
    println!("95% significance threshold: ±{:.6}\n", profile.threshold);
    println!("  {:>6} {:>12}", "lag", "correlation");
    println!("  {}", "-".repeat(20));
    for point in &profile.lags {
        let flag = if point.correlation.abs() > profile.threshold {
            "  *"
        } else {
            ""
        };
        println!("  {:>6} {:>12.6}{flag}", point.lag, point.correlation);
    }
    println!(
        "\nmax |r| = {:.6} at lag {}; {} of {} lags above threshold",
        profile.max_abs_correlation,
        profile.max_abs_lag,
        profile.violations,
        profile.lags.len()
    );
}

fn require_probability(numerator: u64, exponent: u32) {
    require(numerator != 0, "-n must be nonzero");
    require(
        (1..=64).contains(&exponent),
        "-m must be between 1 and 64",
    );
    require(
        exponent == 64 || numerator >> exponent == 0,
        "-n must be strictly below 2^m",
    );
}
