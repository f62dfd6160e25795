//! Packed bit buffers and the stream transforms defined over them.
//!
//! A [`BitBuffer`] is an ordered, fixed-capacity bit sequence backed by
//! 64-bit words, addressed by a 0-based bit index. Read and write cursors
//! belong to the caller, not the buffer; the transforms below report cursor
//! movement through [`StreamResult`] instead of holding position themselves.

use serde::Serialize;

/// Fixed-capacity bit sequence backed by packed 64-bit words.
///
/// Bit `k` lives in word `k / 64` at position `k % 64` (low bit first).
/// Capacity is always a whole number of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    words: Vec<u64>,
}

impl BitBuffer {
    /// Zeroed buffer with capacity for at least `bits` bits, rounded up to
    /// a whole word.
    ///
    /// # Panics
    ///
    /// If `bits == 0`.
    pub fn new(bits: u64) -> Self {
        assert!(bits != 0, "empty bit buffer");
        Self {
            words: vec![0; bits.div_ceil(64) as usize],
        }
    }

    /// Wrap existing words as a bit sequence.
    ///
    /// # Panics
    ///
    /// If `words` is empty.
    pub fn from_words(words: Vec<u64>) -> Self {
        assert!(!words.is_empty(), "empty bit buffer");
        Self { words }
    }

    /// Capacity in bits.
    pub fn capacity(&self) -> u64 {
        self.words.len() as u64 * 64
    }

    /// Whether the bit at `index` is set.
    pub fn test(&self, index: u64) -> bool {
        (self.words[(index / 64) as usize] >> (index % 64)) & 1 == 1
    }

    /// Set the bit at `index` to one.
    pub fn set(&mut self, index: u64) {
        self.words[(index / 64) as usize] |= 1 << (index % 64);
    }

    /// Word-level read access, for bulk filling and inspection.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Word-level write access, for bulk filling from a generator.
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Zero every word covering the first `bits` bits.
    fn clear_prefix(&mut self, bits: u64) {
        for word in &mut self.words[..bits.div_ceil(64) as usize] {
            *word = 0;
        }
    }

    /// The two bits starting at the even index `index`, low bit first.
    fn pair(&self, index: u64) -> u64 {
        debug_assert!(index % 2 == 0);
        (self.words[(index / 64) as usize] >> (index % 64)) & 0b11
    }
}

/// Bookkeeping from one debiasing pass: how much input was consumed and how
/// much output was produced. Created fresh per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamResult {
    /// Source bits consumed; always even and at most the requested length.
    pub used: u64,
    /// Destination bits written; at most the requested capacity.
    pub filled: u64,
}

/// Von Neumann extractor: unbiased bits from a biased, autocorrelation-free
/// bit source.
///
/// The first `n` bits of `src` are read as consecutive non-overlapping
/// pairs. A `(1, 0)` pair emits a one, a `(0, 1)` pair emits a zero, and
/// equal pairs are discarded. The pass stops once `m` destination bits are
/// filled or the source is exhausted, whichever comes first; the destination
/// is not guaranteed to be filled to capacity.
///
/// The destination prefix is zeroed before the pass, since emitted zeros are
/// represented by advancing the write cursor and ones are OR-ed in.
///
/// # Panics
///
/// If `n` is zero or odd, `m` is zero, or either length exceeds its
/// buffer's capacity.
pub fn debias(src: &BitBuffer, n: u64, dest: &mut BitBuffer, m: u64) -> StreamResult {
    assert!(n != 0, "nothing to read");
    assert!(m != 0, "nowhere to write");
    assert!(n % 2 == 0, "cannot process odd-length bitstream");
    assert!(n <= src.capacity(), "source length exceeds capacity");
    assert!(m <= dest.capacity(), "destination length exceeds capacity");

    dest.clear_prefix(m);

    let mut read_pos = 0;
    let mut write_pos = 0;

    while read_pos < n {
        match src.pair(read_pos) {
            1 => {
                dest.set(write_pos);
                write_pos += 1;
            }
            2 => {
                write_pos += 1;
            }
            _ => {}
        }

        read_pos += 2;

        if write_pos == m {
            break;
        }
    }

    StreamResult {
        used: read_pos,
        filled: write_pos,
    }
}

/// Cyclic lag-`k` autocorrelation of the first `n` bits of `src`.
///
/// With `x1` the number of positions where both `src[i]` and
/// `src[(i + k) % n]` are set and `x2` the number of set positions, the
/// estimate is `(n·x1 − x2²) / (n·x2 − x2²)`, which lies in `[-1, 1]` for
/// any boolean sequence.
///
/// Constant streams (`x2 == 0` or `x2 == n`) make the denominator zero;
/// they carry no signal to correlate, so the estimate is defined as `0.0`
/// rather than letting NaN or an infinity escape.
///
/// # Panics
///
/// If `n == 0`, `k >= n`, or `n` exceeds the buffer's capacity.
pub fn autocorr(src: &BitBuffer, n: u64, k: u64) -> f64 {
    assert!(n != 0, "no data");
    assert!(k < n, "lag exceeds length of data");
    assert!(n <= src.capacity(), "length exceeds capacity");

    let mut x1 = 0u64;
    let mut x2 = 0u64;

    for i in 0..n {
        if src.test(i) {
            if src.test((i + k) % n) {
                x1 += 1;
            }
            x2 += 1;
        }
    }

    if x2 == 0 || x2 == n {
        return 0.0;
    }

    let (n, x1, x2) = (n as f64, x1 as f64, x2 as f64);
    let correlation = (n * x1 - x2 * x2) / (n * x2 - x2 * x2);

    debug_assert!(
        (-1.0..=1.0).contains(&correlation),
        "correlation bound violation"
    );
    correlation
}

/// Autocorrelation at a single lag.
#[derive(Debug, Clone, Serialize)]
pub struct LagCorrelation {
    pub lag: u64,
    pub correlation: f64,
}

/// Autocorrelation profile across multiple lags.
#[derive(Debug, Clone, Serialize)]
pub struct AutocorrProfile {
    pub lags: Vec<LagCorrelation>,
    pub max_abs_correlation: f64,
    pub max_abs_lag: u64,
    /// 95% significance threshold (2/sqrt(n)).
    pub threshold: f64,
    /// Number of lags exceeding the threshold.
    pub violations: usize,
}

/// Sweep [`autocorr`] over lags `1..=max_lag` (capped at `n - 1`).
///
/// A healthy generator stream stays below the significance threshold at
/// almost every lag; a periodic artifact shows up as a spike at its period.
///
/// # Panics
///
/// As [`autocorr`], for the same degenerate inputs.
pub fn autocorr_profile(src: &BitBuffer, n: u64, max_lag: u64) -> AutocorrProfile {
    assert!(n != 0, "no data");

    let max_lag = max_lag.min(n - 1);
    let threshold = 2.0 / (n as f64).sqrt();

    let mut lags = Vec::with_capacity(max_lag as usize);
    let mut max_abs = 0.0f64;
    let mut max_abs_lag = 0;
    let mut violations = 0;

    for lag in 1..=max_lag {
        let correlation = autocorr(src, n, lag);

        if correlation.abs() > max_abs {
            max_abs = correlation.abs();
            max_abs_lag = lag;
        }
        if correlation.abs() > threshold {
            violations += 1;
        }

        lags.push(LagCorrelation { lag, correlation });
    }

    AutocorrProfile {
        lags,
        max_abs_correlation: max_abs,
        max_abs_lag,
        threshold,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GeneratorState;

    const MID_SIMULATION: usize = 20_000;

    fn biased_buffer(rng: &mut GeneratorState, words: usize, n: u64, m: u32) -> BitBuffer {
        let mut buf = BitBuffer::new(words as u64 * 64);
        for word in buf.words_mut() {
            *word = rng.bias(n, m);
        }
        buf
    }

    #[test]
    fn test_bit_buffer_set_and_test() {
        let mut buf = BitBuffer::new(130);
        assert_eq!(buf.capacity(), 192);

        for index in [0u64, 1, 63, 64, 127, 129] {
            assert!(!buf.test(index));
            buf.set(index);
            assert!(buf.test(index));
        }
        assert!(!buf.test(2));
    }

    #[test]
    fn test_debias_handcrafted_pairs() {
        // Bits 0..8 are (1,0) (0,1) (1,1) (0,0): emit 1, emit 0, skip, skip.
        let src = BitBuffer::from_words(vec![0b0011_1001]);
        let mut dest = BitBuffer::new(64);

        let info = debias(&src, 8, &mut dest, 64);
        assert_eq!(info.used, 8);
        assert_eq!(info.filled, 2);
        assert_eq!(dest.as_words()[0], 0b01);
    }

    #[test]
    fn test_debias_stops_when_destination_fills() {
        // All pairs are (1, 0), so every pair emits: 3 pairs fill m = 3.
        let src = BitBuffer::from_words(vec![0b01_01_01_01]);
        let mut dest = BitBuffer::new(64);

        let info = debias(&src, 8, &mut dest, 3);
        assert_eq!(info.used, 6);
        assert_eq!(info.filled, 3);
        assert_eq!(dest.as_words()[0], 0b111);
    }

    #[test]
    fn test_debias_zeroes_stale_destination() {
        let src = BitBuffer::from_words(vec![0b0000_0010]); // one (0,1) pair
        let mut dest = BitBuffer::new(64);
        dest.words_mut()[0] = u64::MAX;

        let info = debias(&src, 8, &mut dest, 64);
        assert_eq!(info.filled, 1);
        assert_eq!(dest.as_words()[0], 0);
    }

    #[test]
    fn test_debias_bookkeeping_invariants() {
        let mut rng = GeneratorState::new(0xD1CE).unwrap();

        for _ in 0..500 {
            let src = biased_buffer(&mut rng, 35, 32, 8);
            let mut dest = BitBuffer::new(192);
            let info = debias(&src, 2240, &mut dest, 135);

            assert_eq!(info.used % 2, 0);
            assert!(info.used <= 2240);
            assert!(info.filled <= 135);
        }
    }

    #[test]
    fn test_debias_outputs_unbiased_bits() {
        // Feed p = 0.125 input; every output bit position must converge to
        // one half. 2240 input bits comfortably fill 135 outputs per round.
        let mut rng = GeneratorState::new(0xFEED).unwrap();
        let mut ones = [0u32; 135];

        for _ in 0..MID_SIMULATION {
            let src = biased_buffer(&mut rng, 35, 32, 8);
            let mut dest = BitBuffer::new(192);

            let info = debias(&src, 2240, &mut dest, 135);
            assert_eq!(info.filled, 135);

            for (k, count) in ones.iter_mut().enumerate() {
                if dest.test(k as u64) {
                    *count += 1;
                }
            }
        }

        for (k, &count) in ones.iter().enumerate() {
            let frequency = f64::from(count) / MID_SIMULATION as f64;
            assert!(
                (frequency - 0.5).abs() < 0.02,
                "bit {k} frequency {frequency}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "odd-length bitstream")]
    fn test_debias_rejects_odd_length() {
        let src = BitBuffer::new(64);
        let mut dest = BitBuffer::new(64);
        debias(&src, 7, &mut dest, 64);
    }

    #[test]
    fn test_autocorr_alternating_stream_is_exact() {
        // For 0101...01, every even lag lines the stream up with itself and
        // every odd lag anti-aligns it perfectly.
        let buf = BitBuffer::from_words(vec![0xAAAA_AAAA_AAAA_AAAA; 100]);
        let n = 6400;

        for k in 0..64 {
            let expected = if k % 2 == 1 { -1.0 } else { 1.0 };
            assert_eq!(autocorr(&buf, n, k), expected, "lag {k}");
        }
    }

    #[test]
    fn test_autocorr_lag_zero_is_unity() {
        let mut rng = GeneratorState::new(31).unwrap();
        let buf = biased_buffer(&mut rng, 64, 128, 8);
        assert_eq!(autocorr(&buf, buf.capacity(), 0), 1.0);
    }

    #[test]
    fn test_autocorr_degenerate_streams_return_zero() {
        let zeros = BitBuffer::new(256);
        assert_eq!(autocorr(&zeros, 256, 3), 0.0);

        let ones = BitBuffer::from_words(vec![u64::MAX; 4]);
        assert_eq!(autocorr(&ones, 256, 3), 0.0);
    }

    #[test]
    fn test_autocorr_random_stream_stays_small() {
        let mut rng = GeneratorState::new(0xACDC).unwrap();
        let mut buf = BitBuffer::new(100_000);
        for word in buf.words_mut() {
            *word = rng.next();
        }

        for k in 1..64 {
            assert!(autocorr(&buf, 100_000, k).abs() < 0.05, "lag {k}");
        }
    }

    #[test]
    fn test_profile_flags_periodic_artifact() {
        let buf = BitBuffer::from_words(vec![0xAAAA_AAAA_AAAA_AAAA; 16]);
        let profile = autocorr_profile(&buf, 1024, 8);

        assert_eq!(profile.lags.len(), 8);
        assert_eq!(profile.max_abs_correlation, 1.0);
        assert_eq!(profile.violations, 8);
    }

    #[test]
    fn test_profile_of_healthy_stream() {
        let mut rng = GeneratorState::new(0x600D).unwrap();
        let mut buf = BitBuffer::new(65_536);
        for word in buf.words_mut() {
            *word = rng.next();
        }

        let profile = autocorr_profile(&buf, 65_536, 32);
        assert_eq!(profile.lags.len(), 32);
        assert!(profile.max_abs_correlation < 0.05);
        assert!((profile.threshold - 2.0 / 256.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_lag_sweep_caps_at_length() {
        let buf = BitBuffer::from_words(vec![0b1011]);
        let profile = autocorr_profile(&buf, 4, 64);
        assert_eq!(profile.lags.len(), 3);
    }

    #[test]
    fn test_stream_result_serializes() {
        let info = StreamResult {
            used: 10,
            filled: 4,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"used":10,"filled":4}"#);
    }
}
