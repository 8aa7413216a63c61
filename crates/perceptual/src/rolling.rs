//! Karp-Rabin rolling hash over character k-grams.
//!
//! Each character maps to `code(c) - code('a') + 1`. The mapping is applied to
//! digits and underscore too, so their values are negative; all reductions use
//! floored (Euclidean) modulo so hashes always land in `[0, modulus)`.

use crate::config::DEFAULT_MODULUS;

/// Integer value of a character in the rolling hash.
#[inline]
pub fn char_value(ch: char) -> i64 {
    ch as i64 - 'a' as i64 + 1
}

/// `modulus` widened for arithmetic, or `None` when it is outside
/// `[1, i64::MAX]`. Products of two reduced values stay inside `i128` only for
/// moduli up to `i64::MAX`.
fn checked_modulus(modulus: u64) -> Option<i128> {
    (1..=DEFAULT_MODULUS)
        .contains(&modulus)
        .then_some(modulus as i128)
}

#[inline]
fn reduce(value: i128, modulus: i128) -> i128 {
    value.rem_euclid(modulus)
}

fn pow_mod(base: i128, mut exp: usize, modulus: i128) -> i128 {
    let mut result = reduce(1, modulus);
    let mut factor = reduce(base, modulus);
    while exp > 0 {
        if exp & 1 == 1 {
            result = reduce(result * factor, modulus);
        }
        factor = reduce(factor * factor, modulus);
        exp >>= 1;
    }
    result
}

/// Hash a single k-gram from scratch: `Σ v(c_i) * base^(L-1-i) mod modulus`.
///
/// Returns `None` when `modulus` is outside `[1, i64::MAX]`.
pub fn hash_kgram(kgram: &str, base: u64, modulus: u64) -> Option<u64> {
    let m = checked_modulus(modulus)?;
    let b = reduce(base as i128, m);
    let h = kgram
        .chars()
        .fold(0i128, |h, ch| reduce(h * b + char_value(ch) as i128, m));
    Some(h as u64)
}

/// Hash every k-gram of `text`, left to right, in O(n).
///
/// Returns exactly `chars - kgram_len + 1` values, or nothing when the text is
/// shorter than `kgram_len`, `kgram_len == 0`, or `modulus` is outside
/// `[1, i64::MAX]`.
pub fn hash_kgrams(text: &str, kgram_len: usize, base: u64, modulus: u64) -> Vec<u64> {
    let Some(m) = checked_modulus(modulus) else {
        return Vec::new();
    };
    let values: Vec<i64> = text.chars().map(char_value).collect();
    let n = values.len();
    if kgram_len == 0 || n < kgram_len {
        return Vec::new();
    }

    let b = reduce(base as i128, m);
    // weight of the character leaving the window
    let high = pow_mod(b, kgram_len - 1, m);

    let mut out = Vec::with_capacity(n - kgram_len + 1);
    let mut h = values[..kgram_len]
        .iter()
        .fold(0i128, |h, &v| reduce(h * b + v as i128, m));
    out.push(h as u64);

    for (&prev, &next) in values.iter().zip(values.iter().skip(kgram_len)) {
        let dropped = reduce(h - prev as i128 * high, m);
        h = reduce(dropped * b + next as i128, m);
        out.push(h as u64);
    }
    out
}
