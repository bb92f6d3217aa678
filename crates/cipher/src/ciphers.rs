//! Cipher functions that are more than a plain table sum.
//!
//! Every function here is total: empty input, punctuation, digits and mixed
//! case are all accepted, and characters outside `a..=z` contribute nothing
//! unless a cipher says otherwise (`ascii-sum`, the length term of
//! `gemini-resonance`, and the positional weights of the φ ciphers count
//! every character position).

use crate::tables::{LetterTable, ALW, LETTER_PRIMES};
use crate::value::CipherValue;

pub(crate) const PHI: f64 = 1.618_033_988_7;

/// `a=1 .. z=26`, case-insensitive; zero for everything else.
#[must_use]
pub fn ordinal(c: char) -> u32 {
    if c.is_ascii_alphabetic() {
        u32::from(c.to_ascii_lowercase() as u8 - b'a') + 1
    } else {
        0
    }
}

pub(crate) fn table_sum(text: &str, table: &LetterTable) -> i64 {
    text.chars()
        .map(ordinal)
        .filter(|v| *v > 0)
        .map(|v| i64::from(table[v as usize - 1]))
        .sum()
}

fn ascii_letter_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_alphabetic).count()
}

/// Lower-cased alphabetic characters, Unicode letters included.
fn cleaned_letters(text: &str) -> Vec<char> {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// Sum of the digits of `n` written in `base`.
#[must_use]
pub fn digit_sum_in_base(n: u64, base: u64) -> u64 {
    debug_assert!(base >= 2);
    let mut rest = n;
    let mut sum = 0;
    while rest > 0 {
        sum += rest % base;
        rest /= base;
    }
    sum
}

/// Repeated decimal digit sum until a single digit remains (sign ignored).
#[must_use]
pub fn digital_root(n: i64) -> u64 {
    let mut value = n.unsigned_abs();
    while value > 9 {
        value = digit_sum_in_base(value, 10);
    }
    value
}

/// Six rounds of `x -> 2x + 6`.
fn six_doublings(start: f64) -> f64 {
    (0..6).fold(start, |acc, _| acc * 2.0 + 6.0)
}

fn simple_sum(text: &str) -> i64 {
    text.chars().map(|c| i64::from(ordinal(c))).sum()
}

fn simple_as_u64(text: &str) -> u64 {
    simple_sum(text).unsigned_abs()
}

/// `value * weight`, pinned at `i64::MAX` instead of overflowing.
fn weighted(value: i64, weight: usize) -> i64 {
    value.saturating_mul(i64::try_from(weight).unwrap_or(i64::MAX))
}

fn phi_weighted_sum(text: &str) -> f64 {
    text.chars()
        .enumerate()
        .map(|(i, c)| f64::from(ordinal(c)) * PHI.powi(i as i32 + 1))
        .sum()
}

pub(crate) fn simple(text: &str) -> CipherValue {
    CipherValue::Integer(simple_sum(text))
}

pub(crate) fn english(text: &str) -> CipherValue {
    CipherValue::Integer(simple_sum(text) * 6)
}

pub(crate) fn gemini_resonance(text: &str) -> CipherValue {
    if text.is_empty() {
        return CipherValue::ZERO;
    }
    let mut total: i64 = 1;
    let mut length: i64 = 0;
    for (i, c) in text.chars().enumerate() {
        length += 1;
        let v = ordinal(c);
        if v > 0 {
            let prime = i64::from(LETTER_PRIMES[v as usize - 1]);
            total = total.saturating_add(weighted(prime, i + 1));
        }
    }
    CipherValue::Integer(total % 997 + length)
}

pub(crate) fn boundary_resonance(text: &str) -> CipherValue {
    let letters = cleaned_letters(text);
    if letters.len() < 2 {
        return CipherValue::ZERO;
    }
    let first = letters[0].to_digit(36);
    let last = letters[letters.len() - 1].to_digit(36);
    let (Some(first), Some(last)) = (first, last) else {
        return CipherValue::ZERO;
    };
    let middle: String = letters[1..letters.len() - 1].iter().collect();
    let core = weighted(simple_sum(&middle), letters.len() - 2);
    CipherValue::Integer(i64::from(first + last).saturating_add(core))
}

pub(crate) fn law_of_6_doubling(text: &str) -> CipherValue {
    let letters = ascii_letter_count(text);
    if letters == 0 {
        return CipherValue::Real(0.0);
    }
    CipherValue::Real(six_doublings(6.0) * letters as f64)
}

pub(crate) fn tiferet_balance(text: &str) -> CipherValue {
    let vowel_sum: u32 = text
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .map(ordinal)
        .sum();
    let initial = f64::from(vowel_sum) * 2.0 + 6.0;
    CipherValue::Real(initial * 64.0)
}

pub(crate) fn thelemic_6(text: &str) -> CipherValue {
    CipherValue::Real(six_doublings(table_sum(text, &ALW) as f64))
}

pub(crate) fn vav_connection(text: &str) -> CipherValue {
    let letters = cleaned_letters(text);
    if letters.len() < 2 {
        return CipherValue::Real(0.0);
    }
    let pair_total: f64 = letters
        .windows(2)
        .map(|pair| f64::from(ordinal(pair[0]) + ordinal(pair[1])) * 2.0 + 6.0)
        .sum();
    CipherValue::Real(pair_total * 64.0)
}

pub(crate) fn hexagram(text: &str) -> CipherValue {
    let letters = cleaned_letters(text);
    if letters.is_empty() {
        return CipherValue::Real(0.0);
    }
    let mut rays = [0.0_f64; 6];
    for (i, c) in letters.iter().enumerate() {
        rays[i % 6] += f64::from(ordinal(*c));
    }
    CipherValue::Real(rays.iter().map(|ray| ray * 2.0 + 6.0).sum())
}

pub(crate) fn doubling_vortex(text: &str) -> CipherValue {
    let letters = cleaned_letters(text);
    if letters.is_empty() {
        return CipherValue::Real(0.0);
    }
    let value = letters.iter().fold(6.0_f64, |acc, _| acc * 2.0 * PHI + 6.0);
    CipherValue::Real(value)
}

pub(crate) fn six_numbers_emergence(text: &str) -> CipherValue {
    let simple = simple_sum(text);
    if simple == 0 {
        return CipherValue::ZERO;
    }
    let mut current = simple;
    let mut total: u64 = 0;
    for _ in 0..6 {
        current = current.saturating_mul(2);
        total += digital_root(current);
    }
    CipherValue::Integer(total as i64)
}

/// Doublings of the ALW sum until it is divisible by 6, capped at 100.
///
/// Doubling never changes divisibility by 3, so the loop collapses to three
/// cases.
pub(crate) fn cabala_6_law_reduction(text: &str) -> CipherValue {
    let alw = table_sum(text, &ALW);
    let steps = if alw == 0 || alw % 6 == 0 {
        0
    } else if alw % 3 == 0 {
        1
    } else {
        100
    };
    CipherValue::Integer(steps)
}

pub(crate) fn qabalah_doubling_bridge(text: &str) -> CipherValue {
    let average = (table_sum(text, &ALW) + simple_sum(text)) as f64 / 2.0;
    CipherValue::Real(six_doublings(average))
}

pub(crate) fn law_of_6_variant(text: &str) -> CipherValue {
    CipherValue::Real(90.0 * ascii_letter_count(text) as f64)
}

pub(crate) fn ordinal_multiplied(text: &str) -> CipherValue {
    let mut found = false;
    let mut product: i64 = 1;
    for v in text.chars().map(ordinal).filter(|v| *v > 0) {
        found = true;
        product = product.saturating_mul(i64::from(v));
    }
    CipherValue::Integer(if found { product } else { 0 })
}

pub(crate) fn golden_ratio_phi(text: &str) -> CipherValue {
    let value = phi_weighted_sum(text).abs();
    CipherValue::Real((value * 100.0).round() / 100.0)
}

pub(crate) fn ascii_sum(text: &str) -> CipherValue {
    CipherValue::Integer(text.chars().map(|c| i64::from(u32::from(c))).sum())
}

pub(crate) fn caesar(text: &str) -> CipherValue {
    let total: i64 = text
        .chars()
        .map(ordinal)
        .filter(|v| *v > 0)
        .map(|v| i64::from((v - 1 + 3) % 26 + 1))
        .sum();
    CipherValue::Integer(total)
}

pub(crate) fn base_digit_sum(text: &str, base: u64) -> CipherValue {
    CipherValue::Integer(digit_sum_in_base(simple_as_u64(text), base) as i64)
}

fn binary_trinary_sum(text: &str) -> u64 {
    let simple = simple_as_u64(text);
    digit_sum_in_base(simple, 2) + digit_sum_in_base(simple, 3)
}

/// Set bits of a truncated non-negative real, exact beyond `u64` range.
fn popcount_of_real(value: f64) -> u64 {
    if !value.is_finite() || value < 1.0 {
        return 0;
    }
    let whole = value.trunc();
    if whole < u64::MAX as f64 {
        return u64::from((whole as u64).count_ones());
    }
    let mantissa = (whole.to_bits() & ((1_u64 << 52) - 1)) | (1_u64 << 52);
    u64::from(mantissa.count_ones())
}

fn golden_spiral_binary_sum(text: &str) -> u64 {
    popcount_of_real(phi_weighted_sum(text))
}

fn trinary_loop_position_sum(text: &str) -> i64 {
    text.chars()
        .enumerate()
        .map(|(i, c)| i64::from(ordinal(c)) * 3_i64.pow((i % 3) as u32))
        .sum()
}

pub(crate) fn binary_trinary(text: &str) -> CipherValue {
    CipherValue::Integer(binary_trinary_sum(text) as i64)
}

pub(crate) fn golden_spiral_binary(text: &str) -> CipherValue {
    CipherValue::Integer(golden_spiral_binary_sum(text) as i64)
}

pub(crate) fn trinary_loop_position(text: &str) -> CipherValue {
    CipherValue::Integer(trinary_loop_position_sum(text))
}

/// Collapses a digital root onto {0, 3, 6, 9}.
fn trinary_class(root: u64) -> i64 {
    match root {
        1..=3 => 3,
        4..=6 => 6,
        7..=9 => 9,
        _ => 0,
    }
}

pub(crate) fn composite_ctgb(text: &str) -> CipherValue {
    let layered = binary_trinary_sum(text) as i64
        + golden_spiral_binary_sum(text) as i64
        + trinary_loop_position_sum(text);
    CipherValue::Integer(trinary_class(digital_root(layered)))
}
