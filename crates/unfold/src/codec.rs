use crate::error::{Result, UnfoldError};

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Writes `n` in `base` (2..=62) using `0-9A-Za-z`; negatives get a `-` prefix.
pub fn to_base(n: i64, base: u32) -> Result<String> {
    if !(2..=62).contains(&base) {
        return Err(UnfoldError::InvalidBase(base));
    }
    Ok(encode_unchecked(n, u64::from(base)))
}

/// Base-36 encoding with upper-case digits; `0 -> "0"`.
#[must_use]
pub fn to_base36(n: i64) -> String {
    encode_unchecked(n, 36)
}

fn encode_unchecked(n: i64, base: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut rest = n.unsigned_abs();
    let mut digits = Vec::new();
    while rest > 0 {
        digits.push(DIGITS[(rest % base) as usize]);
        rest /= base;
    }
    if n < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Decodes every overlapping two-character window of a base-36 string.
///
/// A string of length `L` yields up to `L - 1` numbers in `0..1296`; windows
/// holding a character outside `[0-9A-Za-z]` are skipped without aborting
/// the rest of the decode. Strings shorter than two characters yield nothing.
#[must_use]
pub fn decode_base36_pairs(code: &str) -> Vec<u64> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    chars
        .windows(2)
        .filter_map(|pair| match (pair[0].to_digit(36), pair[1].to_digit(36)) {
            (Some(hi), Some(lo)) => Some(u64::from(hi * 36 + lo)),
            _ => {
                log::debug!("skipping undecodable base-36 window {:?}", pair);
                None
            }
        })
        .collect()
}
