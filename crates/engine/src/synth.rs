use resonance_cipher::CipherValue;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// What a value looks like once it has to become an `i64` seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Seed {
    Number(i64),
    /// Larger than any `i64`, hence larger than any threshold.
    Oversized,
    /// Negative, non-finite or not decimal.
    Invalid,
}

impl Seed {
    pub(crate) fn of_value(value: CipherValue) -> Self {
        match value {
            CipherValue::Integer(v) => Self::Number(v),
            CipherValue::Real(v) if !v.is_finite() || v < 0.0 => Self::Invalid,
            CipherValue::Real(_) => value.as_integer().map_or(Self::Oversized, Self::Number),
        }
    }

    /// Reads a decimal digit string; a leading sign is not accepted.
    pub(crate) fn of_digits(digits: &str) -> Self {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Invalid;
        }
        match digits.parse::<i64>() {
            Ok(v) => Self::Number(v),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Self::Oversized,
            Err(_) => Self::Invalid,
        }
    }
}

/// Decimal digits of each value, truncating reals, concatenated in order.
///
/// `None` when a value has no non-negative integer form.
pub(crate) fn concat_digits(values: &[CipherValue]) -> Option<String> {
    let mut digits = String::new();
    for value in values {
        match Seed::of_value(*value) {
            Seed::Number(v) if v >= 0 => digits.push_str(&v.to_string()),
            _ => return None,
        }
    }
    Some(digits)
}

/// Seed for the unfolding stage, built from the primary cipher values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitialNumber {
    /// The concatenation as written, before parsing.
    pub digits: String,
    /// `None` when the digits do not fit in an `i64`.
    pub value: Option<i64>,
}

impl InitialNumber {
    pub(crate) fn seed(&self) -> Seed {
        self.value.map_or(Seed::Oversized, Seed::Number)
    }
}

/// Concatenates the decimal forms of `values` and parses the result.
///
/// An empty input, or a value that is negative, non-finite or outside the
/// `i64` range, yields 0.
pub fn synthesize(values: &[CipherValue]) -> InitialNumber {
    let Some(digits) = concat_digits(values) else {
        let digits: String = values.iter().map(ToString::to_string).collect();
        log::debug!("Initial number falls back to 0: {digits:?} is not a decimal concatenation");
        return InitialNumber {
            digits,
            value: Some(0),
        };
    };
    let value = match Seed::of_digits(&digits) {
        Seed::Number(v) => Some(v),
        Seed::Oversized => None,
        Seed::Invalid => Some(0),
    };
    InitialNumber { digits, value }
}
