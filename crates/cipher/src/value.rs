use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of a single cipher evaluation.
///
/// Most ciphers are plain letter sums and produce integers; the weighted
/// doubling and golden-ratio variants produce reals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CipherValue {
    Integer(i64),
    Real(f64),
}

impl CipherValue {
    pub const ZERO: Self = Self::Integer(0);

    /// Integer view of the value, truncating reals toward zero.
    ///
    /// Returns `None` for non-finite reals and reals outside the `i64` range.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Self::Integer(v) => Some(v),
            Self::Real(v) => {
                if !v.is_finite() {
                    return None;
                }
                let t = v.trunc();
                if t < i64::MIN as f64 || t >= i64::MAX as f64 {
                    return None;
                }
                Some(t as i64)
            }
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        match *self {
            Self::Integer(v) => v > 0,
            Self::Real(v) => v > 0.0,
        }
    }

    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl Default for CipherValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for CipherValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CipherValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl fmt::Display for CipherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(v) => write!(f, "{v}"),
            // Whole reals keep a trailing ".0" so they read as reals in reports.
            Self::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_view_truncates_reals() {
        assert_eq!(CipherValue::Real(762.9).as_integer(), Some(762));
        assert_eq!(CipherValue::Real(-3.7).as_integer(), Some(-3));
        assert_eq!(CipherValue::Integer(24).as_integer(), Some(24));
    }

    #[test]
    fn non_finite_reals_have_no_integer_view() {
        assert_eq!(CipherValue::Real(f64::INFINITY).as_integer(), None);
        assert_eq!(CipherValue::Real(f64::NAN).as_integer(), None);
        assert_eq!(CipherValue::Real(1e30).as_integer(), None);
    }

    #[test]
    fn display_marks_whole_reals() {
        assert_eq!(CipherValue::Real(762.0).to_string(), "762.0");
        assert_eq!(CipherValue::Real(12.34).to_string(), "12.34");
        assert_eq!(CipherValue::Integer(42).to_string(), "42");
    }
}
