use serde::{Deserialize, Serialize};

/// Trial division over 6k ± 1 candidates.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: u64 = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[must_use]
pub fn is_perfect_square(n: u64) -> bool {
    let root = integer_sqrt(n);
    root * root == n
}

#[must_use]
pub fn is_palindrome(n: u64) -> bool {
    let digits = n.to_string();
    digits.bytes().eq(digits.bytes().rev())
}

/// Floor square root; the float estimate is corrected in both directions.
fn integer_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Independent numeric tags of a resonance number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberTags {
    pub prime: bool,
    pub square: bool,
    pub palindrome: bool,
}

impl NumberTags {
    #[must_use]
    pub fn of(n: u64) -> Self {
        Self {
            prime: is_prime(n),
            square: is_perfect_square(n),
            palindrome: is_palindrome(n),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.prime || self.square || self.palindrome)
    }

    /// `[PSA]`-style marker, empty when no tag applies.
    #[must_use]
    pub fn marker(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("[");
        if self.prime {
            out.push('P');
        }
        if self.square {
            out.push('S');
        }
        if self.palindrome {
            out.push('A');
        }
        out.push(']');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn primes() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(97));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(is_prime(1_000_003));
        assert!(!is_prime(999_983 * 1_000_003));
    }

    #[test]
    fn squares() {
        assert!(is_perfect_square(0));
        assert!(is_perfect_square(1));
        assert!(is_perfect_square(16));
        assert!(!is_perfect_square(15));
        assert!(is_perfect_square(4_294_967_295 * 4_294_967_295));
        assert!(!is_perfect_square(u64::MAX));
    }

    #[test]
    fn palindromes() {
        assert!(is_palindrome(121));
        assert!(is_palindrome(7));
        assert!(!is_palindrome(123));
        assert!(!is_palindrome(10));
    }

    #[test]
    fn tags_co_occur() {
        let tags = NumberTags::of(121);
        assert!(!tags.prime && tags.square && tags.palindrome);
        assert_eq!(tags.marker(), "[SA]");
        assert_eq!(NumberTags::of(11).marker(), "[PA]");
        assert_eq!(NumberTags::of(24).marker(), "");
    }

    proptest! {
        #[test]
        fn proptest_squares_of_any_root_are_detected(root in 0u64..4_294_967_296) {
            prop_assert!(is_perfect_square(root * root));
            if root > 1 {
                prop_assert!(!is_perfect_square(root * root - 1));
            }
        }

        #[test]
        fn proptest_prime_matches_naive_check(n in 0u64..5_000) {
            let naive = n >= 2 && (2..n).all(|d| n % d != 0);
            prop_assert_eq!(is_prime(n), naive);
        }
    }
}
