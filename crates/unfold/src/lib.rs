//! # Resonance Unfold
//!
//! The numeric core of the resonance pipeline.
//!
//! ```text
//! n ──> factorization chain   (distinct quotients, descending)
//!         │
//!         ├──> base-36 code per element
//!         │
//!         └──> overlapping 2-char windows decoded back to numbers
//! ```
//!
//! Every stage is total: non-positive input unfolds to nothing and
//! undecodable windows are dropped, so callers never handle errors here
//! except for an explicitly invalid radix in [`to_base`].

mod chain;
mod codec;
mod error;
mod tags;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use chain::factorization_chain;
pub use codec::{decode_base36_pairs, to_base, to_base36};
pub use error::{Result, UnfoldError};
pub use tags::{is_palindrome, is_perfect_square, is_prime, NumberTags};

/// A number produced by pair decoding.
pub type ResonanceNumber = u64;

/// One chain → encode → decode pass over a single seed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnfoldTrace {
    pub chain: Vec<i64>,
    pub codes: Vec<String>,
    pub decoded: BTreeSet<ResonanceNumber>,
}

impl UnfoldTrace {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Unfolds `n` into the union of the pair-decoded base-36 codes of its chain.
#[must_use]
pub fn unfold(n: i64) -> UnfoldTrace {
    let chain = factorization_chain(n);
    let codes: Vec<String> = chain.iter().map(|value| to_base36(*value)).collect();
    let decoded = codes
        .iter()
        .flat_map(|code| decode_base36_pairs(code))
        .collect();
    UnfoldTrace {
        chain,
        codes,
        decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unfold_of_zero_is_empty() {
        let trace = unfold(0);
        assert!(trace.is_empty());
        assert!(trace.codes.is_empty());
        assert!(trace.decoded.is_empty());
    }

    #[test]
    fn unfold_of_small_number() {
        // 24 -> [24, 12, 6, 3] -> ["O", "C", "6", "3"]: all single characters
        let trace = unfold(24);
        assert_eq!(trace.codes, vec!["O", "C", "6", "3"]);
        assert!(trace.decoded.is_empty());

        // 1296 = 36^2 -> "100": 648 -> "I0", 324 -> "90", 162 -> "4I", 81 -> "29",
        // 27 -> "R", 9 -> "9", 3 -> "3"
        let trace = unfold(1296);
        assert_eq!(trace.chain, vec![1296, 648, 324, 162, 81, 27, 9, 3]);
        assert_eq!(trace.codes, vec!["100", "I0", "90", "4I", "29", "R", "9", "3"]);
        let expected: BTreeSet<u64> = [36, 0, 648, 324, 162, 81].into_iter().collect();
        assert_eq!(trace.decoded, expected);
    }

    #[test]
    fn unfold_is_idempotent() {
        assert_eq!(unfold(987_654_321), unfold(987_654_321));
    }
}
