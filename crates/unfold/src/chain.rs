use std::collections::BTreeSet;

/// Distinct quotients seen while trial-dividing `n`, largest first.
///
/// `n` itself is always the first element. Each time a factor is divided
/// out, the remaining quotient is kept when it is above 1, and a prime
/// cofactor left over after trial division is kept as well. The result is
/// therefore not a prime factorization: composite intermediates such as 12
/// and 6 for `n = 24` are part of the chain.
///
/// Non-positive input has nothing to unfold and yields an empty chain.
#[must_use]
pub fn factorization_chain(n: i64) -> Vec<i64> {
    if n <= 0 {
        return Vec::new();
    }

    let mut chain = BTreeSet::from([n]);
    let mut current = n;

    for factor in [2, 3] {
        strip_factor(&mut current, factor, &mut chain);
    }

    // 6k ± 1 candidates; `i <= current / i` is `i * i <= current` without overflow.
    let mut i: i64 = 5;
    while i <= current / i {
        strip_factor(&mut current, i, &mut chain);
        strip_factor(&mut current, i + 2, &mut chain);
        i += 6;
    }

    if current > 1 {
        chain.insert(current);
    }

    chain.into_iter().rev().collect()
}

fn strip_factor(current: &mut i64, factor: i64, chain: &mut BTreeSet<i64>) {
    while *current % factor == 0 {
        *current /= factor;
        if *current > 1 {
            chain.insert(*current);
        }
    }
}
