//! Exact log-concavity check.

use num_bigint::BigUint;

/// Returns every interior index `i` with `b[i]^2 < b[i-1] * b[i+1]`.
///
/// Equality is not a violation. Sequences with fewer than three entries have no interior
/// index and never violate.
pub fn check_log_concave(b: &[BigUint]) -> Vec<usize> {
    b.windows(3)
        .enumerate()
        .filter_map(|(x, w)| {
            let (prev, mid, next) = (&w[0], &w[1], &w[2]);
            (mid * mid < prev * next).then_some(x + 1)
        })
        .collect()
}
