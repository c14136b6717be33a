//! Exact coefficient sequences from a stable-partition histogram.
//!
//! For a colour budget `k` and position `i <= k`:
//!
//! \[ b_i = \sum_{ns + s \le k,\ ns \le k - i} (k)_{ns + s} \cdot H[ns][s] \]
//!
//! where \((k)_j\) is the falling factorial. Positions beyond `k` are zero. `b_0` counts all
//! \(k^n\) colourings and `b_k` is the chromatic polynomial at `k`; in between, non-stable
//! parts are limited to the last `k - i` colours. Everything is computed in `BigUint`.

use crate::histogram::Histogram;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// The falling factorial \((k)_j = k (k-1) \cdots (k-j+1)\); zero when `j > k`.
pub fn falling_factorial(k: usize, j: usize) -> BigUint {
    if j > k {
        return BigUint::zero();
    }
    ((k - j + 1)..=k).fold(BigUint::one(), |acc, factor| acc * BigUint::from(factor))
}

/// Computes `b_0, ..., b_{len-1}` for colour budget `k`.
pub fn compute_coefficients(k: usize, histogram: &Histogram, len: usize) -> Vec<BigUint> {
    let factorials: Vec<BigUint> = (0..=k).map(|j| falling_factorial(k, j)).collect();

    (0..len)
        .map(|i| {
            let mut b = BigUint::zero();
            if i > k {
                return b;
            }
            for ns in 0..histogram.rows().min(k - i + 1) {
                for (s, &count) in histogram.row(ns).iter().enumerate() {
                    if ns + s > k {
                        break;
                    }
                    if count != 0 {
                        b += &factorials[ns + s] * BigUint::from(count);
                    }
                }
            }
            b
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::histogram::aggregate;
    use crate::partition::PartitionForest;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn falling_factorial_small_values() {
        assert_eq!(falling_factorial(0, 0), big(1));
        assert_eq!(falling_factorial(5, 0), big(1));
        assert_eq!(falling_factorial(5, 1), big(5));
        assert_eq!(falling_factorial(5, 2), big(20));
        assert_eq!(falling_factorial(5, 5), big(120));
        assert_eq!(falling_factorial(5, 6), big(0));
        assert_eq!(falling_factorial(0, 1), big(0));
    }

    #[test]
    fn falling_factorial_is_exact_beyond_u64() {
        let expected: BigUint = "265252859812191058636308480000000".parse().unwrap();
        assert_eq!(falling_factorial(30, 30), expected);
    }

    #[test]
    fn path_on_four_vertices_k4() {
        let histogram = aggregate(&PartitionForest::generate(4), &Graph::path(4));
        let b = compute_coefficients(4, &histogram, 6);
        let expected: Vec<BigUint> = [256u64, 256, 256, 244, 108, 0].map(big).to_vec();
        assert_eq!(b, expected);
    }

    #[test]
    fn triangle_k3() {
        let histogram = aggregate(&PartitionForest::generate(3), &Graph::complete(3));
        let b = compute_coefficients(3, &histogram, 5);
        let expected: Vec<BigUint> = [27u64, 27, 27, 6, 0].map(big).to_vec();
        assert_eq!(b, expected);
    }

    #[test]
    fn first_coefficient_counts_all_colourings() {
        let n = 5;
        let forest = PartitionForest::generate(n);
        let graph = Graph::from_edges(n, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let histogram = aggregate(&forest, &graph);
        for k in 0..=n + 2 {
            let b = compute_coefficients(k, &histogram, n + 2);
            assert_eq!(b[0], BigUint::from(k).pow(n as u32), "k = {k}");
        }
    }

    #[test]
    fn last_coefficient_is_chromatic_polynomial_of_path() {
        // P(P_n, k) = k (k-1)^(n-1)
        let n = 6;
        let histogram = aggregate(&PartitionForest::generate(n), &Graph::path(n));
        for k in 1..=n + 1 {
            let b = compute_coefficients(k, &histogram, n + 2);
            let expected = BigUint::from(k) * BigUint::from(k - 1).pow((n - 1) as u32);
            assert_eq!(b[k], expected, "k = {k}");
        }
    }

    #[test]
    fn positions_beyond_k_are_zero() {
        let histogram = aggregate(&PartitionForest::generate(4), &Graph::path(4));
        let b = compute_coefficients(2, &histogram, 6);
        assert!(b[3..].iter().all(Zero::is_zero));
        assert_eq!(compute_coefficients(0, &histogram, 3), vec![big(0); 3]);
    }

    #[test]
    fn empty_graph_on_zero_vertices() {
        let histogram = aggregate(&PartitionForest::generate(0), &Graph::empty(0));
        assert_eq!(compute_coefficients(0, &histogram, 2), vec![big(1), big(0)]);
    }
}
