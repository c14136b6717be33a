//! Fast deterministic validation of the pipeline against known results.

use crate::coefficients::compute_coefficients;
use crate::concavity::check_log_concave;
use crate::graph::Graph;
use crate::histogram::aggregate;
use crate::partition::{bell_number, PartitionForest};
use num_bigint::BigUint;

// ============================================================================
// Bundled cases
// ============================================================================

/// A graph with a hand-computed coefficient sequence.
struct KnownCase {
    name: &'static str,
    graph6: &'static str,
    k: usize,
    expected: &'static [u64],
}

const KNOWN_CASES: &[KnownCase] = &[
    // Path 0-1-2-3: b_0 = 4^4, b_4 = 4 * 3^3 proper colourings.
    KnownCase {
        name: "P4",
        graph6: "Ch",
        k: 4,
        expected: &[256, 256, 256, 244, 108, 0],
    },
    // Triangle: b_3 = 3! proper colourings.
    KnownCase {
        name: "K3",
        graph6: "Bw",
        k: 3,
        expected: &[27, 27, 27, 6, 0],
    },
    // Edgeless on 3 vertices: every part stable, (2)_3 = 0.
    KnownCase {
        name: "E3",
        graph6: "B?",
        k: 2,
        expected: &[8, 8, 8, 0, 0],
    },
];

// ============================================================================
// Public API
// ============================================================================

/// Validates partition counts against the Bell numbers and the bundled coefficient
/// sequences.
///
/// # Errors
/// Returns an error message describing the first mismatch.
pub fn validate_known_results() -> Result<(), String> {
    for n in 0..=8 {
        validate_partition_count(n)?;
    }
    for case in KNOWN_CASES {
        validate_case(case)?;
    }
    Ok(())
}

/// Checks that the forest for `n` has exactly \(B_n\) partitions.
///
/// # Errors
/// Returns an error message if the count differs.
pub fn validate_partition_count(n: usize) -> Result<(), String> {
    let forest = PartitionForest::generate(n);
    let expected = bell_number(n).ok_or_else(|| format!("B_{n} does not fit in u64"))?;
    if forest.len() as u64 != expected {
        return Err(format!(
            "n = {n}: generated {} partitions, expected B_{n} = {expected}",
            forest.len()
        ));
    }
    Ok(())
}

// ============================================================================
// Internal
// ============================================================================

fn validate_case(case: &KnownCase) -> Result<(), String> {
    let name = case.name;
    let graph = Graph::from_graph6(case.graph6).map_err(|e| format!("{name}: {e}"))?;
    let forest = PartitionForest::generate(graph.order());
    let histogram = aggregate(&forest, &graph);

    let total = histogram.total();
    if Some(total) != bell_number(graph.order()) {
        return Err(format!("{name}: histogram total {total} is not a Bell number"));
    }

    let b = compute_coefficients(case.k, &histogram, case.expected.len());
    let expected: Vec<BigUint> = case.expected.iter().copied().map(BigUint::from).collect();
    if b != expected {
        return Err(format!(
            "{name}: k = {} produced {b:?}, expected {expected:?}",
            case.k
        ));
    }

    let violations = check_log_concave(&b);
    if !violations.is_empty() {
        return Err(format!("{name}: unexpected violations at {violations:?}"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_results_are_valid() {
        validate_known_results().unwrap();
    }

    #[test]
    fn bundled_graphs_have_expected_order() {
        for case in KNOWN_CASES {
            let graph = Graph::from_graph6(case.graph6).unwrap();
            assert_eq!(case.expected.len(), graph.order() + 2, "{}", case.name);
        }
    }

    #[test]
    fn validate_case_reports_mismatch() {
        let case = KnownCase {
            name: "bad",
            graph6: "Ch",
            k: 4,
            expected: &[256, 256, 256, 244, 109, 0],
        };
        let err = validate_case(&case).unwrap_err();
        assert!(err.starts_with("bad: k = 4"), "{err}");
    }

    #[test]
    fn validate_case_reports_malformed_graph() {
        let case = KnownCase {
            name: "malformed",
            graph6: "Ch?",
            k: 1,
            expected: &[],
        };
        assert!(validate_case(&case).unwrap_err().contains("too long"));
    }
}
