//! # Stable-Partition Log-Concavity Verifier
//!
//! Exhaustive, exact verification of a log-concavity conjecture over small graphs.
//!
//! For a graph \(G\) on \(n\) vertices and a colour budget \(k\), every set partition of
//! \(V(G)\) is classified by how many of its parts are stable (independent) sets. Weighting
//! those counts with falling factorials gives a sequence \(b_0, \dots, b_{k}\) (padded with
//! zeros) that interpolates between \(k^n\) and the chromatic polynomial \(P(G, k)\). The
//! verifier checks \(b_i^2 \ge b_{i-1} b_{i+1}\) for every interior \(i\), in `BigUint`.
//!
//! This crate provides:
//! - Persistent, structurally shared set partitions generated once per run.
//! - A packed-triangle graph with graph6 decoding and encoding.
//! - The histogram, coefficient and log-concavity stages as pure functions.
//! - A line-oriented driver that reports violations and progress.
//!
//! ## Quick Start
//!
//! ```
//! use logconc::coefficients::compute_coefficients;
//! use logconc::concavity::check_log_concave;
//! use logconc::graph::Graph;
//! use logconc::histogram::aggregate;
//! use logconc::partition::PartitionForest;
//!
//! let forest = PartitionForest::generate(4);
//! assert_eq!(forest.len(), 15);
//!
//! // Path 0-1-2-3
//! let graph = Graph::from_graph6("Ch").unwrap();
//! let histogram = aggregate(&forest, &graph);
//! let b = compute_coefficients(4, &histogram, 6);
//! assert_eq!(b[0].to_string(), "256");
//! assert_eq!(b[4].to_string(), "108");
//! assert!(check_log_concave(&b).is_empty());
//! ```
//!
//! ## Running Over a Graph List
//!
//! ```
//! use logconc::verify::Verifier;
//! use logconc::config::VerifyConfig;
//!
//! let mut verifier = Verifier::new(VerifyConfig::new(4))?;
//! let mut out = Vec::new();
//! let summary = verifier.run("Ch\nC~\n".as_bytes(), &mut out)?;
//! assert_eq!(summary.graphs, 2);
//! assert!(out.is_empty()); // no violations
//! # Ok::<(), logconc::error::VerifyError>(())
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Graph buffer and graph6 codec.
//! - [`partition`]: Persistent set partitions and Bell numbers.
//! - [`stable`]: Stable-set checks.
//! - [`histogram`]: Partition counts by (non-stable, stable) parts.
//! - [`coefficients`]: Falling-factorial transform in exact arithmetic.
//! - [`concavity`]: Log-concavity check.
//! - [`verify`]: Driver over graph6 lines.
//! - [`tools`]: graph6 complement and connectivity filters.
//! - [`validate`]: Bundled known results.
//!
//! ## Performance Notes
//!
//! - The forest holds \(B_n\) partitions, so memory and time grow like the Bell numbers;
//!   \(n \le 12\) is the practical range.
//! - Each graph costs one pass over the forest plus `max_colours` coefficient sequences.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs

pub mod coefficients;
pub mod concavity;
pub mod config;
pub mod error;
pub mod graph;
pub mod histogram;
pub mod partition;
pub mod stable;
pub mod tools;
pub mod validate;
pub mod verify;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::coefficients::{compute_coefficients, falling_factorial};
    pub use crate::concavity::check_log_concave;
    pub use crate::config::VerifyConfig;
    pub use crate::error::{Result, VerifyError};
    pub use crate::graph::{Graph, Graph6Error};
    pub use crate::histogram::{aggregate, Histogram};
    pub use crate::partition::{Partition, PartitionForest};
    pub use crate::stable::{count_stable, is_stable};
    pub use crate::verify::{RunSummary, Verifier, Violation};
}
