//! Run configuration for the log-concavity verifier.

use crate::error::{Result, VerifyError};
use crate::graph::MAX_ORDER;
use std::path::PathBuf;

/// Graphs processed between two `At line:` progress reports.
pub const DEFAULT_PROGRESS_EVERY: u64 = 1_000;

/// Verification parameters.
///
/// Every size-dependent structure derives from `order`: the partition forest, the histogram
/// dimensions and, by default, the coefficient sequence length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Number of vertices of every graph in the run.
    pub order: usize,
    /// Length of each coefficient sequence; colour budgets `k` range over `0..max_colours`.
    pub max_colours: usize,
    /// Progress report period, in processed graphs.
    pub progress_every: u64,
    /// Optional JSON-lines dump of every graph's histogram.
    pub histogram_out: Option<PathBuf>,
}

impl VerifyConfig {
    /// Defaults for graphs on `order` vertices (`max_colours = order + 2`).
    pub fn new(order: usize) -> Self {
        Self {
            order,
            max_colours: order + 2,
            progress_every: DEFAULT_PROGRESS_EVERY,
            histogram_out: None,
        }
    }

    /// Checks the configuration for impossible values.
    ///
    /// # Errors
    /// Returns [`VerifyError::Config`] if the order exceeds what graph6 can encode, or if
    /// `max_colours` or `progress_every` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.order > MAX_ORDER {
            return Err(VerifyError::Config(format!(
                "order {} exceeds the graph6 maximum of {MAX_ORDER}",
                self.order
            )));
        }
        if self.max_colours == 0 {
            return Err(VerifyError::Config("max_colours must be positive".into()));
        }
        if self.progress_every == 0 {
            return Err(VerifyError::Config("progress_every must be positive".into()));
        }
        Ok(())
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self::new(9)
    }
}
