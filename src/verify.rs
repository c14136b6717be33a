//! Verification driver: graph6 lines in, log-concavity violations out.
//!
//! For every graph the driver aggregates the stable-partition histogram once, then for each
//! colour budget `k` in `0..max_colours` computes the coefficient sequence and checks it.
//! The partition forest is built once per run; the graph buffer and the histogram are
//! overwritten in place for each line.

use crate::coefficients::compute_coefficients;
use crate::concavity::check_log_concave;
use crate::config::VerifyConfig;
use crate::error::{Result, VerifyError};
use crate::graph::Graph;
use crate::histogram::Histogram;
use crate::partition::PartitionForest;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ============================================================================
// Reports
// ============================================================================

/// A position `i` where the sequence for budget `k` of the graph on `line` is not
/// log-concave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Violation {
    /// 1-based input line of the graph.
    pub line: usize,
    /// Colour budget.
    pub k: usize,
    /// Violating interior position.
    pub i: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line = {} -- k = {} -- i = {}", self.line, self.k, self.i)
    }
}

/// What happened to a single input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, ignored.
    Blank,
    /// Malformed or wrong-order graph, reported and skipped.
    Skipped,
    /// Graph processed; the violations found (possibly none).
    Checked(Vec<Violation>),
}

/// Totals for a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read.
    pub lines: usize,
    /// Graphs processed.
    pub graphs: u64,
    /// Lines skipped because they did not hold a usable graph.
    pub skipped: u64,
    /// Violations reported.
    pub violations: u64,
}

#[derive(Serialize)]
struct HistogramRecord<'a> {
    line: usize,
    order: usize,
    cells: Vec<&'a [u64]>,
}

// ============================================================================
// Verifier
// ============================================================================

/// Owns everything a run needs: the shared forest and the per-graph buffers.
pub struct Verifier {
    config: VerifyConfig,
    forest: Arc<PartitionForest>,
    graph: Graph,
    histogram: Histogram,
    histogram_sink: Option<BufWriter<File>>,
}

impl Verifier {
    /// Validates `config` and generates the partition forest for its order.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the histogram dump file cannot
    /// be created.
    pub fn new(config: VerifyConfig) -> Result<Self> {
        config.validate()?;
        info!(order = config.order, "generating set partitions");
        let forest = Arc::new(PartitionForest::generate(config.order));
        info!(partitions = forest.len(), "partition forest ready");
        Self::with_forest(config, forest)
    }

    /// Builds a verifier around an existing forest.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the forest was generated for a
    /// different order, or the histogram dump file cannot be created.
    pub fn with_forest(config: VerifyConfig, forest: Arc<PartitionForest>) -> Result<Self> {
        config.validate()?;
        if forest.order() != config.order {
            return Err(VerifyError::Config(format!(
                "forest generated for {} vertices, run configured for {}",
                forest.order(),
                config.order
            )));
        }
        let histogram_sink = match &config.histogram_out {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };
        Ok(Self {
            graph: Graph::empty(config.order),
            histogram: Histogram::new(config.order),
            config,
            forest,
            histogram_sink,
        })
    }

    /// The shared partition forest.
    pub fn forest(&self) -> &Arc<PartitionForest> {
        &self.forest
    }

    /// Histogram of the most recently processed graph.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// The most recently decoded graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Runs the pipeline on `graph` as if it had been read from input line `line`.
    ///
    /// # Errors
    /// Returns an error if the graph has the wrong order or the histogram dump fails.
    pub fn check_graph(&mut self, line: usize, graph: &Graph) -> Result<Vec<Violation>> {
        if graph.order() != self.config.order {
            return Err(VerifyError::Config(format!(
                "graph has {} vertices, run configured for {}",
                graph.order(),
                self.config.order
            )));
        }
        self.graph.clone_from(graph);
        self.check_current(line)
    }

    fn check_current(&mut self, line: usize) -> Result<Vec<Violation>> {
        self.histogram.aggregate(&self.forest, &self.graph);
        self.dump_histogram(line)?;

        let mut violations = Vec::new();
        for k in 0..self.config.max_colours {
            let b = compute_coefficients(k, &self.histogram, self.config.max_colours);
            debug!(line, k, coefficients = ?b);
            violations.extend(
                check_log_concave(&b)
                    .into_iter()
                    .map(|i| Violation { line, k, i }),
            );
        }
        Ok(violations)
    }

    fn dump_histogram(&mut self, line: usize) -> Result<()> {
        if let Some(sink) = self.histogram_sink.as_mut() {
            let record = HistogramRecord {
                line,
                order: self.histogram.order(),
                cells: self.histogram.iter_rows().collect(),
            };
            serde_json::to_writer(&mut *sink, &record)?;
            writeln!(sink)?;
        }
        Ok(())
    }

    /// Decodes and checks one raw input line.
    ///
    /// Malformed lines (including bytes that are not UTF-8) and graphs of the wrong order
    /// are reported with `warn!` and skipped.
    ///
    /// # Errors
    /// Returns an error only if the histogram dump fails.
    pub fn process_line(&mut self, line_no: usize, line: &[u8]) -> Result<LineOutcome> {
        if line.trim_ascii().is_empty() {
            return Ok(LineOutcome::Blank);
        }
        if let Err(e) = self.graph.read_graph6_bytes(line) {
            warn!(line = line_no, claimed_order = ?e.claimed_order(), "skipping graph: {e}");
            return Ok(LineOutcome::Skipped);
        }
        if self.graph.order() != self.config.order {
            warn!(
                line = line_no,
                claimed_order = self.graph.order(),
                expected = self.config.order,
                "skipping graph: wrong number of vertices"
            );
            return Ok(LineOutcome::Skipped);
        }
        Ok(LineOutcome::Checked(self.check_current(line_no)?))
    }

    /// Processes every line of `input`, writing violations and progress lines to `out`.
    ///
    /// # Errors
    /// Returns an error if reading, writing or the histogram dump fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line_no = summary.lines + 1;
            summary.lines = line_no;

            match self.process_line(line_no, &buf)? {
                LineOutcome::Blank => {}
                LineOutcome::Skipped => summary.skipped += 1,
                LineOutcome::Checked(violations) => {
                    summary.graphs += 1;
                    summary.violations += write_violations(&mut out, &violations)?;

                    if summary.graphs % self.config.progress_every == 0 {
                        writeln!(out, "At line: {line_no}")?;
                        out.flush()?;
                    }
                }
            }
        }

        out.flush()?;
        if let Some(sink) = self.histogram_sink.as_mut() {
            sink.flush()?;
        }
        info!(
            lines = summary.lines,
            graphs = summary.graphs,
            skipped = summary.skipped,
            violations = summary.violations,
            "run complete"
        );
        Ok(summary)
    }
}

/// Writes one report line per violation and returns how many were written.
fn write_violations<W: Write>(out: &mut W, violations: &[Violation]) -> Result<u64> {
    for v in violations {
        writeln!(out, "{v}")?;
    }
    Ok(violations.len() as u64)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_text(config: VerifyConfig, text: &str) -> (RunSummary, String) {
        let mut verifier = Verifier::new(config).unwrap();
        let mut out = Vec::new();
        let summary = verifier.run(Cursor::new(text), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn violation_format() {
        let v = Violation { line: 12, k: 3, i: 2 };
        assert_eq!(v.to_string(), "line = 12 -- k = 3 -- i = 2");
    }

    #[test]
    fn path_on_four_vertices_has_no_violation() {
        let mut verifier = Verifier::new(VerifyConfig::new(4)).unwrap();
        assert_eq!(
            verifier.process_line(1, b"Ch\n").unwrap(),
            LineOutcome::Checked(Vec::new())
        );
        assert_eq!(verifier.graph(), &Graph::path(4));
        assert_eq!(verifier.histogram().total(), 15);
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        let text = "Ch\n\nC\nBw\nC~\n~~~\n";
        let (summary, out) = run_text(VerifyConfig::new(4), text);
        assert_eq!(
            summary,
            RunSummary {
                lines: 6,
                graphs: 2,
                skipped: 3,
                violations: 0,
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn violations_are_written_one_per_line() {
        let violations = [
            Violation { line: 7, k: 5, i: 2 },
            Violation { line: 7, k: 6, i: 4 },
        ];
        let mut out = Vec::new();
        assert_eq!(write_violations(&mut out, &violations).unwrap(), 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "line = 7 -- k = 5 -- i = 2\nline = 7 -- k = 6 -- i = 4\n"
        );

        let mut out = Vec::new();
        assert_eq!(write_violations(&mut out, &[]).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn non_utf8_line_is_skipped() {
        let mut verifier = Verifier::new(VerifyConfig::new(4)).unwrap();
        let mut out = Vec::new();
        let input: &[u8] = b"Ch\n\xFF\xFE\nC~\n";
        let summary = verifier.run(input, &mut out).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                lines: 3,
                graphs: 2,
                skipped: 1,
                violations: 0,
            }
        );
        assert_eq!(verifier.graph(), &Graph::complete(4));
        assert!(out.is_empty());
    }

    #[test]
    fn last_line_without_newline_is_checked() {
        let (summary, _) = run_text(VerifyConfig::new(4), "Ch\nC~");
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.graphs, 2);
    }

    #[test]
    fn progress_lines_follow_processed_graphs() {
        let mut config = VerifyConfig::new(3);
        config.progress_every = 2;
        let text = "Bw\n\nBW\nBo\nB?\n";
        let (summary, out) = run_text(config, text);
        assert_eq!(summary.graphs, 4);
        assert_eq!(out, "At line: 3\nAt line: 5\n");
    }

    #[test]
    fn connected_graphs_on_five_vertices_are_log_concave() {
        // One representative per isomorphism class.
        let lines = [
            "Ds_", "Dk_", "D{_", "DY_", "Dy_", "D]_", "D}_", "Dj_", "Dz_", "D~_", "D]o",
            "D}o", "Dto", "DLo", "Dlo", "D|o", "D^o", "D~o", "Dvw", "D~w", "D~{",
        ];
        let text = lines.join("\n");
        let (summary, out) = run_text(VerifyConfig::new(5), &text);
        assert_eq!(summary.graphs, 21);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.violations, 0);
        assert!(out.is_empty(), "{out}");
    }

    #[test]
    fn check_graph_rejects_wrong_order() {
        let mut verifier = Verifier::new(VerifyConfig::new(4)).unwrap();
        assert!(verifier.check_graph(1, &Graph::path(5)).is_err());
        assert!(verifier.check_graph(1, &Graph::complete(4)).unwrap().is_empty());
    }

    #[test]
    fn with_forest_rejects_mismatched_forest() {
        let forest = Arc::new(PartitionForest::generate(3));
        let result = Verifier::with_forest(VerifyConfig::new(4), forest);
        assert!(matches!(result, Err(VerifyError::Config(_))));
    }

    #[test]
    fn forest_is_shared_between_verifiers() {
        let forest = Arc::new(PartitionForest::generate(4));
        let mut a = Verifier::with_forest(VerifyConfig::new(4), Arc::clone(&forest)).unwrap();
        let b = Verifier::with_forest(VerifyConfig::new(4), Arc::clone(&forest)).unwrap();
        assert!(Arc::ptr_eq(a.forest(), b.forest()));
        a.check_graph(1, &Graph::path(4)).unwrap();
        assert_eq!(b.histogram().total(), 0);
    }

    #[test]
    fn histogram_dump_writes_one_record_per_graph() {
        let path = std::env::temp_dir().join(format!(
            "logconc-histogram-{}.jsonl",
            std::process::id()
        ));
        let mut config = VerifyConfig::new(4);
        config.histogram_out = Some(path.clone());
        let (summary, _) = run_text(config, "Ch\nbad\nC~\n");
        assert_eq!(summary.graphs, 2);

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["line"], 1);
        assert_eq!(records[0]["order"], 4);
        assert_eq!(
            records[0]["cells"],
            serde_json::json!([[0, 0, 1, 3, 1], [1, 5, 3, 0, 0], [1, 0, 0, 0, 0]])
        );
        assert_eq!(records[1]["line"], 3);
    }
}
