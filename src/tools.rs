//! Line-oriented graph6 utilities: complementing graphs and filtering connected ones.
//!
//! Both read one graph6 string per line, skip blank lines, report malformed lines with
//! `warn!` and carry on.

use crate::error::Result;
use crate::graph::Graph;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Line counts for a filter run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Non-blank lines read.
    pub read: u64,
    /// Lines written to the output.
    pub written: u64,
    /// Lines rejected as malformed or too large.
    pub rejected: u64,
}

/// Writes the graph6 string of each input graph's complement.
///
/// # Errors
/// Returns an error if reading or writing fails.
pub fn complement_stream<R: BufRead, W: Write>(input: R, mut out: W) -> Result<FilterStats> {
    let mut stats = FilterStats::default();
    let mut graph = Graph::default();
    let mut lines = RawLines::new(input);

    while let Some((line_no, line)) = lines.next_line()? {
        if line.trim_ascii().is_empty() {
            continue;
        }
        stats.read += 1;
        match graph.read_graph6_bytes(line) {
            Ok(()) => {
                graph.complement_in_place();
                writeln!(out, "{}", graph.to_graph6())?;
                stats.written += 1;
            }
            Err(e) => {
                warn!(line = line_no, claimed_order = ?e.claimed_order(), "complement: {e}");
                stats.rejected += 1;
            }
        }
    }

    out.flush()?;
    info!(complements = stats.written, "graph complements generated");
    Ok(stats)
}

/// Copies each connected input graph with at most `max_order` vertices to the output,
/// unchanged apart from trailing whitespace.
///
/// # Errors
/// Returns an error if reading or writing fails.
pub fn connected_stream<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    max_order: usize,
) -> Result<FilterStats> {
    let mut stats = FilterStats::default();
    let mut graph = Graph::default();
    let mut lines = RawLines::new(input);

    while let Some((line_no, line)) = lines.next_line()? {
        if line.trim_ascii().is_empty() {
            continue;
        }
        stats.read += 1;
        if let Err(e) = graph.read_graph6_bytes(line) {
            warn!(line = line_no, claimed_order = ?e.claimed_order(), "connected: {e}");
            stats.rejected += 1;
            continue;
        }
        if graph.order() > max_order {
            warn!(
                line = line_no,
                claimed_order = graph.order(),
                max_order,
                "connected: graph exceeds maximum order"
            );
            stats.rejected += 1;
            continue;
        }
        if graph.is_connected() {
            out.write_all(line.trim_ascii_end())?;
            out.write_all(b"\n")?;
            stats.written += 1;
        }
    }

    out.flush()?;
    info!(
        connected = stats.written,
        total = stats.read - stats.rejected,
        "connected graphs found"
    );
    Ok(stats)
}

/// Byte lines of a reader with their 1-based line numbers. Lines are not required to be
/// UTF-8, so a stray binary line reaches the decoder instead of failing the read.
struct RawLines<R> {
    input: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> RawLines<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some((self.line_no, &self.buf)))
    }
}
