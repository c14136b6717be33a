//! Small undirected graphs (currently \(n \le 62\)) stored as a packed upper triangle, plus
//! graph6 decoding and encoding.
//!
//! The adjacency bit of the pair `(u, v)` with `u < v` lives at index `v*(v-1)/2 + u`, which
//! is exactly the order in which graph6 lists the upper triangle (column by column). Decoding
//! is therefore a straight copy of the bit stream.

use rand::Rng;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Largest order expressible with the single-byte graph6 header.
pub const MAX_ORDER: usize = 62;

/// Every graph6 byte is a 6-bit value plus this offset.
pub const G6_OFFSET: u8 = 63;

/// Largest byte that may appear in a graph6 line.
const G6_MAX_BYTE: u8 = G6_OFFSET + 0b11_1111;

// ============================================================================
// Compile-time lookup tables
// ============================================================================

/// Precomputed `choose(n, 2) = n*(n-1)/2` for n in 0..=MAX_ORDER.
const CHOOSE2: [usize; MAX_ORDER + 1] = {
    let mut table = [0usize; MAX_ORDER + 1];
    let mut i = 0usize;
    while i <= MAX_ORDER {
        table[i] = (i * i.saturating_sub(1)) / 2;
        i += 1;
    }
    table
};

/// Returns `n * (n-1) / 2` via lookup.
#[inline(always)]
pub const fn choose2(n: usize) -> usize {
    debug_assert!(n < CHOOSE2.len());
    CHOOSE2[n]
}

/// Index of the unordered pair `{u, v}` in the packed triangle.
#[inline(always)]
fn pair_index(u: usize, v: usize) -> usize {
    debug_assert!(u != v, "no self-loops in a simple graph");
    let (lo, hi) = if u < v { (u, v) } else { (v, u) };
    choose2(hi) + lo
}

// ============================================================================
// Graph
// ============================================================================

/// A simple undirected graph on `n` vertices.
///
/// Representation: `adj` holds one flag per unordered pair, `n*(n-1)/2` entries in total.
/// The buffer is reused by [`Graph::read_graph6`], so a driver can decode line after line
/// into the same allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Graph {
    n: usize,
    adj: Vec<bool>,
}

impl Graph {
    /// Creates an edgeless graph on `n` vertices.
    pub fn empty(n: usize) -> Self {
        debug_assert!(n <= MAX_ORDER, "This implementation assumes n <= {MAX_ORDER}");
        Self {
            n,
            adj: vec![false; choose2(n)],
        }
    }

    /// Creates the complete graph \(K_n\).
    pub fn complete(n: usize) -> Self {
        debug_assert!(n <= MAX_ORDER, "This implementation assumes n <= {MAX_ORDER}");
        Self {
            n,
            adj: vec![true; choose2(n)],
        }
    }

    /// Creates the path `0 - 1 - ... - (n-1)`.
    pub fn path(n: usize) -> Self {
        let mut graph = Self::empty(n);
        for v in 1..n {
            graph.set_edge(v - 1, v, true);
        }
        graph
    }

    /// Creates a graph from an edge list.
    ///
    /// # Panics
    /// Panics in debug builds on self-loops or out-of-range endpoints.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::empty(n);
        for &(u, v) in edges {
            graph.set_edge(u, v, true);
        }
        graph
    }

    /// Samples an Erdős–Rényi graph \(G(n, p)\).
    pub fn new_random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut graph = Self::empty(n);
        for flag in &mut graph.adj {
            *flag = rng.random_bool(p);
        }
        graph
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Returns whether the edge `{u, v}` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.n && v < self.n);
        self.adj[pair_index(u, v)]
    }

    /// Adds or removes the edge `{u, v}`.
    #[inline]
    pub fn set_edge(&mut self, u: usize, v: usize, present: bool) {
        debug_assert!(u < self.n && v < self.n);
        let idx = pair_index(u, v);
        self.adj[idx] = present;
    }

    /// Returns the total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.adj.iter().filter(|&&e| e).count()
    }

    /// Replaces the graph by its complement.
    pub fn complement_in_place(&mut self) {
        for flag in &mut self.adj {
            *flag = !*flag;
        }
    }

    /// Returns the complement graph.
    pub fn complement(&self) -> Self {
        let mut graph = self.clone();
        graph.complement_in_place();
        graph
    }

    /// Returns `true` if every vertex is reachable from vertex 0.
    ///
    /// Graphs on zero or one vertex count as connected.
    pub fn is_connected(&self) -> bool {
        if self.n <= 1 {
            return true;
        }
        let mut seen = vec![false; self.n];
        let mut queue = VecDeque::with_capacity(self.n);
        seen[0] = true;
        queue.push_back(0usize);
        let mut reached = 1usize;

        while let Some(u) = queue.pop_front() {
            for v in 0..self.n {
                if !seen[v] && v != u && self.has_edge(u, v) {
                    seen[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }
        reached == self.n
    }
}

impl fmt::Display for Graph {
    /// Writes the adjacency matrix as `n` rows of `0/1` characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                let edge = u8::from(i != j && self.has_edge(i, j));
                write!(f, "{edge}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// graph6
// ============================================================================

/// Errors encountered while decoding a graph6 line.
///
/// Every variant except [`Graph6Error::Empty`] carries the vertex count claimed by the
/// header byte, which is what diagnostics report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Graph6Error {
    /// The line contained no characters.
    #[error("graph6 line is empty")]
    Empty,
    /// The header byte is below the graph6 offset.
    #[error("found graph with {n} vertices")]
    NegativeOrder {
        /// Claimed order.
        n: i32,
    },
    /// The header claims more vertices than the single-byte form allows.
    #[error("found graph with {n} vertices (greater than max of {max})")]
    TooManyVertices {
        /// Claimed order.
        n: i32,
        /// Largest supported order.
        max: usize,
    },
    /// A data byte lies outside `63..=126`.
    #[error("graph on {n} vertices has invalid byte {byte:#04x} at position {pos}")]
    InvalidByte {
        /// Claimed order.
        n: i32,
        /// Byte offset within the line.
        pos: usize,
        /// The offending byte.
        byte: u8,
    },
    /// The bit stream ends before the upper triangle is filled.
    #[error("graph6 string for {n} vertices ended prematurely: expected {expected} data bytes, got {got}")]
    Truncated {
        /// Claimed order.
        n: i32,
        /// Data bytes required.
        expected: usize,
        /// Data bytes present.
        got: usize,
    },
    /// Characters remain after the upper triangle is filled.
    #[error("graph6 string for {n} vertices is too long: expected {expected} data bytes, got {got}")]
    TooLong {
        /// Claimed order.
        n: i32,
        /// Data bytes required.
        expected: usize,
        /// Data bytes present.
        got: usize,
    },
}

impl Graph6Error {
    /// Vertex count claimed by the header, if there was a header at all.
    pub fn claimed_order(&self) -> Option<i32> {
        match *self {
            Graph6Error::Empty => None,
            Graph6Error::NegativeOrder { n }
            | Graph6Error::TooManyVertices { n, .. }
            | Graph6Error::InvalidByte { n, .. }
            | Graph6Error::Truncated { n, .. }
            | Graph6Error::TooLong { n, .. } => Some(n),
        }
    }
}

impl Graph {
    /// Decodes a graph6 line into `self`, reusing the adjacency buffer.
    ///
    /// Trailing whitespace is ignored. The line is fully validated before the buffer is
    /// touched, so on error `self` still holds the previous graph.
    ///
    /// # Errors
    /// Returns an error if the line is empty, the claimed order is negative or above
    /// [`MAX_ORDER`], a byte is outside the graph6 alphabet, or the data section is shorter
    /// or longer than `ceil(n*(n-1)/2 / 6)` bytes.
    pub fn read_graph6(&mut self, line: &str) -> Result<(), Graph6Error> {
        self.read_graph6_bytes(line.as_bytes())
    }

    /// Decodes a raw graph6 line into `self`.
    ///
    /// Input need not be UTF-8: any byte outside the graph6 alphabet is reported as
    /// [`Graph6Error::InvalidByte`] (or, in the header, as an out-of-range order).
    ///
    /// # Errors
    /// See [`Graph::read_graph6`].
    pub fn read_graph6_bytes(&mut self, line: &[u8]) -> Result<(), Graph6Error> {
        let bytes = line.trim_ascii_end();
        let (&header, data) = bytes.split_first().ok_or(Graph6Error::Empty)?;

        let claimed = i32::from(header) - i32::from(G6_OFFSET);
        if claimed < 0 {
            return Err(Graph6Error::NegativeOrder { n: claimed });
        }
        let n = claimed as usize;
        if n > MAX_ORDER {
            return Err(Graph6Error::TooManyVertices {
                n: claimed,
                max: MAX_ORDER,
            });
        }

        if let Some(pos) = data
            .iter()
            .position(|b| !(G6_OFFSET..=G6_MAX_BYTE).contains(b))
        {
            return Err(Graph6Error::InvalidByte {
                n: claimed,
                pos: pos + 1,
                byte: data[pos],
            });
        }

        let bits = choose2(n);
        let expected = bits.div_ceil(6);
        if data.len() < expected {
            return Err(Graph6Error::Truncated {
                n: claimed,
                expected,
                got: data.len(),
            });
        }
        if data.len() > expected {
            return Err(Graph6Error::TooLong {
                n: claimed,
                expected,
                got: data.len(),
            });
        }

        self.n = n;
        self.adj.clear();
        self.adj.reserve(bits);
        'fill: for &byte in data {
            let value = byte - G6_OFFSET;
            for shift in (0..6).rev() {
                if self.adj.len() == bits {
                    break 'fill; // padding bits
                }
                self.adj.push((value >> shift) & 1 == 1);
            }
        }
        debug_assert_eq!(self.adj.len(), bits);
        Ok(())
    }

    /// Decodes a graph6 line into a fresh graph.
    ///
    /// # Errors
    /// See [`Graph::read_graph6`].
    pub fn from_graph6(line: &str) -> Result<Self, Graph6Error> {
        let mut graph = Self::default();
        graph.read_graph6(line)?;
        Ok(graph)
    }

    /// Encodes the graph as a graph6 line (without the trailing newline).
    ///
    /// Padding bits of the last byte are zero.
    pub fn to_graph6(&self) -> String {
        debug_assert!(self.n <= MAX_ORDER);
        let mut out = String::with_capacity(1 + self.adj.len().div_ceil(6));
        out.push(char::from(G6_OFFSET + self.n as u8));
        for chunk in self.adj.chunks(6) {
            let mut value = 0u8;
            for (i, &present) in chunk.iter().enumerate() {
                if present {
                    value |= 1 << (5 - i);
                }
            }
            out.push(char::from(G6_OFFSET + value));
        }
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
