//! Edge list reader
//!
//! Reads the CSV edge list encoding:
//!
//! ```text
//! # type:u edges:3
//! 0,1,1.0
//! 1,2,1.0
//! 2,0,1.0
//! ```
//!
//! `type:u` expands each line into two mirrored directed edges, `type:d` keeps
//! them as written. Vertex ids are 0-based.

use tracing::{debug, warn};

use crate::graph::{CsrGraph, Edge, MAX_VERTICES};
use crate::io::{GraphReader, IoError, IoResult};

/// Whether each line describes one or two directed edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Undirected,
    Directed,
}

/// Parsed `# type:<u|d> edges:<N>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeListHeader {
    pub orientation: Orientation,
    /// Number of data lines declared by the header
    pub edges: usize,
}

impl EdgeListHeader {
    pub fn parse(line: &str) -> IoResult<Self> {
        let malformed = || IoError::MalformedHeader(line.to_string());

        let body = line.trim().strip_prefix('#').ok_or_else(malformed)?;
        let mut fields = body.split_whitespace();
        let kind = fields
            .next()
            .and_then(|f| f.strip_prefix("type:"))
            .ok_or_else(malformed)?;
        let count = fields
            .next()
            .and_then(|f| f.strip_prefix("edges:"))
            .ok_or_else(malformed)?;
        if fields.next().is_some() {
            return Err(malformed());
        }

        let orientation = match kind {
            "u" => Orientation::Undirected,
            "d" => Orientation::Directed,
            other => {
                return Err(IoError::UnsupportedFormat(format!(
                    "edge list type '{other}'"
                )));
            }
        };
        let edges = count.parse().map_err(|_| malformed())?;

        Ok(Self { orientation, edges })
    }

    /// Number of directed edges the header promises
    pub fn directed_edges(&self) -> usize {
        match self.orientation {
            Orientation::Undirected => self.edges.saturating_mul(2),
            Orientation::Directed => self.edges,
        }
    }
}

/// Reader for `src,dest,weight` edge lists
pub struct EdgeListReader;

impl EdgeListReader {
    /// Create a new edge list reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReader for EdgeListReader {
    fn parse(&self, content: &str) -> IoResult<CsrGraph> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| IoError::MalformedHeader("empty edge list".to_string()))?;
        let header = EdgeListHeader::parse(header)?;

        // Header counts are untrusted; never reserve beyond the file size.
        let mut edges = Vec::with_capacity(header.directed_edges().min(content.len()));
        for (line_no, line) in lines {
            let edge = parse_edge(line, line_no)?;
            edges.push(edge);
            if header.orientation == Orientation::Undirected {
                edges.push(edge.mirrored());
            }
        }

        if edges.len() != header.directed_edges() {
            warn!(
                declared = header.directed_edges(),
                found = edges.len(),
                "edge count differs from header"
            );
        }

        let graph = CsrGraph::from_edges(edges, 0);
        debug!(
            n_vtx = graph.n_vtx(),
            n_edges = graph.n_edges(),
            "built CSR from edge list"
        );
        Ok(graph)
    }

    fn recognizes(&self, header: &str) -> bool {
        header.trim_start().starts_with('#')
    }

    fn format_id(&self) -> &str {
        "edge-list"
    }
}

fn parse_edge(line: &str, line_no: usize) -> IoResult<Edge> {
    let malformed = |reason: String| IoError::MalformedLine {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [src, dest, weight] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected src,dest,weight but found {} fields",
            fields.len()
        )));
    };

    let vertex = |token: &str, role: &str| -> IoResult<usize> {
        let id: usize = token
            .parse()
            .map_err(|_| malformed(format!("invalid {role} vertex '{token}'")))?;
        if id >= MAX_VERTICES {
            return Err(malformed(format!(
                "{role} vertex {id} exceeds the limit of {MAX_VERTICES} vertices"
            )));
        }
        Ok(id)
    };
    let src = vertex(src, "source")?;
    let dest = vertex(dest, "destination")?;
    let weight: f64 = weight
        .parse()
        .map_err(|_| malformed(format!("invalid weight '{weight}'")))?;
    if !weight.is_finite() {
        return Err(malformed(format!("weight {weight} is not finite")));
    }
    if weight < 0.0 {
        return Err(malformed(format!("weight {weight} is negative")));
    }

    Ok(Edge::new(src, dest, weight))
}
