//! Adjacency list reader
//!
//! Reads the whitespace-delimited adjacency encoding. The header is
//! `<nVtx> <nEdges> <weightType>`, followed by one line per vertex listing its
//! 1-based neighbors. Depending on the weight type, each neighbor is followed
//! by an edge weight and/or the line starts with the vertex weight:
//!
//! ```text
//! 3 2 11
//! 5 2 0.5
//! 1 1 0.5 3 2.0
//! 2 2 2.0
//! ```
//!
//! Lines starting with `%` are comments. `nEdges` counts undirected edges, so
//! a well-formed file lists `2 * nEdges` neighbor entries.

use tracing::{debug, warn};

use crate::graph::{CsrGraph, Edge, MAX_VERTICES};
use crate::io::{GraphReader, IoError, IoResult};

/// Weight layout of an adjacency list file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightType {
    Unweighted,
    EdgeWeighted,
    NodeWeighted,
    EdgeNodeWeighted,
}

impl WeightType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unweighted),
            1 => Some(Self::EdgeWeighted),
            10 => Some(Self::NodeWeighted),
            11 => Some(Self::EdgeNodeWeighted),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Unweighted => -1,
            Self::EdgeWeighted => 1,
            Self::NodeWeighted => 10,
            Self::EdgeNodeWeighted => 11,
        }
    }

    pub fn has_edge_weights(self) -> bool {
        matches!(self, Self::EdgeWeighted | Self::EdgeNodeWeighted)
    }

    pub fn has_node_weights(self) -> bool {
        matches!(self, Self::NodeWeighted | Self::EdgeNodeWeighted)
    }
}

/// Parsed `<nVtx> <nEdges> <weightType>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyHeader {
    pub n_vtx: usize,
    /// Undirected edge count
    pub n_edges: usize,
    pub weight_type: WeightType,
}

impl AdjacencyHeader {
    pub fn parse(line: &str) -> IoResult<Self> {
        let malformed = || IoError::MalformedHeader(line.to_string());

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [n_vtx, n_edges, code] = fields.as_slice() else {
            return Err(malformed());
        };

        let n_vtx: usize = n_vtx.parse().map_err(|_| malformed())?;
        let n_edges: usize = n_edges.parse().map_err(|_| malformed())?;
        if n_vtx > MAX_VERTICES || n_edges.checked_mul(2).is_none() {
            return Err(malformed());
        }
        let code: i32 = code.parse().map_err(|_| malformed())?;
        let weight_type = WeightType::from_code(code)
            .ok_or_else(|| IoError::UnsupportedFormat(format!("weight type {code}")))?;

        Ok(Self {
            n_vtx,
            n_edges,
            weight_type,
        })
    }

    /// Number of directed neighbor entries a well-formed file lists
    pub fn directed_edges(&self) -> usize {
        self.n_edges.saturating_mul(2)
    }
}

/// Reader for 1-based adjacency lists
pub struct AdjacencyReader;

impl AdjacencyReader {
    /// Create a new adjacency list reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for AdjacencyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReader for AdjacencyReader {
    fn parse(&self, content: &str) -> IoResult<CsrGraph> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.starts_with('%'))
            .skip_while(|(_, line)| line.is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| IoError::MalformedHeader("empty adjacency list".to_string()))?;
        let header = AdjacencyHeader::parse(header)?;
        debug!(weight_type = header.weight_type.code(), "adjacency header");

        // Header counts are untrusted; never reserve beyond the file size.
        let mut edges = Vec::with_capacity(header.directed_edges().min(content.len()));
        let mut vtxw = Vec::with_capacity(header.n_vtx.min(content.len()));

        for (line_no, line) in lines {
            let v = vtxw.len();
            if v == header.n_vtx {
                if line.is_empty() {
                    continue;
                }
                return Err(IoError::VertexOutOfRange {
                    line: line_no,
                    vertex: v + 1,
                    n_vtx: header.n_vtx,
                });
            }
            vtxw.push(parse_vertex_line(line, line_no, v, &header, &mut edges)?);
        }

        if vtxw.len() < header.n_vtx {
            warn!(
                declared = header.n_vtx,
                found = vtxw.len(),
                "missing vertex lines treated as isolated vertices"
            );
        }
        if edges.len() != header.directed_edges() {
            warn!(
                declared = header.directed_edges(),
                found = edges.len(),
                "edge count differs from header"
            );
        }

        let graph = CsrGraph::from_edges(edges, header.n_vtx).with_vertex_weights(vtxw);
        debug!(
            n_vtx = graph.n_vtx(),
            n_edges = graph.n_edges(),
            "built CSR from adjacency list"
        );
        Ok(graph)
    }

    fn recognizes(&self, header: &str) -> bool {
        header
            .split_whitespace()
            .next()
            .is_some_and(|first| first.parse::<i64>().is_ok())
    }

    fn format_id(&self) -> &str {
        "adjacency"
    }
}

/// Parse the line for vertex `v`, pushing its edges and returning its weight
fn parse_vertex_line(
    line: &str,
    line_no: usize,
    v: usize,
    header: &AdjacencyHeader,
    edges: &mut Vec<Edge>,
) -> IoResult<u64> {
    let malformed = |reason: String| IoError::MalformedLine {
        line: line_no,
        reason,
    };
    let mut tokens = line.split_whitespace();

    let vertex_weight = if header.weight_type.has_node_weights() {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(format!("missing weight for vertex {}", v + 1)))?;
        token
            .parse()
            .map_err(|_| malformed(format!("invalid vertex weight '{token}'")))?
    } else {
        1
    };

    while let Some(token) = tokens.next() {
        let neighbor: usize = token
            .parse()
            .map_err(|_| malformed(format!("invalid neighbor '{token}'")))?;
        if neighbor == 0 || neighbor > header.n_vtx {
            return Err(IoError::VertexOutOfRange {
                line: line_no,
                vertex: neighbor,
                n_vtx: header.n_vtx,
            });
        }

        let weight = if header.weight_type.has_edge_weights() {
            let token = tokens
                .next()
                .ok_or_else(|| malformed(format!("neighbor {neighbor} has no edge weight")))?;
            let weight: f64 = token
                .parse()
                .map_err(|_| malformed(format!("invalid edge weight '{token}'")))?;
            if !weight.is_finite() {
                return Err(malformed(format!("edge weight {weight} is not finite")));
            }
            if weight < 0.0 {
                return Err(malformed(format!("edge weight {weight} is negative")));
            }
            weight
        } else {
            1.0
        };

        edges.push(Edge::new(v, neighbor - 1, weight));
    }

    Ok(vertex_weight)
}
