//! Reader trait, loader errors and format dispatch
//!
//! Graph files come in two encodings (a CSV edge list and a 1-based adjacency
//! list). Each encoding has a [`GraphReader`] and the [`FormatRegistry`] picks
//! one by looking at the first non-blank line of the file, or by format id
//! when the caller already knows the encoding.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::adjacency_reader::AdjacencyReader;
use crate::edge_list_reader::EdgeListReader;
use crate::graph::CsrGraph;

/// Errors that can occur while loading or writing graph data
#[derive(Error, Debug)]
pub enum IoError {
    /// The input file could not be opened or read
    #[error("could not open {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first line matches neither graph grammar
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The header is well formed but names an unknown type or weight code
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A data line could not be parsed
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// A vertex id falls outside the range declared by the header
    #[error("line {line}: vertex {vertex} is outside 1..={n_vtx}")]
    VertexOutOfRange {
        line: usize,
        vertex: usize,
        n_vtx: usize,
    },

    /// A partition line has a different number of levels than the first line
    #[error("line {line}: expected {expected} partition columns, found {found}")]
    InconsistentPartitionColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The partition does not cover the same vertices as the graph
    #[error("partition covers {partition} vertices but the graph has {graph}")]
    PartitionSizeMismatch { graph: usize, partition: usize },

    /// The layout configuration is invalid
    #[error("invalid layout configuration: {0}")]
    Config(String),

    /// Output serialization failed
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for loader and writer operations
pub type IoResult<T> = Result<T, IoError>;

/// Read a whole input file, reporting any failure as [`IoError::FileNotFound`]
pub fn read_to_string(path: &Path) -> IoResult<String> {
    fs::read_to_string(path).map_err(|source| IoError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// First line of `content` that is neither blank nor a `%` comment, trimmed
pub fn header_line(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('%'))
}

/// A reader parses one textual graph encoding into the canonical CSR graph
pub trait GraphReader {
    /// Parse the full file contents
    fn parse(&self, content: &str) -> IoResult<CsrGraph>;

    /// Whether `header` belongs to this reader's grammar
    ///
    /// A reader may claim a header it later rejects with a more precise
    /// error (for instance an unknown type character).
    fn recognizes(&self, header: &str) -> bool;

    /// Identifier for this encoding (e.g., "edge-list")
    fn format_id(&self) -> &str;

    /// Read and parse the file at `input`
    fn read(&self, input: &Path) -> IoResult<CsrGraph> {
        let content = read_to_string(input)?;
        self.parse(&content)
    }
}

/// Registry of available graph readers
pub struct FormatRegistry {
    readers: Vec<Box<dyn GraphReader>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Create a registry with both graph encodings registered
    ///
    /// Currently registers `EdgeListReader` (edge-list) and
    /// `AdjacencyReader` (adjacency).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(EdgeListReader::new()));
        registry.register_reader(Box::new(AdjacencyReader::new()));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn GraphReader>) {
        self.readers.push(reader);
    }

    /// Find a reader by format ID
    pub fn reader_for_format(&self, format_id: &str) -> Option<&dyn GraphReader> {
        self.readers
            .iter()
            .find(|r| r.format_id().eq_ignore_ascii_case(format_id))
            .map(|r| r.as_ref())
    }

    /// Find the reader whose grammar matches the given header line
    pub fn reader_for_header(&self, header: &str) -> IoResult<&dyn GraphReader> {
        self.readers
            .iter()
            .find(|r| r.recognizes(header))
            .map(|r| r.as_ref())
            .ok_or_else(|| IoError::MalformedHeader(header.to_string()))
    }

    /// Load a graph, detecting the encoding from its header
    pub fn read_graph(&self, path: &Path) -> IoResult<CsrGraph> {
        let content = read_to_string(path)?;
        let header = header_line(&content)
            .ok_or_else(|| IoError::MalformedHeader(format!("{} is empty", path.display())))?;
        let reader = self.reader_for_header(header)?;
        info!(format = reader.format_id(), path = %path.display(), "reading graph");
        reader.parse(&content)
    }

    /// Load a graph with an explicitly chosen encoding
    pub fn read_graph_as(&self, path: &Path, format_id: &str) -> IoResult<CsrGraph> {
        let reader = self
            .reader_for_format(format_id)
            .ok_or_else(|| IoError::UnsupportedFormat(format_id.to_string()))?;
        info!(format = reader.format_id(), path = %path.display(), "reading graph");
        reader.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn header_line_skips_leading_blank_lines() {
        assert_eq!(header_line("\n  \n# type:u edges:1\n0,1,1"), Some("# type:u edges:1"));
        assert_eq!(header_line("   \n\n"), None);
    }

    #[test]
    fn header_line_skips_comments() {
        assert_eq!(header_line("% generated\n\n2 1 -1\n2\n1\n"), Some("2 1 -1"));
        assert_eq!(header_line("% only a comment\n"), None);
    }

    #[test]
    fn read_graph_detects_commented_adjacency_list() {
        let file = write_temp("% generated\n2 1 -1\n2\n1\n");
        let graph = FormatRegistry::with_defaults().read_graph(file.path()).unwrap();

        assert_eq!(graph.n_vtx(), 2);
        assert_eq!(graph.n_edges(), 2);
    }

    #[test]
    fn registry_finds_reader_by_format_case_insensitive() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.reader_for_format("edge-list").is_some());
        assert!(registry.reader_for_format("ADJACENCY").is_some());
        assert!(registry.reader_for_format("graphml").is_none());
    }

    #[test]
    fn registry_dispatches_on_header() {
        let registry = FormatRegistry::with_defaults();

        let csv = registry.reader_for_header("# type:d edges:4").unwrap();
        assert_eq!(csv.format_id(), "edge-list");

        let adjacency = registry.reader_for_header("4 3 -1").unwrap();
        assert_eq!(adjacency.format_id(), "adjacency");
    }

    #[test]
    fn unknown_header_is_malformed() {
        let registry = FormatRegistry::with_defaults();

        assert!(matches!(
            registry.reader_for_header("graph {"),
            Err(IoError::MalformedHeader(_))
        ));
    }

    #[test]
    fn read_graph_detects_edge_list() {
        let file = write_temp("# type:u edges:1\n0,1,2.0\n");
        let graph = FormatRegistry::with_defaults()
            .read_graph(file.path())
            .expect("Should parse edge list");

        assert_eq!(graph.n_vtx(), 2);
        assert_eq!(graph.n_edges(), 2);
    }

    #[test]
    fn read_graph_detects_adjacency_list() {
        let file = write_temp("2 1 -1\n2\n1\n");
        let graph = FormatRegistry::with_defaults()
            .read_graph(file.path())
            .expect("Should parse adjacency list");

        assert_eq!(graph.n_vtx(), 2);
        assert_eq!(graph.n_edges(), 2);
    }

    #[test]
    fn read_graph_as_rejects_unknown_format() {
        let file = write_temp("# type:u edges:1\n0,1,2.0\n");
        let result = FormatRegistry::with_defaults().read_graph_as(file.path(), "dot");

        assert!(matches!(result, Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn read_graph_as_forces_encoding() {
        let file = write_temp("2 1 -1\n2\n1\n");
        let result = FormatRegistry::with_defaults().read_graph_as(file.path(), "edge-list");

        assert!(matches!(result, Err(IoError::MalformedHeader(_))));
    }

    #[test]
    fn empty_file_is_malformed() {
        let file = write_temp("\n\n");
        let result = FormatRegistry::with_defaults().read_graph(file.path());

        assert!(matches!(result, Err(IoError::MalformedHeader(_))));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let result = FormatRegistry::with_defaults().read_graph(Path::new("nonexistent.csv"));

        match result {
            Err(IoError::FileNotFound { path, .. }) => {
                assert_eq!(path, PathBuf::from("nonexistent.csv"));
            }
            _ => panic!("Expected FileNotFound error"),
        }
    }

    #[test]
    fn io_error_display() {
        let err = IoError::UnsupportedFormat("weight type 7".to_string());
        assert_eq!(err.to_string(), "unsupported format: weight type 7");

        let err = IoError::InconsistentPartitionColumns {
            line: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "line 3: expected 2 partition columns, found 1"
        );
    }
}
