//! Hierarchical community assignments
//!
//! A partition file has one line per vertex, in vertex order. Column `k` of a
//! line is that vertex's community at hierarchy level `k`:
//!
//! ```text
//! 0,0
//! 0,1
//! 1,1
//! ```
//!
//! Every line must have as many columns as the first one.

use std::path::Path;

use tracing::debug;

use crate::io::{self, IoError, IoResult};

/// Per-level community ids plus the level currently selected for coloring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    levels: Vec<Vec<usize>>,
    current: usize,
}

impl Hierarchy {
    /// Build from per-level tables, selecting the last level
    pub fn from_levels(levels: Vec<Vec<usize>>) -> Self {
        let current = levels.len().saturating_sub(1);
        Self { levels, current }
    }

    /// Read a partition file
    pub fn load(path: &Path) -> IoResult<Self> {
        let content = io::read_to_string(path)?;
        let hierarchy = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            levels = hierarchy.n_levels(),
            vertices = hierarchy.n_vertices(),
            "loaded partition"
        );
        Ok(hierarchy)
    }

    /// Parse partition text; an empty input yields zero levels
    pub fn parse(content: &str) -> IoResult<Self> {
        let mut levels: Vec<Vec<usize>> = Vec::new();
        let mut blank_line = None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                blank_line.get_or_insert(line_no);
                continue;
            }
            if let Some(blank) = blank_line {
                return Err(IoError::MalformedLine {
                    line: blank,
                    reason: "blank line inside partition".to_string(),
                });
            }

            let cells = line
                .split(',')
                .map(|cell| {
                    let cell = cell.trim();
                    cell.parse::<usize>().map_err(|_| IoError::MalformedLine {
                        line: line_no,
                        reason: format!("invalid community id '{cell}'"),
                    })
                })
                .collect::<IoResult<Vec<_>>>()?;

            if levels.is_empty() {
                levels = vec![Vec::new(); cells.len()];
            } else if cells.len() != levels.len() {
                return Err(IoError::InconsistentPartitionColumns {
                    line: line_no,
                    expected: levels.len(),
                    found: cells.len(),
                });
            }

            for (level, community) in levels.iter_mut().zip(cells) {
                level.push(community);
            }
        }

        Ok(Self::from_levels(levels))
    }

    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    /// Number of vertices covered (zero when there are no levels)
    pub fn n_vertices(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the level used for coloring
    pub fn current_level(&self) -> usize {
        self.current
    }

    /// Select a level, clamped to `[0, n_levels - 1]`; returns the level set
    pub fn set_level(&mut self, requested: usize) -> usize {
        self.current = requested.min(self.n_levels().saturating_sub(1));
        self.current
    }

    /// Move the selected level by `delta`, clamped at both ends
    pub fn shift_level(&mut self, delta: isize) -> usize {
        self.set_level(self.current.saturating_add_signed(delta))
    }

    /// Community ids of every vertex at `level`
    pub fn level(&self, level: usize) -> Option<&[usize]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Community ids at the selected level
    pub fn current(&self) -> Option<&[usize]> {
        self.level(self.current)
    }

    pub fn community_of(&self, level: usize, vertex: usize) -> Option<usize> {
        self.level(level)?.get(vertex).copied()
    }
}
