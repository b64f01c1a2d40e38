//! Graph model: topology, communities and live vertex positions
//!
//! `GraphModel` owns everything the simulation and a renderer need. Topology
//! and communities are fixed at construction; positions change only through
//! [`GraphModel::step`], and the selected hierarchy level only through the
//! clamped setters.

use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::geometry::Point;
use crate::graph::CsrGraph;
use crate::io::{FormatRegistry, IoError, IoResult};
use crate::partition::Hierarchy;
use crate::simulation::{ForceLayout, SimulationConfig};

/// Color used when no palette entry is available
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub struct GraphModel {
    graph: CsrGraph,
    hierarchy: Hierarchy,
    positions: Vec<Point>,
    layout: ForceLayout,
}

impl GraphModel {
    /// Load the graph, then the partition, and seed positions from `rng`
    pub fn load(
        graph_path: &Path,
        partition_path: &Path,
        config: SimulationConfig,
        rng: &mut impl Rng,
    ) -> IoResult<Self> {
        let graph = FormatRegistry::with_defaults().read_graph(graph_path)?;
        let hierarchy = Hierarchy::load(partition_path)?;
        Self::from_parts(graph, hierarchy, config, rng)
    }

    /// Assemble a model from already loaded parts
    ///
    /// A non-empty hierarchy must cover exactly the graph's vertices.
    pub fn from_parts(
        graph: CsrGraph,
        hierarchy: Hierarchy,
        config: SimulationConfig,
        rng: &mut impl Rng,
    ) -> IoResult<Self> {
        if !hierarchy.is_empty() && hierarchy.n_vertices() != graph.n_vtx() {
            return Err(IoError::PartitionSizeMismatch {
                graph: graph.n_vtx(),
                partition: hierarchy.n_vertices(),
            });
        }

        let positions: Vec<Point> = (0..graph.n_vtx())
            .map(|_| {
                Point::new(
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                )
            })
            .collect();
        let layout = ForceLayout::new(config, graph.n_vtx());

        info!(
            n_vtx = graph.n_vtx(),
            n_edges = graph.n_edges(),
            levels = hierarchy.n_levels(),
            "graph model ready"
        );

        Ok(Self {
            graph,
            hierarchy,
            positions,
            layout,
        })
    }

    /// Advance the layout by one time step
    pub fn step(&mut self) {
        self.layout.step(&mut self.positions, &self.graph);
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn config(&self) -> &SimulationConfig {
        self.layout.config()
    }

    pub fn n_vtx(&self) -> usize {
        self.graph.n_vtx()
    }

    pub fn n_edges(&self) -> usize {
        self.graph.n_edges()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Positions as a flat `[x0, y0, x1, y1, ...]` buffer
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn n_hierarchy(&self) -> usize {
        self.hierarchy.n_levels()
    }

    pub fn current_level(&self) -> usize {
        self.hierarchy.current_level()
    }

    /// Select the hierarchy level used for coloring, clamped to the valid range
    pub fn set_hierarchy_level(&mut self, requested: usize) -> usize {
        self.hierarchy.set_level(requested)
    }

    /// Move the selected hierarchy level by `delta`, clamped
    pub fn shift_hierarchy_level(&mut self, delta: isize) -> usize {
        self.hierarchy.shift_level(delta)
    }

    pub fn community_of(&self, level: usize, vertex: usize) -> Option<usize> {
        self.hierarchy.community_of(level, vertex)
    }

    /// Community ids at the selected level, if a partition was loaded
    pub fn current_communities(&self) -> Option<&[usize]> {
        self.hierarchy.current()
    }

    /// Flat index buffer of undirected line segments
    pub fn line_indices(&self) -> Vec<u32> {
        self.graph.line_pairs().into_iter().flatten().collect()
    }

    /// Normalized weighted degree per vertex, for node sizing
    pub fn vertex_sizes(&self) -> Vec<f32> {
        self.graph.wdeg.iter().map(|&d| d as f32).collect()
    }

    /// Map each vertex's community at the selected level through `palette`
    ///
    /// Community ids wrap around the palette. Without a partition every vertex
    /// takes the first palette entry; an empty palette yields [`DEFAULT_COLOR`].
    pub fn colors(&self, palette: &[[f32; 3]]) -> Vec<[f32; 3]> {
        if palette.is_empty() {
            return vec![DEFAULT_COLOR; self.n_vtx()];
        }
        (0..self.n_vtx())
            .map(|v| {
                let community = self
                    .community_of(self.current_level(), v)
                    .unwrap_or(0);
                palette[community % palette.len()]
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn set_positions(&mut self, positions: &[Point]) {
        self.positions.copy_from_slice(positions);
    }
}
