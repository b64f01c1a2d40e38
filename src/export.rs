//! Layout snapshot writer
//!
//! Captures the current state of a [`GraphModel`] as JSON: positions, node
//! sizes, communities at the selected level and the undirected line list. A
//! renderer can draw a frame from a snapshot alone.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::io::{IoError, IoResult};
use crate::model::GraphModel;

/// Version of the snapshot JSON layout
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub format_version: String,
    pub n_vtx: usize,
    /// Directed CSR entries, so an undirected edge counts twice
    pub n_edges: usize,
    pub n_hierarchy: usize,
    pub hierarchy_level: usize,
    pub positions: Vec<[f32; 2]>,
    pub sizes: Vec<f32>,
    /// Empty when no partition was loaded
    pub communities: Vec<usize>,
    pub lines: Vec<[u32; 2]>,
}

impl LayoutSnapshot {
    pub fn capture(model: &GraphModel) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            n_vtx: model.n_vtx(),
            n_edges: model.n_edges(),
            n_hierarchy: model.n_hierarchy(),
            hierarchy_level: model.current_level(),
            positions: model.positions().iter().map(|p| p.to_array()).collect(),
            sizes: model.vertex_sizes(),
            communities: model
                .current_communities()
                .map(<[usize]>::to_vec)
                .unwrap_or_default(),
            lines: model.graph().line_pairs(),
        }
    }

    pub fn to_json(&self) -> IoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| IoError::Write(e.to_string()))
    }

    pub fn write(&self, path: &Path) -> IoResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), n_vtx = self.n_vtx, "wrote layout snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::graph::{CsrGraph, Edge};
    use crate::partition::Hierarchy;
    use crate::simulation::SimulationConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn triangle_model(partition: &str) -> GraphModel {
        let edges = [(0, 1), (1, 2), (2, 0)]
            .into_iter()
            .flat_map(|(a, b)| {
                let e = Edge::new(a, b, 1.0);
                [e, e.mirrored()]
            })
            .collect();
        let graph = CsrGraph::from_edges(edges, 0);
        let hierarchy = Hierarchy::parse(partition).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut model =
            GraphModel::from_parts(graph, hierarchy, SimulationConfig::default(), &mut rng)
                .unwrap();
        model.set_positions(&[
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
        ]);
        model
    }

    #[test]
    fn snapshot_of_triangle() {
        let snapshot = LayoutSnapshot::capture(&triangle_model("0,0\n0,1\n1,1\n"));
        let json = serde_json::to_string(&snapshot).unwrap();

        insta::assert_snapshot!(json, @r#"{"format_version":"1.0","n_vtx":3,"n_edges":6,"n_hierarchy":2,"hierarchy_level":1,"positions":[[0.0,1.0],[1.0,0.0],[-1.0,0.0]],"sizes":[0.5,0.5,0.5],"communities":[0,1,1],"lines":[[0,1],[0,2],[1,2]]}"#);
    }

    #[test]
    fn no_partition_leaves_communities_empty() {
        let snapshot = LayoutSnapshot::capture(&triangle_model(""));

        assert_eq!(snapshot.n_hierarchy, 0);
        assert_eq!(snapshot.hierarchy_level, 0);
        assert!(snapshot.communities.is_empty());
    }

    #[test]
    fn write_and_read_back() {
        let snapshot = LayoutSnapshot::capture(&triangle_model("0,0\n0,1\n1,1\n"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        snapshot.write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: LayoutSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let snapshot = LayoutSnapshot::capture(&triangle_model(""));
        let result = snapshot.write(Path::new("/nonexistent/dir/layout.json"));

        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
