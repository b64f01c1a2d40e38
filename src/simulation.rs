//! CPU force simulation for graph layout
//!
//! Each step accumulates three forces into a displacement buffer and then
//! moves every vertex by `time_step` times its displacement:
//!
//! - **Gravity**: constant-magnitude pull toward the origin
//! - **Repulsion**: every pair of vertices pushed apart by `v / |v|²`
//! - **Attraction**: every directed CSR entry pulls its endpoints together
//!   with a constant magnitude scaled by the edge weight
//!
//! This is first-order relaxation: no velocity is carried between steps.
//! With the `parallel` feature the O(n²) repulsion pass runs on rayon.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::graph::CsrGraph;

/// Default gravity strength (pull toward the origin)
pub const DEFAULT_GRAVITY: f32 = 0.1;

/// Default pairwise repulsion strength
pub const DEFAULT_REPULSION: f32 = 0.001;

/// Default edge attraction strength
pub const DEFAULT_ATTRACTION: f32 = 0.1;

/// Default integration step (1/20 time unit)
pub const DEFAULT_TIME_STEP: f32 = 0.05;

/// Distances below this contribute no force
pub const MIN_DISTANCE: f32 = 1e-6;

const MIN_DISTANCE_SQUARED: f32 = MIN_DISTANCE * MIN_DISTANCE;

/// Force constants and step size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravity strength `Fg`
    pub gravity: f32,
    /// Repulsion strength `Fr`
    pub repulsion: f32,
    /// Attraction strength `Fa`
    pub attraction: f32,
    /// Integration step `dt`
    pub time_step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            repulsion: DEFAULT_REPULSION,
            attraction: DEFAULT_ATTRACTION,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

/// Force layout with its reusable displacement buffer
#[derive(Debug, Clone)]
pub struct ForceLayout {
    config: SimulationConfig,
    displacement: Vec<Point>,
}

impl ForceLayout {
    /// Create a layout for `n_vtx` vertices
    pub fn new(config: SimulationConfig, n_vtx: usize) -> Self {
        Self {
            config,
            displacement: vec![Point::ZERO; n_vtx],
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Displacement applied by the most recent step
    pub fn displacement(&self) -> &[Point] {
        &self.displacement
    }

    /// Advance `positions` by one time step
    ///
    /// `positions` must hold one point per vertex of `graph`.
    pub fn step(&mut self, positions: &mut [Point], graph: &CsrGraph) {
        debug_assert_eq!(positions.len(), self.displacement.len());
        debug_assert_eq!(positions.len(), graph.n_vtx());

        let dp = &mut self.displacement;
        dp.fill(Point::ZERO);

        apply_gravity(positions, self.config.gravity, dp);
        apply_repulsion(positions, self.config.repulsion, dp);
        apply_attraction(positions, graph, self.config.attraction, dp);
        integrate(positions, dp, self.config.time_step);
    }
}

/// Pull every vertex toward the origin with magnitude `strength`
///
/// A vertex sitting on the origin has no direction and is left alone.
pub fn apply_gravity(positions: &[Point], strength: f32, dp: &mut [Point]) {
    for (p, d) in positions.iter().zip(dp.iter_mut()) {
        let r = p.length();
        if r < MIN_DISTANCE {
            continue;
        }
        *d -= *p * (strength / r);
    }
}

/// Repulsive displacement on `a` caused by `b`, or `None` when coincident
fn repulsion_between(a: Point, b: Point, strength: f32) -> Option<Point> {
    let v = a - b;
    let d2 = v.length_squared();
    if d2 < MIN_DISTANCE_SQUARED {
        return None;
    }
    Some(v * (strength / d2))
}

/// Push every pair of vertices apart
///
/// Each pair contributes equal and opposite displacements.
#[cfg(not(feature = "parallel"))]
pub fn apply_repulsion(positions: &[Point], strength: f32, dp: &mut [Point]) {
    let n = positions.len();

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(push) = repulsion_between(positions[i], positions[j], strength) {
                dp[i] += push;
                dp[j] -= push;
            }
        }
    }
}

/// Push every pair of vertices apart
///
/// Vertices are split across threads; each one sums the pushes it receives
/// from every other vertex into its own slot, so no slot is shared.
#[cfg(feature = "parallel")]
pub fn apply_repulsion(positions: &[Point], strength: f32, dp: &mut [Point]) {
    use rayon::prelude::*;

    dp.par_iter_mut().enumerate().for_each(|(i, d)| {
        let a = positions[i];
        for (j, &b) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(push) = repulsion_between(a, b, strength) {
                *d += push;
            }
        }
    });
}

/// Pull the endpoints of every directed CSR entry together
///
/// Undirected edges are stored in both directions and therefore pull twice.
pub fn apply_attraction(positions: &[Point], graph: &CsrGraph, strength: f32, dp: &mut [Point]) {
    for edge in graph.edges() {
        let v = positions[edge.src] - positions[edge.dest];
        let d = v.length();
        if d < MIN_DISTANCE {
            continue;
        }
        let pull = v * (strength * edge.weight as f32 / d);
        dp[edge.src] -= pull;
        dp[edge.dest] += pull;
    }
}

/// Move every vertex by `time_step` times its displacement
pub fn integrate(positions: &mut [Point], dp: &[Point], time_step: f32) {
    for (p, d) in positions.iter_mut().zip(dp) {
        *p += *d * time_step;
    }
}
