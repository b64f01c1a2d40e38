//! Canonical weighted graph in compressed sparse row (CSR) form
//!
//! Every reader funnels its edges through [`CsrGraph::from_edges`], which
//! sorts them by `(src, dest)`, merges duplicates by summing their weights and
//! normalizes edge weights and weighted degrees. Two encodings of the same
//! graph therefore produce the same CSR arrays.

/// Exclusive upper bound on vertex ids; every id fits in a `u32` index buffer
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// A directed, weighted edge
///
/// Equality is symmetric: `(a, b, w)` equals `(b, a, w)`, so an edge compares
/// equal to its mirror when both directions carry the same weight.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub src: usize,
    pub dest: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(src: usize, dest: usize, weight: f64) -> Self {
        Self { src, dest, weight }
    }

    /// The same edge walked in the opposite direction
    pub fn mirrored(&self) -> Self {
        Self {
            src: self.dest,
            dest: self.src,
            weight: self.weight,
        }
    }

    fn key(&self) -> (usize, usize) {
        (self.src, self.dest)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        let direct = self.src == other.src && self.dest == other.dest;
        let reverse = self.src == other.dest && self.dest == other.src;
        (direct || reverse) && self.weight == other.weight
    }
}

/// Weighted graph in CSR layout
///
/// Neighbors of vertex `v` occupy `adj[rowstart[v]..rowstart[v + 1]]`, sorted
/// ascending, with matching weights in `adjw`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    /// Row offsets, `n_vtx + 1` entries
    pub rowstart: Vec<usize>,
    /// Neighbor ids, `n_edges` entries
    pub adj: Vec<usize>,
    /// Edge weights normalized so the largest is 1.0
    pub adjw: Vec<f64>,
    /// Per-vertex weights, when the encoding carries them
    pub vtxw: Option<Vec<u64>>,
    /// Weighted degree normalized so the largest is 0.5
    pub wdeg: Vec<f64>,
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::from_edges(Vec::new(), 0)
    }
}

impl CsrGraph {
    /// Build the canonical CSR graph from a list of directed edges
    ///
    /// The vertex count is one past the largest endpoint, raised to
    /// `min_vertices` when the encoding declares isolated trailing vertices.
    /// Readers reject endpoints at or above [`MAX_VERTICES`], larger vertex counts
    /// and negative weights before calling this.
    pub fn from_edges(mut edges: Vec<Edge>, min_vertices: usize) -> Self {
        edges.sort_unstable_by_key(Edge::key);
        // Only neighbors after sorting are merged, so the sort key must be total.
        edges.dedup_by(|later, kept| {
            let same = later.key() == kept.key();
            if same {
                kept.weight += later.weight;
            }
            same
        });

        let n_vtx = edges
            .iter()
            .map(|e| e.src.max(e.dest) + 1)
            .max()
            .unwrap_or(0)
            .max(min_vertices);

        let mut rowstart = Vec::with_capacity(n_vtx + 1);
        let mut adj = Vec::with_capacity(edges.len());
        let mut adjw = Vec::with_capacity(edges.len());
        let mut wdeg = vec![0.0; n_vtx];
        let mut max_w = 0.0_f64;

        rowstart.push(0);
        let mut cursor = 0;
        for (v, degree) in wdeg.iter_mut().enumerate() {
            while let Some(edge) = edges.get(cursor).filter(|e| e.src == v) {
                adj.push(edge.dest);
                adjw.push(edge.weight);
                *degree += edge.weight;
                max_w = max_w.max(edge.weight);
                cursor += 1;
            }
            rowstart.push(adj.len());
        }

        normalize(&mut adjw, &mut wdeg, max_w);

        Self {
            rowstart,
            adj,
            adjw,
            vtxw: None,
            wdeg,
        }
    }

    /// Attach per-vertex weights; missing entries default to 1
    pub fn with_vertex_weights(mut self, mut vtxw: Vec<u64>) -> Self {
        vtxw.resize(self.n_vtx(), 1);
        self.vtxw = Some(vtxw);
        self
    }

    pub fn n_vtx(&self) -> usize {
        self.rowstart.len() - 1
    }

    pub fn n_edges(&self) -> usize {
        self.adj.len()
    }

    /// Neighbor ids of `v`, ascending
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[self.rowstart[v]..self.rowstart[v + 1]]
    }

    /// Normalized weights matching [`CsrGraph::neighbors`]
    pub fn neighbor_weights(&self, v: usize) -> &[f64] {
        &self.adjw[self.rowstart[v]..self.rowstart[v + 1]]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.rowstart[v + 1] - self.rowstart[v]
    }

    /// Every CSR entry as a directed edge with its normalized weight
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vtx()).flat_map(move |v| {
            self.neighbors(v)
                .iter()
                .zip(self.neighbor_weights(v))
                .map(move |(&dest, &weight)| Edge::new(v, dest, weight))
        })
    }

    /// Normalized weight of the entry `from -> to`, if present
    pub fn weight_between(&self, from: usize, to: usize) -> Option<f64> {
        let neighbors = self.neighbors(from);
        neighbors
            .binary_search(&to)
            .ok()
            .map(|i| self.neighbor_weights(from)[i])
    }

    /// Whether every entry has a mirror carrying the same weight
    pub fn is_symmetric(&self) -> bool {
        self.edges().all(|edge| {
            self.weight_between(edge.dest, edge.src)
                .is_some_and(|w| Edge::new(edge.dest, edge.src, w) == edge)
        })
    }

    /// Vertex pairs for a line index buffer, one per undirected edge
    ///
    /// Only entries with `neighbor > self` are emitted so that each segment is
    /// drawn once. Pairs with an id that does not fit a `u32` are skipped.
    pub fn line_pairs(&self) -> Vec<[u32; 2]> {
        self.edges()
            .filter(|e| e.dest > e.src)
            .filter_map(|e| Some([u32::try_from(e.src).ok()?, u32::try_from(e.dest).ok()?]))
            .collect()
    }
}

fn normalize(adjw: &mut [f64], wdeg: &mut [f64], max_w: f64) {
    if max_w > 0.0 {
        adjw.iter_mut().for_each(|w| *w /= max_w);
    }

    let max_deg = wdeg.iter().copied().fold(0.0_f64, f64::max);
    if max_deg > 0.0 {
        let scale = 2.0 * max_deg;
        wdeg.iter_mut().for_each(|d| *d /= scale);
    }
}
