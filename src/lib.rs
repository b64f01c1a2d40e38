//! netviz - force-directed layout of weighted graphs with hierarchical community coloring.
//!
//! Graphs are read from an edge-list CSV or an adjacency-list file into a CSR
//! structure, paired with a multi-level community partition, and laid out by a
//! gravity/repulsion/attraction simulation. The resulting layout can be exported
//! as a JSON snapshot for rendering.

pub mod adjacency_reader;
pub mod config;
pub mod edge_list_reader;
pub mod export;
pub mod geometry;
pub mod graph;
pub mod io;
pub mod model;
pub mod partition;
pub mod session;
pub mod simulation;
