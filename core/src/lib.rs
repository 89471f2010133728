//! adjgraph-core: generic adjacency-list directed graph.
//!
//! Stores vertices of any hashable value type with per-vertex successor
//! lists, and provides target-terminated DFS/BFS traversal traces, degree
//! statistics and Trivial Graph Format (TGF) I/O.
//! No I/O beyond `std::io` seams; CSV ingestion and reporting live in
//! `adjgraph-cli`.

mod degree;
mod error;
mod graph;
pub mod tgf;
mod traversal;

pub use degree::{
    degree_centrality, most_important, vertices_with_degree, DegreeResult, DegreeStats,
};
pub use error::{GraphError, Result};
pub use graph::{Graph, Successors, VertexId, VertexValue};
pub use tgf::{
    read_tgf, save_tgf, write_tgf, GraphBuilder, IntegerGraphBuilder, StringGraphBuilder,
};
pub use traversal::{breadth_first_search, depth_first_search, farthest_vertices, Farthest};
