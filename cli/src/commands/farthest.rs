//! `adjgraph farthest` command - Vertices with the longest BFS trace.

use std::fmt;
use std::path::Path;

use adjgraph_core::{farthest_vertices, Graph, GraphBuilder, VertexValue};
use anyhow::Result;
use serde::Serialize;

use super::{parse_vertex, RunOptions};
use crate::ingest::load_edge_list;
use crate::report::emit;

#[derive(Debug, Serialize)]
pub struct FarthestReport<T> {
    pub from: T,
    pub distance: usize,
    pub vertices: Vec<T>,
}

impl<T: VertexValue> FarthestReport<T> {
    pub fn run(graph: &Graph<T>, from: T) -> Result<Self> {
        let farthest = farthest_vertices(graph, &from)?;
        Ok(Self {
            from,
            distance: farthest.distance,
            vertices: farthest.vertices,
        })
    }
}

impl<T: fmt::Display> fmt::Display for FarthestReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.vertices.iter().map(|v| v.to_string()).collect();
        writeln!(f, "Farthest from {} (trace length {}):", self.from, self.distance)?;
        writeln!(f, "[{}]", names.join(", "))
    }
}

/// Execute the `farthest` command.
pub fn execute<B>(builder: &B, input: &Path, from: &str, opts: &RunOptions) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: fmt::Display + Serialize,
{
    let from = parse_vertex(builder, from)?;
    let graph = load_edge_list(builder, input, &opts.settings)?;
    emit(&FarthestReport::run(&graph, from)?, opts.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farthest_chain() {
        let mut g = Graph::new();
        g.load_arcs(vec![(0, 1), (1, 2), (2, 3)]);
        let report = FarthestReport::run(&g, 0).unwrap();
        assert_eq!(report.distance, 3);
        assert_eq!(report.vertices, vec![3]);
        assert_eq!(report.to_string(), "Farthest from 0 (trace length 3):\n[3]\n");
    }

    #[test]
    fn test_farthest_unknown_start() {
        let g: Graph<u32> = Graph::new();
        assert!(FarthestReport::run(&g, 1).is_err());
    }
}
