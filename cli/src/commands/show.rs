//! `adjgraph show` command - Read a TGF file and print the graph.

use std::fmt;
use std::path::Path;

use adjgraph_core::{Graph, GraphBuilder, VertexValue};
use anyhow::{Context, Result};
use serde::Serialize;

use super::RunOptions;
use crate::report::emit;

#[derive(Serialize)]
pub struct ShowReport<'a, T> {
    #[serde(skip)]
    graph: &'a Graph<T>,
    pub vertices: Vec<&'a T>,
    pub arcs: Vec<(&'a T, &'a T)>,
}

impl<'a, T: VertexValue> ShowReport<'a, T> {
    pub fn new(graph: &'a Graph<T>) -> Self {
        Self {
            graph,
            vertices: graph.vertices().collect(),
            arcs: graph.arcs().collect(),
        }
    }
}

impl<T: VertexValue + fmt::Display> fmt::Display for ShowReport<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.graph)
    }
}

/// Execute the `show` command.
pub fn execute<B>(builder: &B, file: &Path, opts: &RunOptions) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: fmt::Display + Serialize,
{
    let graph = builder
        .build(file)
        .with_context(|| format!("reading TGF {}", file.display()))?;
    emit(&ShowReport::new(&graph), opts.format)
}
