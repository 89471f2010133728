//! `adjgraph search` command - Traversal trace between two vertices.

use std::fmt;
use std::path::Path;

use adjgraph_core::{breadth_first_search, depth_first_search, Graph, GraphBuilder, VertexValue};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use super::{parse_vertex, RunOptions};
use crate::ingest::load_edge_list;
use crate::report::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Dfs,
    Bfs,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dfs => write!(f, "DFS"),
            Algorithm::Bfs => write!(f, "BFS"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchReport<T> {
    pub algorithm: Algorithm,
    pub from: T,
    pub to: T,
    /// Whether the target shows up in the trace at all.
    pub reached: bool,
    pub trace: Vec<T>,
    /// Trace length minus one.
    pub steps: usize,
}

impl<T: VertexValue> SearchReport<T> {
    pub fn run(graph: &Graph<T>, algorithm: Algorithm, from: T, to: T) -> Result<Self> {
        let trace = match algorithm {
            Algorithm::Dfs => depth_first_search(graph, &from, &to),
            Algorithm::Bfs => breadth_first_search(graph, &from, &to),
        }
        .with_context(|| format!("{} from {:?}", algorithm, from))?;

        Ok(Self {
            algorithm,
            reached: trace.contains(&to),
            steps: trace.len().saturating_sub(1),
            trace,
            from,
            to,
        })
    }
}

impl<T: fmt::Display> fmt::Display for SearchReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trace: Vec<String> = self.trace.iter().map(|v| v.to_string()).collect();
        writeln!(f, "{} {} -> {}", self.algorithm, self.from, self.to)?;
        writeln!(f, "[{}]", trace.join(", "))?;
        if self.reached {
            writeln!(f, "reached in {} steps", self.steps)
        } else {
            writeln!(f, "target not reached ({} vertices visited)", self.trace.len())
        }
    }
}

/// Execute the `search` command.
pub fn execute<B>(
    builder: &B,
    input: &Path,
    from: &str,
    to: &str,
    algorithm: Algorithm,
    opts: &RunOptions,
) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: fmt::Display + Serialize,
{
    let from = parse_vertex(builder, from)?;
    let to = parse_vertex(builder, to)?;
    let graph = load_edge_list(builder, input, &opts.settings)?;
    emit(&SearchReport::run(&graph, algorithm, from, to)?, opts.format)
}
