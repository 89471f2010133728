//! `adjgraph stats` command - Degree statistics for an edge list.

use std::fmt;
use std::path::Path;

use adjgraph_core::{
    degree_centrality, most_important, DegreeStats, Graph, GraphBuilder, VertexValue,
};
use anyhow::Result;
use serde::Serialize;

use super::RunOptions;
use crate::ingest::load_edge_list;
use crate::report::emit;

/// Serializable mirror of `DegreeStats`; the core crate carries no serde.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub min: usize,
    pub max: usize,
    pub average: f64,
}

impl From<DegreeStats> for DegreeSummary {
    fn from(s: DegreeStats) -> Self {
        Self {
            min: s.min,
            max: s.max,
            average: s.average,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVertex<T> {
    pub vertex: T,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsReport<T> {
    pub vertices: usize,
    pub arcs: usize,
    pub undirected: bool,
    /// `None` for an empty graph.
    pub out_degree: Option<DegreeSummary>,
    pub in_degree: Option<DegreeSummary>,
    pub most_important: Vec<T>,
    pub top: Vec<RankedVertex<T>>,
    pub memory_bytes: usize,
}

impl<T: VertexValue> StatsReport<T> {
    pub fn compute(graph: &Graph<T>, top_n: usize) -> Self {
        let summary = |degrees: Vec<usize>| -> Option<DegreeSummary> {
            DegreeStats::from_degrees(&degrees).ok().map(Into::into)
        };

        let top = degree_centrality(graph, top_n)
            .into_iter()
            .map(|r| RankedVertex {
                vertex: r.vertex,
                out_degree: r.out_degree,
                in_degree: r.in_degree,
                total_degree: r.total_degree,
            })
            .collect();

        Self {
            vertices: graph.vertex_count(),
            arcs: graph.arc_count(),
            undirected: graph.is_undirected(),
            out_degree: summary(graph.outdegrees()),
            in_degree: summary(graph.indegrees()),
            most_important: most_important(graph),
            top,
            memory_bytes: graph.memory_usage(),
        }
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, label: &str, s: Option<&DegreeSummary>) -> fmt::Result {
    match s {
        Some(s) => writeln!(
            f,
            "{:<12} min {:>6}  max {:>6}  avg {:>9.3}",
            label, s.min, s.max, s.average
        ),
        None => writeln!(f, "{:<12} n/a", label),
    }
}

impl<T: fmt::Display> fmt::Display for StatsReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices:    {}", self.vertices)?;
        writeln!(f, "Arcs:        {}", self.arcs)?;
        writeln!(f, "Undirected:  {}", self.undirected)?;
        writeln!(f, "Memory:      {:.1} KB", self.memory_bytes as f64 / 1024.0)?;
        write_summary(f, "Out-degree", self.out_degree.as_ref())?;
        write_summary(f, "In-degree", self.in_degree.as_ref())?;

        let important: Vec<String> = self.most_important.iter().map(|v| v.to_string()).collect();
        writeln!(f, "Most important: [{}]", important.join(", "))?;

        if !self.top.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:>5} {:>8} {:>8} {:>8}  vertex", "rank", "total", "out", "in")?;
            for (rank, r) in self.top.iter().enumerate() {
                writeln!(
                    f,
                    "{:>5} {:>8} {:>8} {:>8}  {}",
                    rank + 1,
                    r.total_degree,
                    r.out_degree,
                    r.in_degree,
                    r.vertex
                )?;
            }
        }
        Ok(())
    }
}

/// Execute the `stats` command.
pub fn execute<B>(builder: &B, input: &Path, top_n: usize, opts: &RunOptions) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: fmt::Display + Serialize,
{
    let graph = load_edge_list(builder, input, &opts.settings)?;
    emit(&StatsReport::compute(&graph, top_n), opts.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tree() -> Graph<u32> {
        let mut g = Graph::new();
        g.load_arcs(vec![(1, 2), (1, 3), (2, 4), (2, 5), (3, 6), (3, 7)]);
        g
    }

    #[test]
    fn test_stats_tree() {
        let report = StatsReport::compute(&make_tree(), 2);
        assert_eq!(report.vertices, 7);
        assert_eq!(report.arcs, 6);
        assert!(!report.undirected);

        let out = report.out_degree.unwrap();
        assert_eq!((out.min, out.max), (0, 2));
        assert!((out.average - 6.0 / 7.0).abs() < 1e-9);

        let inn = report.in_degree.unwrap();
        assert_eq!((inn.min, inn.max), (0, 1));
        assert_eq!(report.most_important, vec![2, 3, 4, 5, 6, 7]);

        // 2 and 3 have total degree 3; ties by position
        let top: Vec<u32> = report.top.iter().map(|r| r.vertex).collect();
        assert_eq!(top, vec![2, 3]);
    }

    #[test]
    fn test_stats_empty_graph() {
        let g: Graph<u32> = Graph::new();
        let report = StatsReport::compute(&g, 0);
        assert!(report.out_degree.is_none());
        assert!(report.most_important.is_empty());
        assert!(report.to_string().contains("Out-degree   n/a"));
    }

    #[test]
    fn test_stats_json_shape() {
        let report = StatsReport::compute(&make_tree(), 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["vertices"], 7);
        assert_eq!(json["top"][0]["vertex"], 2);
        assert_eq!(json["top"][0]["total_degree"], 3);
    }
}
