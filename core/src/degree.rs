use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexValue};

/// Min / max / average over a degree sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub average: f64,
}

impl DegreeStats {
    /// Summarize a degree sequence such as `Graph::indegrees()`.
    ///
    /// An empty sequence has no average and is rejected.
    pub fn from_degrees(degrees: &[usize]) -> Result<Self> {
        let (&first, rest) = degrees
            .split_first()
            .ok_or(GraphError::EmptyInput("degree sequence"))?;

        let (min, max, sum) = rest
            .iter()
            .fold((first, first, first), |(min, max, sum), &d| {
                (min.min(d), max.max(d), sum + d)
            });

        Ok(Self {
            min,
            max,
            average: sum as f64 / degrees.len() as f64,
        })
    }
}

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeResult<T> {
    pub vertex: T,
    /// 0-based position in the vertex sequence.
    pub position: usize,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

/// Vertices whose entry in an index-aligned degree sequence equals `value`.
///
/// `degrees` must come from the same, unmodified graph (`outdegrees()` or
/// `indegrees()`); extra or missing entries are ignored.
pub fn vertices_with_degree<T: VertexValue>(
    graph: &Graph<T>,
    degrees: &[usize],
    value: usize,
) -> Vec<T> {
    graph
        .vertices()
        .zip(degrees)
        .filter(|&(_, &d)| d == value)
        .map(|(v, _)| v.clone())
        .collect()
}

/// The most linked-to vertices: those with the maximum indegree, in vertex
/// order. Empty for an empty graph.
pub fn most_important<T: VertexValue>(graph: &Graph<T>) -> Vec<T> {
    let indegrees = graph.indegrees();
    match indegrees.iter().copied().max() {
        Some(max) => vertices_with_degree(graph, &indegrees, max),
        None => Vec::new(),
    }
}

/// Return vertices ranked by degree (in + out).
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// total degree (descending). Ties are broken by vertex position (ascending).
pub fn degree_centrality<T: VertexValue>(
    graph: &Graph<T>,
    top_n: usize,
) -> Vec<DegreeResult<T>> {
    let mut results: Vec<DegreeResult<T>> = graph
        .vertices()
        .zip(graph.outdegrees())
        .zip(graph.indegrees())
        .enumerate()
        .map(|(position, ((vertex, out_degree), in_degree))| DegreeResult {
            vertex: vertex.clone(),
            position,
            out_degree,
            in_degree,
            total_degree: out_degree + in_degree,
        })
        .collect();

    results.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then(a.position.cmp(&b.position))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
