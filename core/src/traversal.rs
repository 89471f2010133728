use std::collections::VecDeque;

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId, VertexValue};

/// Vertices at the greatest traversal-trace length from a start vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Farthest<T> {
    /// Length of the longest BFS trace, counted in steps (trace length - 1).
    pub distance: usize,
    /// Vertices whose trace reaches `distance`, in vertex-sequence order.
    pub vertices: Vec<T>,
}

fn resolve<T: VertexValue>(graph: &Graph<T>, vertex: &T) -> Result<VertexId> {
    graph
        .vertex_id(vertex)
        .ok_or_else(|| GraphError::unknown_vertex(vertex))
}

/// Collect trace handles back into owned values.
fn values<T: VertexValue>(graph: &Graph<T>, ids: &[VertexId]) -> Vec<T> {
    ids.iter()
        .filter_map(|&id| graph.value(id).cloned())
        .collect()
}

/// Depth-first walk from `start` that stops once `target` is reached.
///
/// Returns the pre-order visitation trace, not a path: vertices on branches
/// explored before the target's branch stay in the trace. Successors are
/// tried in arc insertion order. If `target` is unreachable (or not a vertex
/// at all) the trace covers everything reachable from `start`.
///
/// Uses an explicit stack: the top is re-examined after every push, and
/// popped once it has no unvisited successor left. The stop check runs on
/// the examined top, so when the target is pushed it is examined once more
/// and its first unvisited successor (if any) ends the trace.
pub fn depth_first_search<T: VertexValue>(
    graph: &Graph<T>,
    start: &T,
    target: &T,
) -> Result<Vec<T>> {
    let start_id = resolve(graph, start)?;
    let target_id = graph.vertex_id(target);

    let mut visited = vec![false; graph.slot_count()];
    let mut stack: Vec<VertexId> = vec![start_id];
    let mut trace: Vec<VertexId> = vec![start_id];
    visited[start_id.slot()] = true;

    let mut current = start_id;
    while Some(current) != target_id {
        let Some(&top) = stack.last() else {
            break;
        };
        current = top;

        let next = graph
            .successor_ids(current)
            .iter()
            .copied()
            .find(|s| !visited[s.slot()]);

        match next {
            Some(succ) => {
                visited[succ.slot()] = true;
                stack.push(succ);
                trace.push(succ);
            }
            None => {
                stack.pop();
            }
        }
    }

    trace!(
        visited = trace.len(),
        reached = Some(current) == target_id,
        "dfs finished"
    );
    Ok(values(graph, &trace))
}

/// Breadth-first walk from `start` that stops once `target` reaches the
/// front of the queue.
///
/// The trace records each vertex as it becomes the queue front. Successor
/// scanning of the front vertex halts as soon as the most recently scanned
/// successor is the target, so vertices queued after the target's discovery
/// never enter the queue. The resulting order can differ from textbook BFS
/// for some target placements.
///
/// When the target is unreachable the queue drains and the trace holds the
/// whole BFS order of the reachable set.
pub fn breadth_first_search<T: VertexValue>(
    graph: &Graph<T>,
    start: &T,
    target: &T,
) -> Result<Vec<T>> {
    let start_id = resolve(graph, start)?;
    let target_id = graph.vertex_id(target);

    let mut visited = vec![false; graph.slot_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut trace: Vec<VertexId> = vec![start_id];

    visited[start_id.slot()] = true;
    queue.push_back(start_id);

    let mut current = start_id;
    let mut last_scanned = start_id;

    while !queue.is_empty() {
        for &succ in graph.successor_ids(current) {
            if Some(last_scanned) == target_id {
                break;
            }
            last_scanned = succ;
            if !visited[succ.slot()] {
                visited[succ.slot()] = true;
                queue.push_back(succ);
            }
        }

        queue.pop_front();

        if let Some(&front) = queue.front() {
            current = front;
            trace.push(front);
            if Some(front) == target_id {
                trace!(visited = trace.len(), "bfs reached target");
                return Ok(values(graph, &trace));
            }
        }
    }

    trace!(visited = trace.len(), "bfs exhausted queue");
    Ok(values(graph, &trace))
}

/// Find the vertices farthest from `start` by BFS trace length.
///
/// Runs `breadth_first_search(start, v)` for every vertex `v`. A vertex that
/// cannot be reached yields the full reachable trace, so disconnected
/// vertices are reported as farthest. O(V · (V + E)).
pub fn farthest_vertices<T: VertexValue>(graph: &Graph<T>, start: &T) -> Result<Farthest<T>> {
    resolve(graph, start)?;

    let mut lengths = Vec::with_capacity(graph.vertex_count());
    for target in graph.vertices() {
        let trace = breadth_first_search(graph, start, target)?;
        lengths.push(trace.len().saturating_sub(1));
    }

    let distance = lengths.iter().copied().max().unwrap_or(0);
    let vertices = graph
        .vertex_ids()
        .iter()
        .zip(&lengths)
        .filter(|&(_, &len)| len == distance)
        .filter_map(|(&id, _)| graph.value(id).cloned())
        .collect();

    Ok(Farthest { distance, vertices })
}
