use std::collections::HashSet;
use std::io::Cursor;

use adjgraph_core::{
    breadth_first_search, depth_first_search, write_tgf, Graph, GraphBuilder, IntegerGraphBuilder,
    StringGraphBuilder,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    AddVertex(u8),
    RemoveVertex(u8),
    AddArc(u8, u8),
    RemoveArc(u8, u8),
    AddEdge(u8, u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0u8..16).prop_map(Operation::AddVertex),
        (0u8..16).prop_map(Operation::RemoveVertex),
        (0u8..16, 0u8..16).prop_map(|(a, b)| Operation::AddArc(a, b)),
        (0u8..16, 0u8..16).prop_map(|(a, b)| Operation::RemoveArc(a, b)),
        (0u8..16, 0u8..16).prop_map(|(a, b)| Operation::AddEdge(a, b)),
    ]
}

fn apply(graph: &mut Graph<i64>, op: &Operation) {
    match *op {
        Operation::AddVertex(v) => {
            graph.add_vertex(v as i64);
        }
        Operation::RemoveVertex(v) => {
            graph.remove_vertex(&(v as i64));
        }
        Operation::AddArc(a, b) => {
            graph.add_arc(&(a as i64), &(b as i64));
        }
        Operation::RemoveArc(a, b) => {
            graph.remove_arc(&(a as i64), &(b as i64));
        }
        Operation::AddEdge(a, b) => {
            graph.add_edge(&(a as i64), &(b as i64));
        }
    }
}

proptest! {
    #[test]
    fn test_store_invariants_hold(ops in proptest::collection::vec(operation(), 1..200)) {
        let mut graph = Graph::new();
        for op in &ops {
            apply(&mut graph, op);

            let vertices: Vec<i64> = graph.vertices().copied().collect();
            prop_assert_eq!(vertices.len(), graph.vertex_count());
            prop_assert_eq!(graph.outdegrees().len(), graph.vertex_count());
            prop_assert_eq!(graph.indegrees().len(), graph.vertex_count());

            let unique: HashSet<i64> = vertices.iter().copied().collect();
            prop_assert_eq!(unique.len(), vertices.len(), "duplicate vertex");

            // Every arc endpoint is a live vertex
            for (from, to) in graph.arcs() {
                prop_assert!(graph.contains(from));
                prop_assert!(graph.contains(to));
            }

            let out_total: usize = graph.outdegrees().iter().sum();
            let in_total: usize = graph.indegrees().iter().sum();
            prop_assert_eq!(out_total, graph.arc_count());
            prop_assert_eq!(in_total, graph.arc_count());
        }
    }

    #[test]
    fn test_is_edge_symmetric(ops in proptest::collection::vec(operation(), 1..100)) {
        let mut graph = Graph::new();
        for op in &ops {
            apply(&mut graph, op);
        }
        for a in 0..16i64 {
            for b in 0..16i64 {
                prop_assert_eq!(graph.is_edge(&a, &b), graph.is_edge(&b, &a));
            }
        }
    }

    #[test]
    fn test_edges_only_graph_is_undirected(pairs in proptest::collection::vec((0i64..12, 0i64..12), 0..60)) {
        let mut graph = Graph::new();
        for &(a, b) in &pairs {
            graph.add_vertex(a);
            graph.add_vertex(b);
            graph.add_edge(&a, &b);
        }
        prop_assert!(graph.is_undirected());

        // A single one-way arc between distinct unlinked vertices breaks symmetry
        graph.add_vertex(100);
        graph.add_vertex(101);
        graph.add_arc(&100, &101);
        prop_assert!(!graph.is_undirected());
    }

    #[test]
    fn test_tgf_round_trip(pairs in proptest::collection::vec((-50i64..50, -50i64..50), 0..80)) {
        let mut graph = Graph::new();
        graph.load_arcs(pairs.iter().copied());

        let mut out = Vec::new();
        write_tgf(&graph, &mut out).unwrap();
        let back = IntegerGraphBuilder.read(Cursor::new(out)).unwrap();

        let verts: HashSet<i64> = graph.vertices().copied().collect();
        let back_verts: HashSet<i64> = back.vertices().copied().collect();
        prop_assert_eq!(verts, back_verts);

        let arcs: HashSet<(i64, i64)> = graph.arcs().map(|(a, b)| (*a, *b)).collect();
        let back_arcs: HashSet<(i64, i64)> = back.arcs().map(|(a, b)| (*a, *b)).collect();
        prop_assert_eq!(arcs, back_arcs);
    }

    #[test]
    fn test_tgf_round_trip_strings(
        pairs in proptest::collection::vec(("[A-Za-z0-9#.][A-Za-z0-9#. \t]{0,8}[A-Za-z0-9.]", "[A-Za-z0-9#.]{1,6}"), 0..40),
    ) {
        let mut graph = Graph::new();
        graph.load_arcs(pairs.iter().cloned());

        let mut out = Vec::new();
        write_tgf(&graph, &mut out).unwrap();
        let back = StringGraphBuilder.read(Cursor::new(out)).unwrap();

        let verts: Vec<&String> = graph.vertices().collect();
        let back_verts: Vec<&String> = back.vertices().collect();
        prop_assert_eq!(verts, back_verts);

        let arcs: HashSet<(&String, &String)> = graph.arcs().collect();
        let back_arcs: HashSet<(&String, &String)> = back.arcs().collect();
        prop_assert_eq!(arcs, back_arcs);
    }

    #[test]
    fn test_lossy_labels_are_rejected(label in "[ \t]*|[ \t][a-z]{1,4}|[a-z]{1,4}[ \t]") {
        let mut graph = Graph::new();
        graph.add_vertex(label);
        prop_assert!(write_tgf(&graph, Vec::new()).is_err());
    }

    #[test]
    fn test_traces_visit_each_vertex_once(
        pairs in proptest::collection::vec((0i64..20, 0i64..20), 1..60),
        target in 0i64..20,
    ) {
        let mut graph = Graph::new();
        graph.load_arcs(pairs.iter().copied());
        let start = pairs[0].0;

        // DFS may append one successor of the target before it stops (the
        // target is examined once more as stack top); BFS stops on it.
        let dfs = depth_first_search(&graph, &start, &target).unwrap();
        let bfs = breadth_first_search(&graph, &start, &target).unwrap();

        for (trace, slack) in [(&dfs, 1usize), (&bfs, 0usize)] {
            prop_assert_eq!(trace[0], start);
            let unique: HashSet<i64> = trace.iter().copied().collect();
            prop_assert_eq!(unique.len(), trace.len());
            prop_assert!(trace.len() <= graph.vertex_count());
            if let Some(pos) = trace.iter().position(|&v| v == target) {
                prop_assert!(pos + 1 + slack >= trace.len());
            }
        }
    }
}
