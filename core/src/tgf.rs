//! Trivial Graph Format (TGF) reader and writer.
//!
//! ```text
//! 1 Andy Warhol
//! 2 Marilyn Monroe
//! #
//! 1 2
//! ```
//!
//! Vertex lines are `<id> <label>`, a lone `#` separates them from arc lines
//! `<source id> <target id> [edge label]`. The writer numbers vertices by
//! 1-based position in the vertex sequence; the reader accepts any id token.
//! Which Rust type a label becomes is decided by a [`GraphBuilder`].

use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexValue};

/// The reader trims lines and substitutes the id for a missing label, so
/// only non-empty single-line labels without outer whitespace round-trip.
fn is_writable_label(label: &str) -> bool {
    !label.is_empty() && label.trim() == label && !label.contains(['\n', '\r'])
}

/// Write `graph` as TGF. Arcs follow vertex-sequence order, then arc
/// insertion order within each source.
///
/// Fails with [`GraphError::TgfLabel`] before writing a label that would not
/// read back as the same value.
pub fn write_tgf<T, W>(graph: &Graph<T>, mut writer: W) -> Result<()>
where
    T: VertexValue + Display,
    W: Write,
{
    let positions: HashMap<&T, usize> = graph
        .vertices()
        .enumerate()
        .map(|(i, v)| (v, i + 1))
        .collect();

    for (v, n) in graph.vertices().zip(1..) {
        let label = v.to_string();
        if !is_writable_label(&label) {
            return Err(GraphError::TgfLabel(label));
        }
        writeln!(writer, "{} {}", n, label)?;
    }
    writeln!(writer, "#")?;

    let mut arcs = 0usize;
    for (from, to) in graph.arcs() {
        if let (Some(f), Some(t)) = (positions.get(from), positions.get(to)) {
            writeln!(writer, "{} {}", f, t)?;
            arcs += 1;
        }
    }
    writer.flush()?;

    debug!(vertices = positions.len(), arcs, "wrote TGF");
    Ok(())
}

/// Write `graph` to a TGF file, replacing any existing file.
pub fn save_tgf<T, P>(graph: &Graph<T>, path: P) -> Result<()>
where
    T: VertexValue + Display,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    write_tgf(graph, BufWriter::new(file))
}

/// Strategy for turning TGF labels into vertex values.
///
/// The graph type itself stays generic; a builder picks the concrete vertex
/// type at the ingestion boundary (names as `String`, numeric datasets as
/// `i64`, ...).
pub trait GraphBuilder {
    type Vertex: VertexValue;

    /// Convert one label. The error string is reported with its line number.
    fn parse_label(&self, label: &str) -> std::result::Result<Self::Vertex, String>;

    /// Read a TGF document.
    fn read<R: BufRead>(&self, reader: R) -> Result<Graph<Self::Vertex>>
    where
        Self: Sized,
    {
        read_tgf(self, reader)
    }

    /// Read a TGF file.
    fn build<P: AsRef<Path>>(&self, path: P) -> Result<Graph<Self::Vertex>>
    where
        Self: Sized,
    {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }
}

/// Labels are kept verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringGraphBuilder;

impl GraphBuilder for StringGraphBuilder {
    type Vertex = String;

    fn parse_label(&self, label: &str) -> std::result::Result<String, String> {
        Ok(label.to_string())
    }
}

/// Labels must be signed 64-bit integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerGraphBuilder;

impl GraphBuilder for IntegerGraphBuilder {
    type Vertex = i64;

    fn parse_label(&self, label: &str) -> std::result::Result<i64, String> {
        label
            .parse::<i64>()
            .map_err(|e| format!("invalid integer label '{}': {}", label, e))
    }
}

/// Parse a TGF document with the given builder.
///
/// Blank lines are skipped. A vertex line without a label uses its id as
/// the label. Repeated labels collapse into one vertex (vertex values are
/// unique), but a repeated id is an error.
pub fn read_tgf<B, R>(builder: &B, reader: R) -> Result<Graph<B::Vertex>>
where
    B: GraphBuilder,
    R: BufRead,
{
    let mut graph = Graph::new();
    let mut ids: HashMap<String, B::Vertex> = HashMap::new();
    let mut in_arcs = false;

    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !in_arcs {
            if line == "#" {
                in_arcs = true;
                continue;
            }

            let (id, label) = match line.split_once(char::is_whitespace) {
                Some((id, rest)) => (id, rest.trim()),
                None => (line, ""),
            };
            let label = if label.is_empty() { id } else { label };

            if ids.contains_key(id) {
                return Err(GraphError::tgf(line_no, format!("duplicate vertex id '{}'", id)));
            }
            let vertex = builder
                .parse_label(label)
                .map_err(|e| GraphError::tgf(line_no, e))?;
            graph.add_vertex(vertex.clone());
            ids.insert(id.to_string(), vertex);
        } else {
            let mut parts = line.split_whitespace();
            let (Some(src), Some(dst)) = (parts.next(), parts.next()) else {
                return Err(GraphError::tgf(line_no, "arc line needs a source and a target id"));
            };
            let from = ids
                .get(src)
                .ok_or_else(|| GraphError::tgf(line_no, format!("unknown vertex id '{}'", src)))?;
            let to = ids
                .get(dst)
                .ok_or_else(|| GraphError::tgf(line_no, format!("unknown vertex id '{}'", dst)))?;
            graph.add_arc(from, to);
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        arcs = graph.arc_count(),
        "read TGF"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn to_tgf<T: VertexValue + Display>(graph: &Graph<T>) -> String {
        let mut out = Vec::new();
        write_tgf(graph, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn people() -> Graph<String> {
        let mut g = Graph::new();
        g.load_arcs(
            [
                ("Andy Warhol", "Marilyn Monroe"),
                ("Marilyn Monroe", "John F. Kennedy"),
                ("John F. Kennedy", "Marilyn Monroe"),
                ("Pope Leo III", "Charlemagne"),
            ]
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string())),
        );
        g
    }

    #[test]
    fn test_write_format() {
        let mut g = Graph::new();
        g.load_arcs(vec![(10, 20), (20, 30), (10, 30)]);
        assert_eq!(to_tgf(&g), "1 10\n2 20\n3 30\n#\n1 2\n1 3\n2 3\n");
    }

    #[test]
    fn test_write_empty_graph() {
        let g: Graph<u32> = Graph::new();
        assert_eq!(to_tgf(&g), "#\n");
    }

    #[test]
    fn test_write_after_removal_renumbers() {
        let mut g = Graph::new();
        g.load_arcs(vec![(1, 2), (2, 3), (3, 1)]);
        g.remove_vertex(&2);
        assert_eq!(to_tgf(&g), "1 1\n2 3\n#\n2 1\n");
    }

    #[test]
    fn test_write_rejects_lossy_labels() {
        for bad in ["", " padded", "trailing ", "two\nlines"] {
            let mut g = Graph::new();
            g.add_vertex("Bob".to_string());
            g.add_vertex(bad.to_string());
            let err = write_tgf(&g, Vec::new()).unwrap_err();
            assert!(matches!(err, GraphError::TgfLabel(ref l) if l == bad));
        }
    }

    #[test]
    fn test_round_trip_inner_whitespace() {
        let mut g = Graph::new();
        g.load_arcs(vec![
            ("John  F. Kennedy".to_string(), "1".to_string()),
            ("a\tb".to_string(), "#".to_string()),
        ]);
        let back = StringGraphBuilder.read(Cursor::new(to_tgf(&g))).unwrap();
        assert_eq!(
            back.vertices().cloned().collect::<Vec<_>>(),
            g.vertices().cloned().collect::<Vec<_>>()
        );
        assert_eq!(back.arc_count(), 2);
    }

    #[test]
    fn test_round_trip_strings() {
        let g = people();
        let text = to_tgf(&g);
        let back = StringGraphBuilder.read(Cursor::new(text)).unwrap();

        let verts: HashSet<&String> = g.vertices().collect();
        let back_verts: HashSet<&String> = back.vertices().collect();
        assert_eq!(verts, back_verts);

        let arcs: HashSet<(&String, &String)> = g.arcs().collect();
        let back_arcs: HashSet<(&String, &String)> = back.arcs().collect();
        assert_eq!(arcs, back_arcs);
    }

    #[test]
    fn test_read_integers() {
        let text = "1 5\n2 7\n3 9\n#\n1 2\n2 3 likes\n3 1\n";
        let g = IntegerGraphBuilder.read(Cursor::new(text)).unwrap();
        assert_eq!(g.vertices().copied().collect::<Vec<i64>>(), vec![5, 7, 9]);
        assert!(g.is_arc(&5, &7));
        assert!(g.is_arc(&7, &9));
        assert!(g.is_arc(&9, &5));
        assert_eq!(g.arc_count(), 3);
    }

    #[test]
    fn test_read_bad_integer() {
        let text = "1 five\n#\n";
        let err = IntegerGraphBuilder.read(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::Tgf { line: 1, .. }));
    }

    #[test]
    fn test_read_missing_label_uses_id() {
        let text = "a\nb Bee\n\n#\na b\n";
        let g = StringGraphBuilder.read(Cursor::new(text)).unwrap();
        assert!(g.is_arc(&"a".to_string(), &"Bee".to_string()));
    }

    #[test]
    fn test_read_unknown_arc_id() {
        let text = "1 A\n#\n1 2\n";
        let err = StringGraphBuilder.read(Cursor::new(text)).unwrap_err();
        match err {
            GraphError::Tgf { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("'2'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_malformed_arc_line() {
        let text = "1 A\n#\n1\n";
        let err = StringGraphBuilder.read(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::Tgf { line: 3, .. }));
    }

    #[test]
    fn test_read_duplicate_id() {
        let text = "1 A\n1 B\n#\n";
        let err = StringGraphBuilder.read(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::Tgf { line: 2, .. }));
    }

    #[test]
    fn test_read_without_separator() {
        let g = StringGraphBuilder.read(Cursor::new("1 A\n2 B\n")).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.arc_count(), 0);
    }

    #[test]
    fn test_save_and_build_file() {
        let path = std::env::temp_dir().join(format!(
            "adjgraph-core-tgf-{}.tgf",
            std::process::id()
        ));
        let g = people();
        save_tgf(&g, &path).unwrap();
        let back = StringGraphBuilder.build(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back.vertex_count(), g.vertex_count());
        assert_eq!(back.arc_count(), g.arc_count());
        assert!(back.is_edge(&"Marilyn Monroe".to_string(), &"John F. Kennedy".to_string()));
    }

    #[test]
    fn test_build_missing_file() {
        let err = StringGraphBuilder
            .build("/nonexistent/adjgraph/graph.tgf")
            .unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
