//! Delimited edge-list ingestion.
//!
//! Each data row contributes one arc from its first column to its second;
//! any further columns are ignored.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use adjgraph_core::{Graph, GraphBuilder};
use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

use crate::config::Settings;

/// Split one record. A field starting with `"` runs to the closing quote and
/// may contain the delimiter; `""` inside it is a literal quote.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Build a graph from an edge list, converting names with `builder`.
///
/// Rows are parsed and checked against the vertex cap first, then handed to
/// `Graph::load_arcs` in file order.
pub fn read_edge_list<B, R>(builder: &B, reader: R, settings: &Settings) -> Result<Graph<B::Vertex>>
where
    B: GraphBuilder,
    R: BufRead,
{
    let mut rows: Vec<(B::Vertex, B::Vertex)> = Vec::new();
    let mut seen: HashSet<B::Vertex> = HashSet::new();

    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line.with_context(|| format!("reading line {}", line_no))?;
        if line_no == 1 && settings.has_header {
            debug!(header = %line, "skipping header");
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_record(&line, settings.delimiter);
        let [from, to, ..] = fields.as_slice() else {
            bail!(
                "line {}: expected at least 2 fields, found {}",
                line_no,
                fields.len()
            );
        };

        let mut endpoint = |field: &str, column: &str| -> Result<B::Vertex> {
            let field = field.trim();
            if field.is_empty() {
                bail!("line {}: empty {} field", line_no, column);
            }
            let vertex = builder
                .parse_label(field)
                .map_err(|e| anyhow!("line {}: {}", line_no, e))?;
            seen.insert(vertex.clone());
            Ok(vertex)
        };
        let from = endpoint(from.as_str(), "from")?;
        let to = endpoint(to.as_str(), "to")?;

        if seen.len() > settings.max_vertices {
            bail!(
                "line {}: edge list exceeds max_vertices={}",
                line_no,
                settings.max_vertices
            );
        }
        rows.push((from, to));
    }

    let row_count = rows.len();
    let mut graph = Graph::with_capacity(seen.len());
    graph.load_arcs(rows);

    info!(
        rows = row_count,
        vertices = graph.vertex_count(),
        arcs = graph.arc_count(),
        "loaded edge list"
    );
    Ok(graph)
}

pub fn load_edge_list<B: GraphBuilder>(
    builder: &B,
    path: &Path,
    settings: &Settings,
) -> Result<Graph<B::Vertex>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_edge_list(builder, BufReader::new(file), settings)
        .with_context(|| format!("loading edge list {}", path.display()))
}
