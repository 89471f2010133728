//! `adjgraph tgf` command - Convert an edge list to Trivial Graph Format.

use std::fmt;
use std::path::Path;

use adjgraph_core::{save_tgf, GraphBuilder};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::RunOptions;
use crate::ingest::load_edge_list;
use crate::report::emit;

#[derive(Debug, Serialize)]
pub struct ConvertReport {
    pub input: String,
    pub output: String,
    pub vertices: usize,
    pub arcs: usize,
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} ({} vertices, {} arcs) from {}",
            self.output, self.vertices, self.arcs, self.input
        )
    }
}

/// Execute the `tgf` command.
pub fn execute<B>(builder: &B, input: &Path, output: &Path, opts: &RunOptions) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: fmt::Display,
{
    let graph = load_edge_list(builder, input, &opts.settings)?;
    save_tgf(&graph, output).with_context(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), "saved TGF");

    emit(
        &ConvertReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            vertices: graph.vertex_count(),
            arcs: graph.arc_count(),
        },
        opts.format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::report::OutputFormat;
    use adjgraph_core::StringGraphBuilder;

    #[test]
    fn test_convert_writes_tgf() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("adjgraph-cli-convert-{}.csv", std::process::id()));
        let output = dir.join(format!("adjgraph-cli-convert-{}.tgf", std::process::id()));
        std::fs::write(&input, "from,to\nA,B\nB,C\nA,C\n").unwrap();

        let opts = RunOptions {
            settings: Settings::default(),
            format: OutputFormat::Json,
        };
        execute(&StringGraphBuilder, &input, &output, &opts).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();

        assert_eq!(text, "1 A\n2 B\n3 C\n#\n1 2\n1 3\n2 3\n");
    }
}
