//! adjgraph - Directed-graph toolkit for edge lists and TGF files.
//!
//! # Commands
//!
//! - `adjgraph tgf <edges.csv> --output <file.tgf>` - Convert an edge list to TGF
//! - `adjgraph show <file.tgf>` - Print a TGF graph
//! - `adjgraph stats <edges.csv>` - Degree statistics and centrality ranking
//! - `adjgraph search <edges.csv> --from A --to B` - DFS/BFS traversal trace
//! - `adjgraph farthest <edges.csv> --from A` - Farthest vertices by BFS trace
//! - `adjgraph people <nodes.csv>` - Gender percentages per domain
//!
//! # Examples
//!
//! ```bash
//! # Convert a semicolon-separated edge list without a header row
//! adjgraph --delimiter ';' --no-header tgf edges.csv --output graph.tgf
//!
//! # Breadth-first trace between two people, as JSON
//! adjgraph --format json search edges.csv --from "Andy Warhol" --to "Charlemagne" --algorithm bfs
//!
//! # Read a TGF file whose labels are integers
//! adjgraph show graph.tgf --integers
//! ```

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;

use adjgraph_core::{GraphBuilder, IntegerGraphBuilder, StringGraphBuilder};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod ingest;
mod people;
mod report;

use commands::search::Algorithm;
use commands::{convert, farthest, search, show, stats, RunOptions};
use config::{Overrides, Settings};
use report::OutputFormat;

/// Directed graphs over edge lists and Trivial Graph Format files
#[derive(Parser)]
#[command(name = "adjgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML settings file
    #[arg(long, global = true, env = "ADJGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// CSV field delimiter
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// CSV input has no header row
    #[arg(long, global = true)]
    no_header: bool,

    /// Abort loading when the graph exceeds this many vertices
    #[arg(long, global = true)]
    max_vertices: Option<usize>,

    /// Treat vertex labels as 64-bit integers instead of strings
    #[arg(long, global = true)]
    integers: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an edge list to a TGF file
    Tgf {
        /// Edge-list CSV (from, to, ...)
        input: PathBuf,

        /// TGF file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Read a TGF file and print the graph
    Show {
        /// TGF file
        file: PathBuf,
    },

    /// Vertex/arc counts, degree statistics and top vertices by degree
    Stats {
        /// Edge-list CSV
        input: PathBuf,

        /// Number of ranked vertices to list (0 lists all)
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Traversal trace from one vertex until another is reached
    Search {
        /// Edge-list CSV
        input: PathBuf,

        /// Start vertex
        #[arg(long)]
        from: String,

        /// Target vertex
        #[arg(long)]
        to: String,

        /// Traversal order
        #[arg(short, long, value_enum, default_value_t = Algorithm::Dfs)]
        algorithm: Algorithm,
    },

    /// Vertices with the longest BFS trace from a start vertex
    Farthest {
        /// Edge-list CSV
        input: PathBuf,

        /// Start vertex
        #[arg(long)]
        from: String,
    },

    /// Gender percentages overall and per professional domain
    People {
        /// Node CSV (name in column 1, gender in 5, domain in 8)
        input: PathBuf,

        /// Restrict the report to one domain
        #[arg(short, long)]
        domain: Option<String>,
    },
}

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(level.to_lowercase())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(cli.config.as_deref())?.with_overrides(Overrides {
        delimiter: cli.delimiter,
        no_header: cli.no_header,
        max_vertices: cli.max_vertices,
    })
}

fn run<B>(builder: &B, command: Commands, opts: &RunOptions) -> Result<()>
where
    B: GraphBuilder,
    B::Vertex: Display + Serialize,
{
    match command {
        Commands::Tgf { input, output } => convert::execute(builder, &input, &output, opts),
        Commands::Show { file } => show::execute(builder, &file, opts),
        Commands::Stats { input, top } => stats::execute(builder, &input, top, opts),
        Commands::Search {
            input,
            from,
            to,
            algorithm,
        } => search::execute(builder, &input, &from, &to, algorithm, opts),
        Commands::Farthest { input, from } => farthest::execute(builder, &input, &from, opts),
        Commands::People { input, domain } => {
            commands::people::execute(&input, domain.as_deref(), opts)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging needs the configured level, so a bad config is reported
    // through a default subscriber.
    let settings = resolve_settings(&cli);
    let level = settings
        .as_ref()
        .map(|s| s.log_level.clone())
        .unwrap_or_else(|_| Settings::default().log_level);
    setup_logging(cli.verbose, cli.quiet, &level);

    let result = settings.and_then(|settings| {
        let opts = RunOptions {
            settings,
            format: cli.format,
        };
        if cli.integers {
            run(&IntegerGraphBuilder, cli.command, &opts)
        } else {
            run(&StringGraphBuilder, cli.command, &opts)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "adjgraph",
            "--delimiter",
            ";",
            "search",
            "edges.csv",
            "--from",
            "A",
            "--to",
            "B",
            "--algorithm",
            "bfs",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.delimiter, Some(';'));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Search { from, to, algorithm, .. } => {
                assert_eq!((from.as_str(), to.as_str()), ("A", "B"));
                assert_eq!(algorithm, Algorithm::Bfs);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_show_integers() {
        let cli = Cli::try_parse_from(["adjgraph", "show", "g.tgf", "--integers"]).unwrap();
        assert!(cli.integers);
        assert!(matches!(cli.command, Commands::Show { .. }));
    }
}
