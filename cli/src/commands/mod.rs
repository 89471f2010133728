//! CLI command implementations.

pub mod convert;
pub mod farthest;
pub mod people;
pub mod search;
pub mod show;
pub mod stats;

use adjgraph_core::GraphBuilder;
use anyhow::{anyhow, Result};

use crate::config::Settings;
use crate::report::OutputFormat;

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings: Settings,
    pub format: OutputFormat,
}

/// Convert a vertex named on the command line with the active builder.
pub fn parse_vertex<B: GraphBuilder>(builder: &B, label: &str) -> Result<B::Vertex> {
    builder
        .parse_label(label)
        .map_err(|e| anyhow!("vertex argument: {}", e))
}
