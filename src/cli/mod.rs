//! CLI module for taxolint.
//!
//! Subcommands:
//! - `check`: Report AP1 violations around an entity
//! - `labels`: Print display labels of entities
//! - `mcp`: Run the MCP server (stdio transport)

mod check;
mod labels;
mod mcp;

use clap::{Args, Parser, Subcommand};

use crate::models::Directions;

/// taxolint - Taxonomy antipattern checks for Wikidata-style graphs
#[derive(Parser)]
#[command(name = "taxolint")]
#[command(about = "Detect entities that are both instance and subclass of the same class")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check an entity for AP1 violations, optionally against a new statement
    Check(CheckArgs),

    /// Print the display label of each entity
    Labels {
        /// Entity ids (e.g. Q5)
        #[arg(required = true)]
        entities: Vec<String>,
    },

    /// Run the MCP server (stdio transport for local use)
    Mcp,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Focal entity id (e.g. Q5)
    pub entity: String,

    /// Relation of the hypothetical statement (P31, P279, instance_of, subclass_of)
    #[arg(long, requires = "object")]
    pub relation: Option<String>,

    /// Object entity of the hypothetical statement
    #[arg(long, requires = "relation")]
    pub object: Option<String>,

    /// Directions to analyze: up, down or both
    #[arg(long, default_value = "both")]
    pub direction: Directions,

    /// Resolve labels for every mentioned entity
    #[arg(long)]
    pub labels: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Check(ref args) => self.run_check(args).await,
            Command::Labels { ref entities } => self.run_labels(entities).await,
            Command::Mcp => self.run_mcp().await,
        }
    }
}
