//! CLI mode implementation
//!
//! Provides command-line interface for the search and list tools

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// DM Hero entity search CLI
#[derive(Parser)]
#[command(name = "dmhero-search")]
#[command(about = "Fuzzy, relevance-ranked search over DM Hero campaign entities", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Campaign snapshot (JSON)
    #[arg(long, global = true, env = "DMHERO_DATA")]
    pub data: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "DMHERO_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every entity of a campaign, best match first
    Search(SearchArgs),
    /// List one entity type, optionally filtered by a query
    List(ListArgs),
    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Campaign id
    #[arg(short = 'c', long)]
    #[schemars(description = "Campaign id")]
    pub campaign: String,

    /// Search terms (case and accent insensitive, typo tolerant)
    #[arg(short = 'q', long)]
    #[schemars(description = "Search terms (case and accent insensitive, typo tolerant)")]
    pub query: String,

    /// Maximum number of results (default and max 20)
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of results (default and max 20)")]
    pub limit: Option<usize>,

    /// Emit JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Return hits as JSON instead of markdown")]
    pub json: bool,
}

/// List tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ListArgs {
    /// Campaign id
    #[arg(short = 'c', long)]
    #[schemars(description = "Campaign id")]
    pub campaign: String,

    /// Entity type: npc, location, item, faction, lore or player
    #[arg(short = 't', long = "type")]
    #[serde(rename = "type")]
    #[schemars(description = "Entity type: npc, location, item, faction, lore or player")]
    pub entity_type: String,

    /// Optional filter; related entities of other types widen the match
    #[arg(short = 'q', long)]
    #[serde(default)]
    #[schemars(description = "Optional filter; entities related to a matching entity of another type are included")]
    pub query: Option<String>,

    /// Emit JSON instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Return entities as JSON instead of markdown")]
    pub json: bool,
}

/// Configuration management arguments
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Campaign snapshot to remember
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
    /// Print the configuration file location
    Path,
}
