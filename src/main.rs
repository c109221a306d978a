//! dmhero-search MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements two tools:
//! - `search(campaign, query)` - Relevance-ranked search across a campaign
//! - `list(campaign, type, query?)` - One entity type, with cross-entity matches

use anyhow::Result;
use clap::Parser;
use dmhero_search::cli::{Cli, Commands, ConfigCommands, ListArgs, SearchArgs};
use dmhero_search::config::{self, AppConfig};
use dmhero_search::error::AppError;
use dmhero_search::mcp;
use dmhero_search::tools::{self, ToolContext, TOOL_TIMEOUT};
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let data = cli.data.as_deref();
    let config_file = cli.config.as_deref();

    let result = match cli.command {
        Some(Commands::Search(args)) => execute_search_cli(data, config_file, args).await,
        Some(Commands::List(args)) => execute_list_cli(data, config_file, args).await,
        Some(Commands::Config(args)) => execute_config_cli(config_file, args.command),
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Load configuration and campaign data for a tool call
fn load_context(data: Option<&Path>, config_file: Option<&Path>) -> Result<ToolContext, AppError> {
    let config = config::load_config(config_file)
        .map_err(|e| AppError::ConfigError(format!("{:#}", e)))?;
    ToolContext::load(data, &config)
}

/// Execute search command in CLI mode
async fn execute_search_cli(
    data: Option<&Path>,
    config_file: Option<&Path>,
    args: SearchArgs,
) -> Result<String> {
    let ctx = load_context(data, config_file)?;

    match timeout(TOOL_TIMEOUT, tools::search::execute_search(&ctx, args)).await {
        Ok(Ok(tool_result)) => Ok(tool_result.first_text()),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(AppError::Timeout("Request exceeded 120 second timeout".to_string()).into()),
    }
}

/// Execute list command in CLI mode
async fn execute_list_cli(
    data: Option<&Path>,
    config_file: Option<&Path>,
    args: ListArgs,
) -> Result<String> {
    let ctx = load_context(data, config_file)?;

    match timeout(TOOL_TIMEOUT, tools::list::execute_list(&ctx, args)).await {
        Ok(Ok(tool_result)) => Ok(tool_result.first_text()),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(AppError::Timeout("Request exceeded 120 second timeout".to_string()).into()),
    }
}

/// Execute config command in CLI mode
fn execute_config_cli(config_file: Option<&Path>, command: ConfigCommands) -> Result<String> {
    let path: PathBuf = match config_file {
        Some(path) => path.to_path_buf(),
        None => config::config_path()?,
    };

    match command {
        ConfigCommands::Path => Ok(path.display().to_string()),
        ConfigCommands::Show => {
            let config = config::load_config(Some(&path))
                .map_err(|e| AppError::ConfigError(format!("{:#}", e)))?;
            Ok(serde_json::to_string_pretty(&config)?)
        }
        ConfigCommands::Init { data_file } => {
            if path.exists() {
                return Err(AppError::InvalidInput(format!(
                    "{} already exists; edit it or remove it first",
                    path.display()
                ))
                .into());
            }

            let config = AppConfig {
                data_file,
                ..Default::default()
            };
            let written = config::save_config(&config, Some(&path))?;
            Ok(format!("✓ Wrote default configuration to {}", written.display()))
        }
    }
}

/// Map an error to its exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map(AppError::exit_code)
        .unwrap_or(5)
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Log to stderr: stdout carries the JSON-RPC frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting dmhero-search MCP Server");

    let data = std::env::var_os("DMHERO_DATA").map(PathBuf::from);
    let config_file = std::env::var_os("DMHERO_CONFIG").map(PathBuf::from);
    let ctx = load_context(data.as_deref(), config_file.as_deref())?;

    mcp::handle_stdio(ctx).await?;

    Ok(())
}
