//! Search tool implementation
//!
//! Implements the `search(campaign, query)` MCP tool

use super::{ToolContext, TOOL_TIMEOUT};
use crate::cli::SearchArgs;
use crate::error::{validate_campaign, validate_query, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::search::{SearchEngine, SearchHit};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info};

/// Format search hits into markdown for display
pub fn format_search_results(hits: &[SearchHit], campaign_name: &str, query: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Search Results · {} entities\n\n", hits.len()));
    md.push_str(&format!("{} · \"{}\"\n\n", campaign_name, query.trim()));

    if hits.is_empty() {
        md.push_str("No matching entities.\n");
        return md;
    }

    for hit in hits {
        let candidate = &hit.candidate;
        md.push_str(&format!("## {}\n\n", candidate.display_name()));
        md.push_str(&format!(
            "{} · #{}\n\n",
            candidate.entity_type.label(),
            candidate.id
        ));

        if let Some(description) = candidate.description.as_deref() {
            let description = description.trim();
            if !description.is_empty() {
                md.push_str(&format!("> {}\n\n", description));
            }
        }

        if !hit.linked_entities.is_empty() {
            md.push_str(&format!("Linked: {}\n\n", hit.linked_entities.join(", ")));
        }

        md.push_str("---\n\n");
    }

    md
}

/// Handle search tool call (MCP)
pub async fn handle_search(id: Option<Value>, args: Value, ctx: &ToolContext) -> McpResponse {
    match timeout(TOOL_TIMEOUT, handle_search_impl(args, ctx)).await {
        Ok(result) => match result.and_then(|content| Ok(serde_json::to_value(content)?)) {
            Ok(content) => McpResponse::success(id, content),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(id, "timeout", "Search request exceeded 120 second timeout"),
    }
}

async fn handle_search_impl(args: Value, ctx: &ToolContext) -> Result<ToolResult, AppError> {
    let search_args: SearchArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_search(ctx, search_args).await
}

/// Shared implementation for search (used by MCP and CLI)
pub async fn execute_search(
    ctx: &ToolContext,
    search_args: SearchArgs,
) -> Result<ToolResult, AppError> {
    let campaign_id = validate_campaign(&search_args.campaign)?;
    validate_query(&search_args.query)?;
    if search_args.limit == Some(0) {
        return Err(AppError::InvalidInput(
            "Limit must be at least 1".to_string(),
        ));
    }

    let campaign = ctx.require_campaign(campaign_id)?;

    debug!(
        "Search request for campaign {}: '{}'",
        campaign_id, search_args.query
    );

    // A limit can only narrow the configured cap
    let mut scoring = ctx.scoring().clone();
    if let Some(limit) = search_args.limit {
        scoring.result_cap = scoring.result_cap.min(limit);
    }

    let candidates = ctx.store().candidates(campaign_id);
    let engine = SearchEngine::with_config(scoring);
    let hits = engine.search(&search_args.query, &candidates);

    info!(
        "Search '{}' in campaign {} returned {} hits",
        search_args.query,
        campaign_id,
        hits.len()
    );

    if search_args.json {
        return Ok(ToolResult::text(serde_json::to_string_pretty(&hits)?));
    }

    Ok(ToolResult::text(format_search_results(
        &hits,
        &campaign.name,
        &search_args.query,
    )))
}
