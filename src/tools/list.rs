//! List tool implementation
//!
//! Implements the `list(campaign, type, query?)` MCP tool: one entity type,
//! filtered by the scoped search with cross-entity expansion

use super::{ToolContext, TOOL_TIMEOUT};
use crate::campaign::EntityType;
use crate::cli::ListArgs;
use crate::error::{validate_campaign, validate_entity_type, AppError, MAX_QUERY_LEN};
use crate::mcp::{McpResponse, ToolResult};
use crate::search::{Candidate, ScopedSearch};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info};

/// Format a listing into markdown
pub fn format_listing(
    entities: &[Candidate],
    entity_type: EntityType,
    campaign_name: &str,
    query: Option<&str>,
) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# {} · {} entries\n\n",
        entity_type.label(),
        entities.len()
    ));

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => md.push_str(&format!("{} · filter \"{}\"\n\n", campaign_name, query)),
        None => md.push_str(&format!("{}\n\n", campaign_name)),
    }

    if entities.is_empty() {
        md.push_str("Nothing to show.\n");
        return md;
    }

    for entity in entities {
        md.push_str(&format!("- **{}** (#{})\n", entity.display_name(), entity.id));
        if let Some(description) = entity.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                md.push_str(&format!("  {}\n", description));
            }
        }
    }

    md
}

/// Handle list tool call (MCP)
pub async fn handle_list(id: Option<Value>, args: Value, ctx: &ToolContext) -> McpResponse {
    match timeout(TOOL_TIMEOUT, handle_list_impl(args, ctx)).await {
        Ok(result) => match result.and_then(|content| Ok(serde_json::to_value(content)?)) {
            Ok(content) => McpResponse::success(id, content),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(id, "timeout", "List request exceeded 120 second timeout"),
    }
}

async fn handle_list_impl(args: Value, ctx: &ToolContext) -> Result<ToolResult, AppError> {
    let list_args: ListArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_list(ctx, list_args).await
}

/// Shared implementation for list (used by MCP and CLI)
pub async fn execute_list(ctx: &ToolContext, list_args: ListArgs) -> Result<ToolResult, AppError> {
    let campaign_id = validate_campaign(&list_args.campaign)?;
    let entity_type = validate_entity_type(&list_args.entity_type)?;
    if let Some(query) = list_args.query.as_deref() {
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(AppError::InvalidInput(format!(
                "Query too long, maximum {} characters",
                MAX_QUERY_LEN
            )));
        }
    }

    let campaign = ctx.require_campaign(campaign_id)?;

    debug!(
        "List request for {} in campaign {}, query {:?}",
        entity_type, campaign_id, list_args.query
    );

    let store = ctx.store();
    let targets = store.candidates_of_type(campaign_id, entity_type);
    let others = store.candidates_excluding_type(campaign_id, entity_type);

    let scoped = ScopedSearch::with_config(entity_type, ctx.scoring().clone());
    let entities = scoped.run(list_args.query.as_deref(), &targets, &others, store);

    info!(
        "Listed {} of {} {} entries in campaign {}",
        entities.len(),
        targets.len(),
        entity_type,
        campaign_id
    );

    if list_args.json {
        return Ok(ToolResult::text(serde_json::to_string_pretty(&entities)?));
    }

    Ok(ToolResult::text(format_listing(
        &entities,
        entity_type,
        &campaign.name,
        list_args.query.as_deref(),
    )))
}
