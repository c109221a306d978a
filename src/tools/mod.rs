//! MCP tools implementation

pub mod list;
pub mod search;


use crate::campaign::{Campaign, CampaignStore};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::search::ScoringConfig;
use std::path::Path;
use std::sync::Arc;
use tokio::time::Duration;

/// Total time budget for a single tool call
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Loaded campaign data plus the scoring constants every tool call uses
#[derive(Clone)]
pub struct ToolContext {
    store: Arc<CampaignStore>,
    scoring: ScoringConfig,
}

impl ToolContext {
    pub fn new(store: CampaignStore, scoring: ScoringConfig) -> Self {
        Self {
            store: Arc::new(store),
            scoring,
        }
    }

    /// Load the campaign snapshot named by `data_file` or the configuration
    pub fn load(data_file: Option<&Path>, config: &AppConfig) -> Result<Self, AppError> {
        let path = config.resolve_data_file(data_file).ok_or_else(|| {
            AppError::ConfigError(
                "No campaign data file: pass --data, set DMHERO_DATA or data_file in the config"
                    .to_string(),
            )
        })?;

        let store = CampaignStore::load(&path)?;
        Ok(Self::new(store, config.scoring.clone()))
    }

    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub(crate) fn require_campaign(&self, campaign_id: i64) -> Result<&Campaign, AppError> {
        self.store
            .campaign(campaign_id)
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} does not exist", campaign_id)))
    }
}
