use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Failed to read campaign data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid campaign data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate campaign id: {0}")]
    DuplicateCampaign(i64),
    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(i64),
    #[error("Entity {entity_id} belongs to unknown campaign {campaign_id}")]
    UnknownCampaign { entity_id: i64, campaign_id: i64 },
    #[error("Relation {from} -> {to} references an unknown entity")]
    DanglingRelation { from: i64, to: i64 },
    #[error("Relation {from} -> {to} crosses campaigns")]
    CrossCampaignRelation { from: i64, to: i64 },
}
