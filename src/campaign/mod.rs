//! Campaign data access
//!
//! Loads a campaign snapshot and produces the candidates and relation lookups
//! consumed by the search core.

pub mod error;
pub mod store;
pub mod types;

pub use error::CampaignError;
pub use store::CampaignStore;
pub use types::{Campaign, CampaignSnapshot, Entity, EntityType, Relation};
