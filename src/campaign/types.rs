//! Campaign record types
//!
//! The JSON snapshot format read by the campaign store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of campaign entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Npc,
    Location,
    Item,
    Faction,
    Lore,
    Player,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::Npc,
        EntityType::Location,
        EntityType::Item,
        EntityType::Faction,
        EntityType::Lore,
        EntityType::Player,
    ];

    /// Display icon name
    pub fn icon(&self) -> &'static str {
        match self {
            EntityType::Npc => "mdi-account",
            EntityType::Location => "mdi-map-marker",
            EntityType::Item => "mdi-sword",
            EntityType::Faction => "mdi-shield-account",
            EntityType::Lore => "mdi-book-open-variant",
            EntityType::Player => "mdi-account-star",
        }
    }

    /// Display color
    pub fn color(&self) -> &'static str {
        match self {
            EntityType::Npc => "#D4A574",
            EntityType::Location => "#8B7355",
            EntityType::Item => "#CC8844",
            EntityType::Faction => "#7B92AB",
            EntityType::Lore => "#9C6B98",
            EntityType::Player => "#4CAF50",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Npc => "NPC",
            EntityType::Location => "Location",
            EntityType::Item => "Item",
            EntityType::Faction => "Faction",
            EntityType::Lore => "Lore",
            EntityType::Player => "Player",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = String;

    /// Accepts singular or plural names, case-insensitive ("npc", "NPCs", "lore")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npc" | "npcs" => Ok(EntityType::Npc),
            "location" | "locations" => Ok(EntityType::Location),
            "item" | "items" => Ok(EntityType::Item),
            "faction" | "factions" => Ok(EntityType::Faction),
            "lore" => Ok(EntityType::Lore),
            "player" | "players" => Ok(EntityType::Player),
            other => Err(format!(
                "unknown entity type '{}', expected one of: npc, location, item, faction, lore, player",
                other
            )),
        }
    }
}

/// A campaign; every entity belongs to exactly one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
}

/// Stored entity row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: i64,
    pub campaign_id: i64,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form per-type fields (player name, class, ...)
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Soft-delete marker
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Directed relation between two entities; searched in both directions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub from_entity_id: i64,
    pub to_entity_id: i64,
    #[serde(default)]
    pub relation_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// On-disk campaign data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}
