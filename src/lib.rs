//! DM Hero entity search
//!
//! Fuzzy, relevance-ranked search over the entities of a tabletop campaign
//! (NPCs, locations, items, factions, lore and players):
//! - `search`: global search with a first-match-wins signal cascade
//! - `scoped`: per-type listing filter that also pulls in entities related
//!   to matching entities of other types

pub mod campaign;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod search;
pub mod tools;
