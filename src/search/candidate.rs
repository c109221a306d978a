//! Search inputs and outputs

use crate::campaign::EntityType;
use serde::Serialize;
use serde_json::Value;

/// An entity under consideration for a search result. Read-only to the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub icon: &'static str,
    pub color: &'static str,
    /// Only consulted by listings whose field policy includes metadata
    #[serde(skip)]
    pub metadata: Option<Value>,
    /// Names of entities one relation hop away, in either direction
    #[serde(skip)]
    pub linked_entities: Vec<String>,
}

impl Candidate {
    pub fn new(id: i64, name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: None,
            entity_type,
            icon: entity_type.icon(),
            color: entity_type.color(),
            metadata: None,
            linked_entities: Vec::new(),
        }
    }

    /// Candidate whose name is missing in storage
    pub fn unnamed(id: i64, entity_type: EntityType) -> Self {
        Self {
            name: None,
            ..Self::new(id, String::new(), entity_type)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_linked<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.linked_entities = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    /// String leaves of the metadata object, depth first
    pub fn metadata_strings(&self) -> Vec<&str> {
        fn collect<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
            match value {
                Value::String(s) => out.push(s),
                Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
                Value::Object(map) => map.values().for_each(|v| collect(v, out)),
                _ => {}
            }
        }

        let mut out = Vec::new();
        if let Some(metadata) = &self.metadata {
            collect(metadata, &mut out);
        }
        out
    }
}

/// A global search result: the candidate plus its cleaned linked names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub linked_entities: Vec<String>,
}
