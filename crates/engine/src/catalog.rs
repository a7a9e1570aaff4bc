//! File-backed entity index implementing [`Matcher`].
//!
//! ```json
//! {
//!   "kinds": ["type", "generation"],
//!   "entities": [
//!     { "id": "charizard", "traits": { "type": ["Fire", "Flying"], "generation": ["1"] } }
//!   ]
//! }
//! ```
//!
//! `kinds` lists the kinds this catalog can answer for. When omitted it
//! defaults to every kind that appears in some entity's traits.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::QuerySpec;
use crate::resolve::{MatchError, Matcher};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    kinds: Option<Vec<String>>,
    entities: Vec<EntityRecord>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    id: String,
    #[serde(default)]
    traits: HashMap<String, Vec<String>>,
}

#[derive(Debug)]
struct Entity {
    id: String,
    /// kind → lower-cased values
    traits: HashMap<String, HashSet<String>>,
}

/// In-memory entity index. Answers in catalog file order.
#[derive(Debug)]
pub struct Catalog {
    kinds: BTreeSet<String>,
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut entities = Vec::with_capacity(file.entities.len());
        for record in file.entities {
            if !seen.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateEntity(record.id));
            }
            let traits = record
                .traits
                .into_iter()
                .map(|(kind, values)| {
                    let values: HashSet<String> =
                        values.iter().map(|v| v.to_ascii_lowercase()).collect();
                    (kind, values)
                })
                .collect();
            entities.push(Entity { id: record.id, traits });
        }

        let kinds: BTreeSet<String> = match file.kinds {
            Some(kinds) => kinds.into_iter().collect(),
            None => entities
                .iter()
                .flat_map(|e| e.traits.keys().cloned())
                .collect(),
        };

        log::debug!("catalog loaded: {} entities, {} kinds", entities.len(), kinds.len());
        Ok(Self { kinds, entities })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }
}

impl Matcher for Catalog {
    fn find(&self, query: &QuerySpec) -> Result<Vec<String>, MatchError> {
        if let Some(kind) = query.kinds().find(|k| !self.supports(k.as_str())) {
            return Err(MatchError::UnsupportedKind(kind.to_string()));
        }

        let wanted: Vec<(&str, Vec<String>)> = query
            .iter()
            .map(|(kind, q)| {
                let values: Vec<String> =
                    q.values().iter().map(|v| v.to_ascii_lowercase()).collect();
                (kind.as_str(), values)
            })
            .collect();

        let ids = self
            .entities
            .iter()
            .filter(|entity| {
                wanted.iter().all(|(kind, values)| match entity.traits.get(*kind) {
                    Some(held) => values.iter().all(|v| held.contains(v)),
                    None => false,
                })
            })
            .map(|entity| entity.id.clone())
            .collect();
        Ok(ids)
    }
}
