// src/data.rs
//
// The dataset handed to callers, and the derived id lookup.
//
// - Dataset: people in sheet row order + metadata. Produced fresh by the
//            parser or rebuilt from the cache; both shapes are identical.
// - Lookup:  borrowed `id → record` index over a dataset's people. Not
//            persisted; rebuild it whenever `people` changes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::consts::SOURCE_NAME;
use crate::specs::people::PersonRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub last_updated: DateTime<Utc>,
    pub source: String,
    /// Always `people.len()` of the owning dataset.
    pub record_count: usize,
    /// Set only when no data could be obtained at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Metadata {
    pub fn fresh(now: DateTime<Utc>, source: &str, record_count: usize) -> Self {
        Self { last_updated: now, source: s!(source), record_count, error: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub people: Vec<PersonRecord>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl Dataset {
    /// No rows and no metadata (a sheet with nothing in it).
    pub fn empty() -> Self { Self::default() }

    /// No rows, with `metadata.error` describing why.
    pub fn failed(now: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            people: Vec::new(),
            metadata: Some(Metadata {
                last_updated: now,
                source: s!(SOURCE_NAME),
                record_count: 0,
                error: Some(error.into()),
            }),
        }
    }

    pub fn len(&self) -> usize { self.people.len() }
    pub fn is_empty(&self) -> bool { self.people.is_empty() }

    pub fn error(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.error.as_deref())
    }

    pub fn lookup(&self) -> Lookup<'_> { build_lookup(&self.people) }
}

/* ---------------- Lookup ---------------- */

/// Index people by id in one pass. With duplicate ids the later row wins.
pub fn build_lookup(people: &[PersonRecord]) -> Lookup<'_> {
    let mut by_id = HashMap::with_capacity(people.len());
    for p in people {
        by_id.insert(p.id.as_str(), p);
    }
    Lookup { by_id }
}

#[derive(Clone, Debug, Default)]
pub struct Lookup<'a> {
    by_id: HashMap<&'a str, &'a PersonRecord>,
}

impl<'a> Lookup<'a> {
    pub fn get(&self, id: &str) -> Option<&'a PersonRecord> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize { self.by_id.len() }
    pub fn is_empty(&self) -> bool { self.by_id.is_empty() }

    /// Father then mother, whichever are present in the sheet.
    pub fn parents_of(&self, person: &PersonRecord) -> Vec<&'a PersonRecord> {
        [person.father_id.as_str(), person.mother_id.as_str()]
            .into_iter()
            .filter(|id| !id.is_empty())
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn children_of(&self, person: &PersonRecord) -> Vec<&'a PersonRecord> {
        self.resolve(&person.children_ids)
    }

    pub fn spouses_of(&self, person: &PersonRecord) -> Vec<&'a PersonRecord> {
        self.resolve(&person.spouse_ids)
    }

    pub fn siblings_of(&self, person: &PersonRecord) -> Vec<&'a PersonRecord> {
        self.resolve(&person.sibling_ids)
    }

    // Unknown ids are skipped; the sheet often references people not yet entered.
    fn resolve(&self, ids: &[String]) -> Vec<&'a PersonRecord> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}
