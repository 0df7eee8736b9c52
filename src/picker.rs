// src/picker.rs

//! Cross-reference picker used by the section and mock test builders.
//!
//! Each bucket keeps two disjoint pools: questions selected into the form
//! and questions still available (not referenced by any other section).

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::error::AdminError;
use crate::models::question::{QuestionKind, QuestionRef};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossReferencePicker {
    buckets: Vec<QuestionKind>,
    caps: BTreeMap<QuestionKind, usize>,
    selected: BTreeMap<QuestionKind, Vec<QuestionRef>>,
    available: BTreeMap<QuestionKind, Vec<QuestionRef>>,
}

impl CrossReferencePicker {
    /// Picker over `buckets` with no caps and empty pools.
    pub fn new(buckets: Vec<QuestionKind>) -> Self {
        Self {
            buckets,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, bucket: QuestionKind, cap: usize) -> Self {
        self.caps.insert(bucket, cap);
        self
    }

    pub fn buckets(&self) -> &[QuestionKind] {
        &self.buckets
    }

    pub fn cap(&self, bucket: QuestionKind) -> Option<usize> {
        self.caps.get(&bucket).copied()
    }

    pub fn selected(&self, bucket: QuestionKind) -> &[QuestionRef] {
        self.selected.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn available(&self, bucket: QuestionKind) -> &[QuestionRef] {
        self.available.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_ids(&self, bucket: QuestionKind) -> Vec<String> {
        self.selected(bucket)
            .iter()
            .filter_map(|r| r.id().map(str::to_string))
            .collect()
    }

    /// Replaces the selection of `bucket`, e.g. from a section opened for editing.
    /// References without an id and repeated ids are dropped.
    pub fn set_selected(&mut self, bucket: QuestionKind, refs: Vec<QuestionRef>) {
        let mut seen = HashSet::new();
        let refs: Vec<QuestionRef> = refs
            .into_iter()
            .filter(|r| r.id().is_some_and(|id| seen.insert(id.to_string())))
            .collect();
        self.selected.insert(bucket, refs);

        // keep pools disjoint if the available pool was loaded first
        let chosen: HashSet<String> = self.selected_ids(bucket).into_iter().collect();
        if let Some(pool) = self.available.get_mut(&bucket) {
            pool.retain(|r| r.id().is_some_and(|id| !chosen.contains(id)));
        }
    }

    /// Replaces the available pools with a fresh unused mapping.
    ///
    /// Anything already selected is filtered out by id. Buckets absent from
    /// `pool` end up empty.
    pub fn load_unused(&mut self, mut pool: BTreeMap<QuestionKind, Vec<QuestionRef>>) {
        self.available.clear();
        for bucket in self.buckets.clone() {
            let chosen: HashSet<String> = self.selected_ids(bucket).into_iter().collect();
            let mut seen = HashSet::new();
            let refs: Vec<QuestionRef> = pool
                .remove(&bucket)
                .unwrap_or_default()
                .into_iter()
                .filter(|r| match r.id() {
                    Some(id) => !chosen.contains(id) && seen.insert(id.to_string()),
                    None => false,
                })
                .collect();
            self.available.insert(bucket, refs);
        }
    }

    /// Moves question `id` of `bucket` from the available pool to the selection.
    pub fn select(&mut self, bucket: QuestionKind, id: &str) -> Result<(), AdminError> {
        let position = self
            .available(bucket)
            .iter()
            .position(|r| r.id() == Some(id))
            .ok_or_else(|| AdminError::NotFound(format!("{} question {} is not available", bucket.short_code(), id)))?;

        if let Some(cap) = self.cap(bucket) {
            if self.selected(bucket).len() >= cap {
                return Err(AdminError::SelectionCap(bucket, cap));
            }
        }

        let pool = self.available.entry(bucket).or_default();
        let item = pool.remove(position);
        self.selected.entry(bucket).or_default().push(item);
        Ok(())
    }

    /// Moves question `id` of `bucket` back to the available pool.
    pub fn deselect(&mut self, bucket: QuestionKind, id: &str) -> Result<(), AdminError> {
        let position = self
            .selected(bucket)
            .iter()
            .position(|r| r.id() == Some(id))
            .ok_or_else(|| AdminError::NotFound(format!("{} question {} is not selected", bucket.short_code(), id)))?;

        let selection = self.selected.entry(bucket).or_default();
        let item = selection.remove(position);
        self.available.entry(bucket).or_default().push(item);
        Ok(())
    }

    pub fn total_selected(&self) -> usize {
        self.selected.values().map(Vec::len).sum()
    }

    /// `{ <bucketKey>: [ids] }` for every bucket of the picker.
    pub fn selection_json(&self) -> serde_json::Map<String, Value> {
        self.buckets
            .iter()
            .map(|bucket| {
                let ids = self.selected_ids(*bucket).into_iter().map(Value::String).collect();
                (bucket.bucket_key().to_string(), Value::Array(ids))
            })
            .collect()
    }
}

/// Decodes an unused-pool response: `{ <bucketKey>: [question, ...] }`.
/// Unknown keys and malformed entries are ignored.
pub fn parse_unused(data: Value) -> BTreeMap<QuestionKind, Vec<QuestionRef>> {
    let Value::Object(map) = data else {
        return BTreeMap::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| {
            let kind = QuestionKind::from_bucket_key(&key)?;
            let Value::Array(items) = value else {
                return None;
            };
            let refs = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<QuestionRef>(item).ok())
                .collect();
            Some((kind, refs))
        })
        .collect()
}
