use crate::control::{build_options, render_options};
use crate::record::{OptionRecord, ParentId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Last applied response per parent id for one component.
///
/// Written only when a response was swapped into the control, and never
/// consulted before a fetch. Failed and superseded requests leave it alone.
/// Entries live as long as the owning populator.
#[derive(Debug, Default)]
pub struct OptionsCache {
    entries: RwLock<HashMap<ParentId, Vec<OptionRecord>>>,
}

impl OptionsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `records` for `parent`, returning the entry it replaced.
    pub fn store(&self, parent: ParentId, records: Vec<OptionRecord>) -> Option<Vec<OptionRecord>> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(parent, records)
    }

    pub fn get(&self, parent: &ParentId) -> Option<Vec<OptionRecord>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(parent)
            .cloned()
    }

    /// Inserted markup for `parent`: the built list before the prior
    /// selection was restored, placeholder selected. Matches
    /// `Applied::markup` of the call that stored the entry.
    pub fn rendered(&self, parent: &ParentId) -> Option<String> {
        self.get(parent)
            .map(|records| render_options(&build_options(&records)))
    }

    pub fn contains(&self, parent: &ParentId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(parent)
    }

    pub fn parents(&self) -> Vec<ParentId> {
        let mut parents: Vec<ParentId> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        parents.sort();
        parents
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
