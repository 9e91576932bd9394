//! Mini-intervention catalog: three tactical actions for each of the 25
//! heatmap cells.
//!
//! A `Catalog` is an immutable value. Build one with [`Catalog::parse`] or
//! through [`load_catalog`] / [`CatalogLoader`] and hand out references.

pub mod loader;
pub mod parse;
pub mod source;

pub use loader::{CatalogLoader, load_catalog};
pub use source::{CatalogSource, FileSource, HttpSource, InlineSource, source_from_location};

use crate::error::{InsightsError, Result};
use crate::flavor::Flavor;
use crate::taxonomy::{CellId, ConcernLevel, RootCause};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiniIntervention {
    /// `{cell}_A{slot}`, e.g. `L2_C4_A3`.
    pub id: String,
    pub cell_id: CellId,
    pub level_id: u8,
    pub category_id: u8,
    /// Persona name from the source table, e.g. "The Hidden AI".
    pub category: String,
    pub reason: String,
    pub level: String,
    pub description: String,
    pub shows_up_as: String,
    pub action_number: u8,
    pub flavor: Flavor,
    pub title: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCategory {
    pub cell_id: CellId,
    pub category: String,
    pub reason: String,
    pub level: String,
    pub description: String,
    pub shows_up_as: String,
    pub actions: Vec<MiniIntervention>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Source order.
    categories: Vec<CatalogCategory>,
    by_cell: HashMap<CellId, usize>,
    /// action id -> (category index, action index)
    by_action: HashMap<String, (usize, usize)>,
}

impl Catalog {
    pub(crate) fn insert(&mut self, category: CatalogCategory) -> bool {
        if self.by_cell.contains_key(&category.cell_id) {
            return false;
        }
        let idx = self.categories.len();
        self.by_cell.insert(category.cell_id, idx);
        for (a, action) in category.actions.iter().enumerate() {
            self.by_action.insert(action.id.clone(), (idx, a));
        }
        self.categories.push(category);
        true
    }

    pub fn len(&self) -> usize {
        self.by_action.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_action.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Actions for a heatmap cell, slot order. Empty for unknown or absent cells.
    pub fn for_cell(&self, level_id: u8, category_id: u8) -> &[MiniIntervention] {
        self.category_for_cell(level_id, category_id)
            .map(|c| c.actions.as_slice())
            .unwrap_or(&[])
    }

    /// Like [`Catalog::for_cell`], but ids outside 1..=5 are an error
    /// instead of an empty list.
    pub fn actions_for(&self, level_id: u8, category_id: u8) -> Result<&[MiniIntervention]> {
        if CellId::from_ids(level_id, category_id).is_none() {
            return Err(InsightsError::Validation {
                message: format!(
                    "cell L{}_C{} is out of range; level and category must be 1-5",
                    level_id, category_id
                ),
            });
        }
        Ok(self.for_cell(level_id, category_id))
    }

    pub fn category_for_cell(&self, level_id: u8, category_id: u8) -> Option<&CatalogCategory> {
        let cell = CellId::from_ids(level_id, category_id)?;
        self.category(cell)
    }

    pub fn category(&self, cell: CellId) -> Option<&CatalogCategory> {
        self.by_cell.get(&cell).map(|&i| &self.categories[i])
    }

    pub fn by_id(&self, id: &str) -> Option<&MiniIntervention> {
        let &(c, a) = self.by_action.get(id.trim())?;
        self.categories.get(c)?.actions.get(a)
    }

    pub fn all_categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn all_interventions(&self) -> impl Iterator<Item = &MiniIntervention> {
        self.categories.iter().flat_map(|c| c.actions.iter())
    }

    /// Case-insensitive substring match on title, explanation, persona
    /// category or reason.
    pub fn search(&self, query: &str) -> Vec<&MiniIntervention> {
        let q = query.to_lowercase();
        self.all_interventions()
            .filter(|m| {
                m.title.to_lowercase().contains(&q)
                    || m.explanation.to_lowercase().contains(&q)
                    || m.category.to_lowercase().contains(&q)
                    || m.reason.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn filter_by_reason(&self, reason: RootCause) -> Vec<&MiniIntervention> {
        self.all_interventions()
            .filter(|m| m.cell_id.category == reason)
            .collect()
    }

    pub fn filter_by_level(&self, level: ConcernLevel) -> Vec<&MiniIntervention> {
        self.all_interventions()
            .filter(|m| m.cell_id.level == level)
            .collect()
    }

    pub fn filter_by_flavor(&self, flavor: Flavor) -> Vec<&MiniIntervention> {
        self.all_interventions()
            .filter(|m| m.flavor == flavor)
            .collect()
    }

    pub fn group_by_reason(&self) -> BTreeMap<RootCause, Vec<&MiniIntervention>> {
        let mut groups: BTreeMap<RootCause, Vec<&MiniIntervention>> = BTreeMap::new();
        for m in self.all_interventions() {
            groups.entry(m.cell_id.category).or_default().push(m);
        }
        groups
    }

    pub fn group_by_level(&self) -> BTreeMap<ConcernLevel, Vec<&MiniIntervention>> {
        let mut groups: BTreeMap<ConcernLevel, Vec<&MiniIntervention>> = BTreeMap::new();
        for m in self.all_interventions() {
            groups.entry(m.cell_id.level).or_default().push(m);
        }
        groups
    }
}
