//! Insertion-ordered collection of pet reports keyed by id.
//!
//! Both the browser controller and the backend store hold their reports in a
//! [`PetDirectory`]. Order matters: the side panel lists reports in the order
//! the backend returned them, so the map is an [`IndexMap`] and removals use
//! `shift_remove` to keep the remaining order intact.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pet::PetReport;
use crate::types::PetId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetDirectory {
    pets: IndexMap<PetId, PetReport>,
}

impl PetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with the given mapping.
    pub fn replace_all(&mut self, pets: IndexMap<PetId, PetReport>) {
        self.pets = pets;
    }

    /// Insert a report under its own id. An existing entry keeps its position.
    pub fn insert(&mut self, report: PetReport) -> Option<PetReport> {
        self.pets.insert(report.id.clone(), report)
    }

    /// Store `report` under `id`, returning the previous record if any.
    pub fn upsert(&mut self, id: PetId, report: PetReport) -> Option<PetReport> {
        self.pets.insert(id, report)
    }

    pub fn remove(&mut self, id: &str) -> Option<PetReport> {
        self.pets.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&PetReport> {
        self.pets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PetReport> {
        self.pets.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Reports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PetReport> {
        self.pets.values()
    }

    /// Reports in display order: found reports after all others, insertion
    /// order preserved within each group.
    pub fn display_order(&self) -> Vec<&PetReport> {
        let mut reports: Vec<&PetReport> = self.pets.values().collect();
        reports.sort_by_key(|r| r.is_found());
        reports
    }

    pub fn as_map(&self) -> &IndexMap<PetId, PetReport> {
        &self.pets
    }
}

impl From<IndexMap<PetId, PetReport>> for PetDirectory {
    fn from(pets: IndexMap<PetId, PetReport>) -> Self {
        Self { pets }
    }
}

impl FromIterator<PetReport> for PetDirectory {
    fn from_iter<I: IntoIterator<Item = PetReport>>(iter: I) -> Self {
        let mut directory = Self::new();
        for report in iter {
            directory.insert(report);
        }
        directory
    }
}
