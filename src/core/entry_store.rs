use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::WorkEntry;
use crate::error::{GanttError, GanttResult};

/// Where the lane ordering comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySource {
    /// Distinct entry categories in first-occurrence order, recomputed on
    /// every replacement.
    Derived,
    /// Supplied by the host; entries must reference one of these lanes.
    Explicit,
}

/// Ordered collection of work entries plus the lane ordering derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryStore {
    entries: Vec<WorkEntry>,
    categories: Vec<String>,
    category_source: CategorySource,
}

impl EntryStore {
    pub fn new(entries: Vec<WorkEntry>, categories: Option<Vec<String>>) -> GanttResult<Self> {
        let (categories, category_source) = match categories {
            Some(explicit) => (distinct(explicit), CategorySource::Explicit),
            None => (derive_categories(&entries), CategorySource::Derived),
        };
        validate_entries(&entries, &categories)?;

        Ok(Self {
            entries,
            categories,
            category_source,
        })
    }

    #[must_use]
    pub fn all(&self) -> &[WorkEntry] {
        &self.entries
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn category_source(&self) -> CategorySource {
        self.category_source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> GanttResult<&WorkEntry> {
        self.entries
            .get(index)
            .ok_or(GanttError::EntryIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Swaps the whole entry set. On error the store is left untouched.
    pub fn replace_all(&mut self, entries: Vec<WorkEntry>) -> GanttResult<()> {
        *self = self.replaced(entries)?;
        Ok(())
    }

    /// Builds the store `replace_all` would produce, keeping the current lane
    /// policy: explicit lanes stay pinned, derived lanes are recomputed.
    pub fn replaced(&self, entries: Vec<WorkEntry>) -> GanttResult<Self> {
        let categories = match self.category_source {
            CategorySource::Explicit => self.categories.clone(),
            CategorySource::Derived => derive_categories(&entries),
        };
        validate_entries(&entries, &categories)?;

        debug!(
            previous_count = self.entries.len(),
            count = entries.len(),
            lanes = categories.len(),
            "replace entries"
        );
        Ok(Self {
            entries,
            categories,
            category_source: self.category_source,
        })
    }

    /// Pins the lane ordering to `categories`, validating current entries.
    pub fn set_explicit_categories(&mut self, categories: Vec<String>) -> GanttResult<()> {
        let categories = distinct(categories);
        validate_entries(&self.entries, &categories)?;
        self.categories = categories;
        self.category_source = CategorySource::Explicit;
        Ok(())
    }

    /// In-place bound update used by drag gestures.
    pub(crate) fn set_bounds(
        &mut self,
        index: usize,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> GanttResult<&WorkEntry> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(GanttError::EntryIndexOutOfRange { index, len })?;
        if start_time > end_time {
            return Err(GanttError::InvalidEntryBounds {
                label: entry.label.clone(),
                start: start_time,
                end: end_time,
            });
        }
        entry.start_time = start_time;
        entry.end_time = end_time;
        Ok(entry)
    }
}

fn distinct(categories: Vec<String>) -> Vec<String> {
    categories
        .into_iter()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn derive_categories(entries: &[WorkEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.category.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn validate_entries(entries: &[WorkEntry], categories: &[String]) -> GanttResult<()> {
    for entry in entries {
        entry.validate_bounds()?;
        if !categories.iter().any(|category| *category == entry.category) {
            return Err(GanttError::UnknownCategory {
                label: entry.label.clone(),
                category: entry.category.clone(),
            });
        }
    }
    Ok(())
}
