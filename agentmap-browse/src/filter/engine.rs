//! Filter engine
//!
//! Holds the record source, the load-time taxonomy and the live
//! [`Selection`]. Every mutator re-runs the whole pipeline; nothing is
//! patched incrementally.
//!
//! # Pipeline
//! 1. Base set: tag path (level-1/2/3) and free-text search. Auxiliary
//!    facets are not applied here.
//! 2. Facet options: distinct facet values of the base set. A selected
//!    facet value missing from its own options is stale and gets cleared.
//! 3. Final set: base set narrowed by the remaining auxiliary facets.
//! 4. Order: [`crate::sort::compare`], stable.
//!
//! Facet options come from the base set only, so auxiliary facets never
//! narrow each other's option lists.

use std::sync::Arc;

use agentmap_common::{AuxFacet, Record};
use tracing::debug;

use super::selection::{matches_search, Selection};
use crate::sort::sort_records;
use crate::taxonomy::{FacetVocabularies, Taxonomy};

/// Selectable auxiliary facet values for the current base set
pub type FacetOptions = FacetVocabularies;

/// Result of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Final set in display order
    pub records: Vec<Arc<Record>>,
    pub facet_options: FacetOptions,
    /// Selection after stale facet values were cleared
    pub selection: Selection,
    /// Size of the unfiltered record source
    pub total: usize,
}

impl FilterOutcome {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owns filter state for one session
pub struct FilterEngine {
    records: Vec<Arc<Record>>,
    taxonomy: Taxonomy,
    selection: Selection,
    outcome: FilterOutcome,
}

impl FilterEngine {
    /// Build the engine over canonical records
    ///
    /// The taxonomy is derived here, once. The initial outcome is the full
    /// record set in display order.
    pub fn new(records: Vec<Record>) -> Self {
        let taxonomy = Taxonomy::build(&records);
        let mut engine = Self {
            records: records.into_iter().map(Arc::new).collect(),
            taxonomy,
            selection: Selection::default(),
            outcome: FilterOutcome::default(),
        };
        engine.run_pipeline();
        debug!(
            "Filter engine ready: {} records, {} level-1 tags",
            engine.records.len(),
            engine.taxonomy.tree.len()
        );
        engine
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// All records in load order
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Look up a record for the detail view
    pub fn find(&self, id: u64) -> Option<&Arc<Record>> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Outcome of the most recent pipeline run
    pub fn outcome(&self) -> &FilterOutcome {
        &self.outcome
    }

    /// Select a level-1 tag; empty string clears it
    ///
    /// Always clears level-2, level-3 and all auxiliary facets.
    pub fn set_level1(&mut self, value: &str) -> &FilterOutcome {
        self.selection.level1 = value.to_string();
        self.selection.level2.clear();
        self.selection.level3.clear();
        self.selection.clear_aux();
        self.apply()
    }

    /// Toggle a level-2 tag under the active level-1
    ///
    /// Re-selecting the active value deselects it. Any change clears level-3.
    /// Values that are not a branch of the active level-1 are ignored.
    pub fn set_level2(&mut self, value: &str) -> &FilterOutcome {
        if value.is_empty() || self.selection.level2 == value {
            self.selection.level2.clear();
            self.selection.level3.clear();
        } else if self.taxonomy.has_level2(&self.selection.level1, value) {
            self.selection.level2 = value.to_string();
            self.selection.level3.clear();
        } else {
            debug!(
                "Ignoring level-2 '{}': not a branch of level-1 '{}'",
                value, self.selection.level1
            );
        }
        self.apply()
    }

    /// Toggle a level-3 tag under the active level-2
    pub fn set_level3(&mut self, value: &str) -> &FilterOutcome {
        if value.is_empty() || self.selection.level3 == value {
            self.selection.level3.clear();
        } else if self.taxonomy.has_level3(
            &self.selection.level1,
            &self.selection.level2,
            value,
        ) {
            self.selection.level3 = value.to_string();
        } else {
            debug!(
                "Ignoring level-3 '{}': not a leaf of '{}' / '{}'",
                value, self.selection.level1, self.selection.level2
            );
        }
        self.apply()
    }

    /// Toggle one auxiliary facet; the other facets and the tag path are untouched
    pub fn set_aux_facet(&mut self, facet: AuxFacet, value: &str) -> &FilterOutcome {
        let current = self.selection.aux_mut(facet);
        if value.is_empty() || current == value {
            current.clear();
        } else {
            *current = value.to_string();
        }
        self.apply()
    }

    /// Set the free-text search (case-insensitive containment)
    ///
    /// Surrounding whitespace is trimmed, so a blank search matches
    /// everything. Synchronous; debouncing belongs to the caller.
    pub fn set_search(&mut self, text: &str) -> &FilterOutcome {
        self.selection.search = text.trim().to_string();
        self.apply()
    }

    /// Drop every selection
    pub fn clear(&mut self) -> &FilterOutcome {
        self.selection = Selection::default();
        self.apply()
    }

    /// Recompute the outcome from the current selection
    pub fn apply(&mut self) -> &FilterOutcome {
        self.run_pipeline();
        &self.outcome
    }

    fn run_pipeline(&mut self) {
        let needle = self.selection.search.to_lowercase();

        // Stage 1: tag path + search
        let base: Vec<&Arc<Record>> = self
            .records
            .iter()
            .filter(|r| self.selection.matches_tag_path(r) && matches_search(r, &needle))
            .collect();

        // Stage 2: facet options from the base set, stale selections cleared
        let facet_options = FacetVocabularies::collect(base.iter().map(|r| Arc::as_ref(r)));
        for facet in AuxFacet::ALL {
            let selected = self.selection.aux_mut(facet);
            if !selected.is_empty() && !facet_options.contains(facet, selected) {
                debug!("Clearing stale {} selection '{}'", facet, selected);
                selected.clear();
            }
        }

        // Stage 3: auxiliary facets
        let mut records: Vec<Arc<Record>> = base
            .into_iter()
            .filter(|r| self.selection.matches_aux(r))
            .cloned()
            .collect();

        // Stage 4: display order
        sort_records(&mut records);

        debug!(
            "Filter pipeline: {} of {} records match",
            records.len(),
            self.records.len()
        );

        self.outcome = FilterOutcome {
            records,
            facet_options,
            selection: self.selection.clone(),
            total: self.records.len(),
        };
    }
}
