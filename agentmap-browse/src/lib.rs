//! agentmap-browse library - catalog filter-and-sort engine
//!
//! Pipeline: raw JSON → [`normalize`] → [`taxonomy`] (built once) →
//! [`filter::FilterEngine`] (live selection state) → [`sort`] → presentation.

pub mod collation;
pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod render;
pub mod revenue;
pub mod sort;
pub mod taxonomy;
pub mod validate;

use agentmap_common::catalog::CatalogDocument;

pub use filter::{FacetOptions, FilterEngine, FilterOutcome, Selection};
pub use taxonomy::{FacetVocabularies, Taxonomy};

/// Normalize a loaded document and hand it to a fresh engine
pub fn engine_from_document(document: &CatalogDocument) -> FilterEngine {
    FilterEngine::new(normalize::normalize(&document.companies))
}
