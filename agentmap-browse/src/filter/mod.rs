//! Filter engine: live selection state and the two-stage narrowing pipeline

mod engine;
mod selection;

pub use engine::{FacetOptions, FilterEngine, FilterOutcome};
pub use selection::Selection;
