//! # Agent Map Common Library
//!
//! Shared code for the Agent Map catalog tools including:
//! - Canonical record model and taxonomy vocabulary
//! - Catalog document loading
//! - Configuration loading
//! - ARR/MAU display formatting

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{AgentLayer, AuxFacet, Record};
