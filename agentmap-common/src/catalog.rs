//! Catalog document loading
//!
//! The catalog is one pre-fetched JSON document. Records stay as raw JSON
//! values here; normalization happens in `agentmap-browse`.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::Result;

/// Top-level catalog document
///
/// Only `companies` is required. `metadata` is a loose vocabulary hint and
/// is never needed to build the taxonomy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub total_companies: Option<u64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub companies: Vec<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl CatalogDocument {
    /// Parse a document from JSON text
    ///
    /// A top-level array is accepted as a bare record list.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Array(companies) => Ok(Self {
                companies,
                ..Default::default()
            }),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    /// `lastUpdate` as a calendar date (`YYYY-MM-DD`)
    pub fn last_update_date(&self) -> Option<NaiveDate> {
        self.last_update
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
    }
}

/// Load the catalog document from disk
pub fn load_catalog(path: &Path) -> Result<CatalogDocument> {
    debug!("Reading catalog from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let document = CatalogDocument::from_json_str(&text)?;

    info!(
        "Catalog loaded: {} records (version {}, last update {}, metadata: {})",
        document.companies.len(),
        document.version.as_deref().unwrap_or("unknown"),
        document.last_update.as_deref().unwrap_or("unknown"),
        document.metadata.is_some()
    );

    Ok(document)
}
