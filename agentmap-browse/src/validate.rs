//! Catalog data validation
//!
//! Checks canonical records for problems worth fixing in the source data.
//! Validation never changes records and never affects filtering.
//! [`validate_document`] also checks ids as written, since normalization
//! reassigns duplicates.
//!
//! # Checks
//! - **Errors**: missing name, duplicate id, level-2 without level-1,
//!   level-3 without level-2
//! - **Warnings**: duplicate name, unranked level-1 tag, description length
//!   outside 10-500 characters, website not an http(s) URL

use std::collections::{HashMap, HashSet};
use std::fmt;

use agentmap_common::{AgentLayer, Record};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::normalize::{normalize, raw_id};

const DESCRIPTION_MIN_CHARS: usize = 10;
const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.pad("error"),
            Severity::Warning => f.pad("warning"),
        }
    }
}

/// One problem found in one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub record_id: u64,
    pub name: String,
    pub severity: Severity,
    pub message: String,
}

/// All problems found in a catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub records_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    fn push(&mut self, record: &Record, severity: Severity, message: String) {
        self.issues.push(ValidationIssue {
            record_id: record.id,
            name: record.name.clone(),
            severity,
            message,
        });
    }
}

/// Validate every record in the catalog
pub fn validate_catalog(records: &[Record]) -> ValidationReport {
    let mut report = ValidationReport {
        records_checked: records.len(),
        ..Default::default()
    };
    let mut ids = HashSet::new();
    let mut names: HashMap<&str, u64> = HashMap::new();

    for record in records {
        if record.name.trim().is_empty() {
            report.push(record, Severity::Error, "missing name".to_string());
        }

        if !ids.insert(record.id) {
            report.push(record, Severity::Error, format!("duplicate id {}", record.id));
        }

        if !record.name.is_empty() {
            if let Some(first) = names.insert(record.name.as_str(), record.id) {
                report.push(
                    record,
                    Severity::Warning,
                    format!("name \"{}\" also used by id {}", record.name, first),
                );
            }
        }

        check_tag_path(record, &mut report);
        check_description(record, &mut report);

        if let Some(website) = record.extra_str("website") {
            if !website.is_empty() && !website.starts_with("http") {
                report.push(
                    record,
                    Severity::Warning,
                    format!("website is not an http(s) URL: {}", website),
                );
            }
        }
    }

    debug!(
        "Validated {} records: {} issues",
        report.records_checked,
        report.issues.len()
    );
    report
}

/// Validate a raw record batch
///
/// Runs [`validate_catalog`] over the normalized records, then reports ids
/// that were repeated in the raw batch.
pub fn validate_document(raw: &[Value]) -> ValidationReport {
    let records = normalize(raw);
    let mut report = validate_catalog(&records);

    let mut seen = HashSet::new();
    for (value, record) in raw.iter().zip(&records) {
        if let Some(id) = raw_id(value) {
            if !seen.insert(id) {
                report.push(
                    record,
                    Severity::Error,
                    format!("duplicate id {} (reassigned to {})", id, record.id),
                );
            }
        }
    }
    report
}

fn check_tag_path(record: &Record, report: &mut ValidationReport) {
    let has_l1 = !record.agent_tag.is_empty();
    let has_l2 = !record.agent_tag_level2.is_empty();
    let has_l3 = !record.agent_tag_level3.is_empty();

    if has_l2 && !has_l1 {
        report.push(record, Severity::Error, "level-2 tag without level-1".to_string());
    }
    if has_l3 && !has_l2 {
        report.push(record, Severity::Error, "level-3 tag without level-2".to_string());
    }
    if has_l1 && AgentLayer::from_label(&record.agent_tag).is_none() {
        report.push(
            record,
            Severity::Warning,
            format!("unranked level-1 tag \"{}\"", record.agent_tag),
        );
    }
}

fn check_description(record: &Record, report: &mut ValidationReport) {
    let chars = record.description.chars().count();
    if chars > 0 && !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&chars) {
        report.push(
            record,
            Severity::Warning,
            format!(
                "description length {} outside {}-{}",
                chars, DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid(id: u64, name: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
            agent_tag: "大模型层".to_string(),
            description: "A perfectly ordinary description.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_catalog() {
        let report = validate_catalog(&[valid(1, "a"), valid(2, "b")]);
        assert_eq!(report.records_checked, 2);
        assert!(report.issues.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_duplicate_id_and_name() {
        let report = validate_catalog(&[valid(1, "a"), valid(1, "a")]);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warnings().count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn test_broken_tag_path() {
        let mut orphan = valid(1, "a");
        orphan.agent_tag.clear();
        orphan.agent_tag_level2 = "B".to_string();
        let mut skipped = valid(2, "b");
        skipped.agent_tag_level3 = "x".to_string();

        let report = validate_catalog(&[orphan, skipped]);
        let messages: Vec<&str> = report.errors().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["level-2 tag without level-1", "level-3 tag without level-2"]
        );
    }

    #[test]
    fn test_warnings() {
        let mut record = valid(1, "a");
        record.agent_tag = "robotics".to_string();
        record.description = "short".to_string();
        record
            .extra
            .insert("website".to_string(), json!("www.example.com"));

        let report = validate_catalog(&[record]);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 3);
    }

    #[test]
    fn test_document_reports_raw_duplicate_ids() {
        let raw = vec![
            json!({"id": 1, "name": "a", "agentTag": "大模型层"}),
            json!({"id": 1, "name": "b", "agentTag": "大模型层"}),
            json!({"name": "c", "agentTag": "大模型层"}),
        ];
        let report = validate_document(&raw);
        assert!(report.has_errors());

        let errors: Vec<&ValidationIssue> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].name, "b");
        assert_eq!(errors[0].record_id, 2);
        assert_eq!(errors[0].message, "duplicate id 1 (reassigned to 2)");
    }

    #[test]
    fn test_document_without_duplicates_is_clean() {
        let raw = vec![
            json!({"id": 1, "name": "a", "agentTag": "大模型层"}),
            json!({"id": 2, "name": "b", "agentTag": "大模型层"}),
        ];
        assert!(!validate_document(&raw).has_errors());
    }

    #[test]
    fn test_missing_name_is_error() {
        let report = validate_catalog(&[valid(1, "  ")]);
        assert!(report.has_errors());
        assert_eq!(report.issues[0].record_id, 1);
    }
}
