//! Raw record normalization
//!
//! Turns loosely-typed JSON records into canonical [`Record`]s. Never fails:
//! unknown or missing fields default to empty strings/sequences, and
//! running the normalizer over its own output changes nothing.

use std::collections::HashSet;

use agentmap_common::record::{AgentLayer, LEGACY_APPLICATION_LABEL, TAG_PLACEHOLDER};
use agentmap_common::Record;
use serde_json::{Map, Value};
use tracing::debug;

/// Fields lifted into typed `Record` members; everything else is opaque
const KNOWN_FIELDS: &[&str] = &[
    "id",
    "name",
    "nameEn",
    "company",
    "description",
    "features",
    "investors",
    "agentTag",
    "agentTagLevel2",
    "agentTagLevel3",
    "layer",
    "market",
    "country",
    "category",
    "isChineseProduct",
    "arr",
    "arrProductMillion",
    "arrWebMillion",
    "arrAppMillion",
    "mau",
];

/// Normalize a batch of raw records
///
/// Positive integer ids are kept when unique within the batch; missing,
/// invalid, or repeated ids are reassigned after the batch maximum.
pub fn normalize(raw: &[Value]) -> Vec<Record> {
    let mut records: Vec<Record> = raw.iter().map(normalize_record).collect();

    let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
    let mut next_id = max_id + 1;
    let mut seen = HashSet::new();
    let mut reassigned = 0usize;

    for record in &mut records {
        if record.id == 0 || !seen.insert(record.id) {
            record.id = next_id;
            seen.insert(next_id);
            next_id += 1;
            reassigned += 1;
        }
    }

    debug!(
        "Normalized {} records ({} ids assigned)",
        records.len(),
        reassigned
    );
    records
}

/// Normalize a single raw record (id is taken as-is, 0 when unusable)
pub fn normalize_record(raw: &Value) -> Record {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let mut record = Record {
        id: raw_id(raw).unwrap_or(0),
        name: text(obj, "name"),
        name_en: text(obj, "nameEn"),
        company: text(obj, "company"),
        description: text(obj, "description"),
        features: string_list(obj.get("features")),
        investors: string_list(obj.get("investors")),
        agent_tag: text(obj, "agentTag"),
        agent_tag_level2: text(obj, "agentTagLevel2"),
        agent_tag_level3: text(obj, "agentTagLevel3"),
        layer: text(obj, "layer"),
        market: text(obj, "market"),
        country: text(obj, "country"),
        category: text(obj, "category"),
        is_chinese_product: text(obj, "isChineseProduct"),
        arr: text(obj, "arr"),
        arr_product_million: number(obj.get("arrProductMillion")),
        arr_web_million: number(obj.get("arrWebMillion")),
        arr_app_million: number(obj.get("arrAppMillion")),
        mau: text(obj, "mau"),
        extra: obj
            .iter()
            .filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };

    record.agent_tag = canonical_level1(&record.agent_tag, &record.layer);
    elide_placeholder(&mut record.agent_tag_level2);
    elide_placeholder(&mut record.agent_tag_level3);
    record
}

/// Derive the tag from `layer` when absent, then alias the legacy application label
fn canonical_level1(tag: &str, legacy_layer: &str) -> String {
    let derived = if !tag.is_empty() || legacy_layer.is_empty() {
        tag.to_string()
    } else {
        // Unmapped legacy categories pass through; they rank after the five layers
        match AgentLayer::from_legacy_category(legacy_layer) {
            Some(layer) => layer.label().to_string(),
            None => legacy_layer.to_string(),
        }
    };

    if derived == LEGACY_APPLICATION_LABEL {
        AgentLayer::Application.label().to_string()
    } else {
        derived
    }
}

fn elide_placeholder(value: &mut String) {
    if value == TAG_PLACEHOLDER {
        value.clear();
    }
}

/// Positive integer id of a raw record as written in the document
pub fn raw_id(raw: &Value) -> Option<u64> {
    raw.get("id").and_then(id_of).filter(|id| *id > 0)
}

fn id_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Sequence passes through, empty/absent becomes `[]`, scalar is wrapped
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(other) => vec![scalar_text(other)],
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
