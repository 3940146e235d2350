//! Text and JSON rendering for the command-line browser

use std::sync::Arc;

use agentmap_common::display::{display_arr, display_mau};
use agentmap_common::{AuxFacet, Record};
use serde_json::{json, Value};

use crate::filter::FilterOutcome;
use crate::pagination::Pagination;
use crate::taxonomy::Taxonomy;

/// Description preview length on cards
const PREVIEW_CHARS: usize = 80;

/// Truncate to `max` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}

/// `l1 › l2 › l3`, skipping empty levels
pub fn tag_path(record: &Record) -> String {
    [
        record.agent_tag.as_str(),
        record.agent_tag_level2.as_str(),
        record.agent_tag_level3.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" › ")
}

/// Card: header line plus an optional description preview
pub fn card_lines(record: &Record) -> Vec<String> {
    let mut header = format!("#{} {}", record.id, record.name);
    if !record.name_en.is_empty() && record.name_en != record.name {
        header.push_str(&format!(" ({})", record.name_en));
    }
    let path = tag_path(record);
    if !path.is_empty() {
        header.push_str(&format!(" | {}", path));
    }
    header.push_str(&format!(
        " | ARR {} | MAU {}",
        display_arr(record),
        display_mau(record)
    ));

    let mut lines = vec![header];
    if !record.description.is_empty() {
        lines.push(format!(
            "    {}",
            truncate_chars(&record.description, PREVIEW_CHARS)
        ));
    }
    lines
}

/// Detail view of one record
pub fn detail_lines(record: &Record) -> Vec<String> {
    let mut lines = vec![format!("{} (#{})", record.name, record.id)];
    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            lines.push(format!("  {:<10} {}", label, value));
        }
    };

    field("English", &record.name_en);
    field("Company", &record.company);
    field("Tags", &tag_path(record));
    field("Market", &record.market);
    field("Country", &record.country);
    field("Category", &record.category);
    field("Chinese", &record.is_chinese_product);
    field("ARR", &display_arr(record));
    field("MAU", &display_mau(record));
    field("Investors", &record.investors.join(", "));
    field("About", &record.description);

    if !record.features.is_empty() {
        lines.push("  Features".to_string());
        lines.extend(record.features.iter().map(|f| format!("    - {}", f)));
    }

    for (key, value) in &record.extra {
        if let Some(text) = value.as_str().filter(|s| !s.is_empty()) {
            lines.push(format!("  {:<10} {}", key, text));
        }
    }
    lines
}

/// Level-1 → level-2 → level-3 tree with counts
pub fn tree_lines(taxonomy: &Taxonomy) -> Vec<String> {
    let mut lines = Vec::new();
    for l1 in taxonomy.level1_values() {
        lines.push(format!("{} ({})", l1, taxonomy.level1_count(l1)));
        for l2 in taxonomy.level2_values(l1) {
            lines.push(format!("  {} ({})", l2, taxonomy.level2_count(l1, l2)));
            for (l3, count) in taxonomy.level3_chips(l1, l2) {
                lines.push(format!("    {} ({})", l3, count));
            }
        }
    }
    lines
}

/// One line per auxiliary facet listing its selectable values
pub fn facet_lines(outcome: &FilterOutcome) -> Vec<String> {
    AuxFacet::ALL
        .into_iter()
        .map(|facet| {
            let values = outcome.facet_options.values(facet);
            let selected = outcome.selection.aux(facet);
            let rendered: Vec<String> = values
                .iter()
                .map(|v| {
                    if v == selected {
                        format!("[{}]", v)
                    } else {
                        v.clone()
                    }
                })
                .collect();
            format!("{:<12} {}", facet.as_str(), rendered.join(", "))
        })
        .collect()
}

/// Machine-readable page of results
pub fn outcome_json(outcome: &FilterOutcome, pagination: &Pagination) -> Value {
    let records: Vec<&Record> = pagination
        .slice(&outcome.records)
        .iter()
        .map(|r| Arc::as_ref(r))
        .collect();

    json!({
        "selection": outcome.selection,
        "total": outcome.total,
        "matched": outcome.len(),
        "page": pagination.page,
        "totalPages": pagination.total_pages,
        "pageSize": pagination.page_size,
        "records": records,
        "facetOptions": outcome.facet_options,
    })
}
