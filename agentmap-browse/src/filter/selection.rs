//! Filter selection state

use agentmap_common::{AuxFacet, Record};
use serde::Serialize;

/// Current filter choices; an empty string means "no filter"
///
/// Owned by [`super::FilterEngine`]. Callers read it but change it only
/// through the engine's mutators, which maintain the nesting rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub market: String,
    pub country: String,
    pub category: String,
    pub chinese_flag: String,
    pub search: String,
}

impl Selection {
    pub fn aux(&self, facet: AuxFacet) -> &str {
        match facet {
            AuxFacet::Market => &self.market,
            AuxFacet::Country => &self.country,
            AuxFacet::Category => &self.category,
            AuxFacet::ChineseFlag => &self.chinese_flag,
        }
    }

    pub(crate) fn aux_mut(&mut self, facet: AuxFacet) -> &mut String {
        match facet {
            AuxFacet::Market => &mut self.market,
            AuxFacet::Country => &mut self.country,
            AuxFacet::Category => &mut self.category,
            AuxFacet::ChineseFlag => &mut self.chinese_flag,
        }
    }

    pub(crate) fn clear_aux(&mut self) {
        for facet in AuxFacet::ALL {
            self.aux_mut(facet).clear();
        }
    }

    /// True when no dimension is filtered
    pub fn is_empty(&self) -> bool {
        *self == Selection::default()
    }

    /// Stage 1 predicate: tag path only
    pub(crate) fn matches_tag_path(&self, record: &Record) -> bool {
        (self.level1.is_empty() || record.agent_tag == self.level1)
            && (self.level2.is_empty() || record.agent_tag_level2 == self.level2)
            && (self.level3.is_empty() || record.agent_tag_level3 == self.level3)
    }

    /// Stage 3 predicate: exact match on every active auxiliary facet
    pub(crate) fn matches_aux(&self, record: &Record) -> bool {
        AuxFacet::ALL.into_iter().all(|facet| {
            let wanted = self.aux(facet);
            wanted.is_empty() || facet.value_of(record) == wanted
        })
    }
}

/// Case-insensitive containment over the searchable fields
///
/// `needle` must already be lowercased; an empty needle matches everything.
pub(crate) fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(needle);

    [
        &record.name,
        &record.name_en,
        &record.company,
        &record.description,
        &record.agent_tag,
        &record.agent_tag_level2,
        &record.agent_tag_level3,
        &record.category,
        &record.country,
    ]
    .into_iter()
    .any(|field| hit(field.as_str()))
        || record.features.iter().any(|f| hit(f.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Selection::default().is_empty());
        let selection = Selection {
            search: "x".to_string(),
            ..Default::default()
        };
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_tag_path_predicate() {
        let record = Record {
            agent_tag: "大模型层".to_string(),
            agent_tag_level2: "B".to_string(),
            agent_tag_level3: "x".to_string(),
            ..Default::default()
        };
        let mut selection = Selection {
            level1: "大模型层".to_string(),
            ..Default::default()
        };
        assert!(selection.matches_tag_path(&record));
        selection.level2 = "B".to_string();
        selection.level3 = "y".to_string();
        assert!(!selection.matches_tag_path(&record));
    }

    #[test]
    fn test_aux_predicate_requires_every_active_facet() {
        let record = Record {
            market: "海外".to_string(),
            country: "美国".to_string(),
            ..Default::default()
        };
        let mut selection = Selection::default();
        *selection.aux_mut(AuxFacet::Market) = "海外".to_string();
        assert!(selection.matches_aux(&record));
        *selection.aux_mut(AuxFacet::Country) = "日本".to_string();
        assert!(!selection.matches_aux(&record));
        selection.clear_aux();
        assert!(selection.matches_aux(&record));
    }

    #[test]
    fn test_search_fields() {
        let record = Record {
            name: "Acme".to_string(),
            company: "Globex Corp".to_string(),
            agent_tag_level3: "Voice Agent".to_string(),
            features: vec!["voice-cloning".to_string()],
            ..Default::default()
        };
        assert!(matches_search(&record, "acme"));
        assert!(matches_search(&record, "globex"));
        assert!(matches_search(&record, "voice"));
        assert!(matches_search(&record, "cloning"));
        assert!(matches_search(&record, ""));
        assert!(!matches_search(&record, "robot"));
    }

    #[test]
    fn test_search_ignores_opaque_fields() {
        let mut record = Record::default();
        record
            .extra
            .insert("highlight".to_string(), serde_json::json!("robotics"));
        record.mau = "robotics".to_string();
        assert!(!matches_search(&record, "robotics"));
    }
}
