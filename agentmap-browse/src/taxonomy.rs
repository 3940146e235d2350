//! Taxonomy builder
//!
//! Derives the three-level tag tree, per-level counts and the auxiliary
//! facet vocabularies from canonical records in a single pass. Built once
//! per load and read-only afterwards.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use agentmap_common::{AgentLayer, AuxFacet, Record};
use serde::Serialize;

use crate::collation;

/// level-3 value → records at that exact path
pub type Level3Leaves = BTreeMap<String, usize>;
/// level-2 value → level-3 leaves
pub type Level2Branches = BTreeMap<String, Level3Leaves>;
/// level-1 value → level-2 branches
pub type TagTree = BTreeMap<String, Level2Branches>;

/// Sorted distinct values for each auxiliary facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetVocabularies {
    pub market: Vec<String>,
    pub country: Vec<String>,
    pub category: Vec<String>,
    pub chinese_flag: Vec<String>,
}

impl FacetVocabularies {
    /// Collect the distinct non-empty values present in `records`
    ///
    /// Country and category use display collation; market and the chinese
    /// flag keep code point order.
    pub fn collect<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut sets: [BTreeSet<&str>; 4] = Default::default();
        for record in records {
            for (set, facet) in sets.iter_mut().zip(AuxFacet::ALL) {
                let value = facet.value_of(record);
                if !value.is_empty() {
                    set.insert(value);
                }
            }
        }

        let [market, country, category, chinese_flag] =
            sets.map(|set| set.into_iter().map(str::to_string).collect::<Vec<_>>());
        let mut vocab = Self {
            market,
            country,
            category,
            chinese_flag,
        };
        collation::sort_strings(&mut vocab.country);
        collation::sort_strings(&mut vocab.category);
        vocab
    }

    pub fn values(&self, facet: AuxFacet) -> &[String] {
        match facet {
            AuxFacet::Market => &self.market,
            AuxFacet::Country => &self.country,
            AuxFacet::Category => &self.category,
            AuxFacet::ChineseFlag => &self.chinese_flag,
        }
    }

    pub fn contains(&self, facet: AuxFacet, value: &str) -> bool {
        self.values(facet).iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        AuxFacet::ALL.iter().all(|f| self.values(*f).is_empty())
    }
}

/// Three-level tag taxonomy plus load-time facet vocabularies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub tree: TagTree,
    pub level1_counts: BTreeMap<String, usize>,
    /// level-1 → level-2 → records on that branch, including those without level-3
    pub level2_counts: BTreeMap<String, BTreeMap<String, usize>>,
    pub vocabularies: FacetVocabularies,
}

impl Taxonomy {
    pub fn build(records: &[Record]) -> Self {
        let mut taxonomy = Taxonomy::default();

        for record in records {
            let l1 = record.agent_tag.as_str();
            if l1.is_empty() {
                continue;
            }
            *taxonomy.level1_counts.entry(l1.to_string()).or_insert(0) += 1;
            let branches = taxonomy.tree.entry(l1.to_string()).or_default();

            let l2 = record.agent_tag_level2.as_str();
            if l2.is_empty() {
                continue;
            }
            *taxonomy
                .level2_counts
                .entry(l1.to_string())
                .or_default()
                .entry(l2.to_string())
                .or_insert(0) += 1;
            let leaves = branches.entry(l2.to_string()).or_default();

            let l3 = record.agent_tag_level3.as_str();
            if !l3.is_empty() {
                *leaves.entry(l3.to_string()).or_insert(0) += 1;
            }
        }

        taxonomy.vocabularies = FacetVocabularies::collect(records);
        taxonomy
    }

    /// Level-1 values in display order (ranked first, unranked alphabetically)
    pub fn level1_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.tree.keys().map(String::as_str).collect();
        values.sort_by(|a, b| compare_level1(a, b));
        values
    }

    pub fn level2_values(&self, level1: &str) -> Vec<&str> {
        self.tree
            .get(level1)
            .map(|branches| branches.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Level-3 values with their leaf counts under one level-2 branch
    pub fn level3_chips(&self, level1: &str, level2: &str) -> Vec<(String, usize)> {
        self.tree
            .get(level1)
            .and_then(|branches| branches.get(level2))
            .map(|leaves| leaves.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default()
    }

    pub fn has_level2(&self, level1: &str, level2: &str) -> bool {
        self.tree
            .get(level1)
            .is_some_and(|branches| branches.contains_key(level2))
    }

    pub fn has_level3(&self, level1: &str, level2: &str, level3: &str) -> bool {
        self.tree
            .get(level1)
            .and_then(|branches| branches.get(level2))
            .is_some_and(|leaves| leaves.contains_key(level3))
    }

    pub fn level1_count(&self, level1: &str) -> usize {
        self.level1_counts.get(level1).copied().unwrap_or(0)
    }

    pub fn level2_count(&self, level1: &str, level2: &str) -> usize {
        self.level2_counts
            .get(level1)
            .and_then(|counts| counts.get(level2))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of every level-3 leaf count
    pub fn leaf_total(&self) -> usize {
        self.tree
            .values()
            .flat_map(|branches| branches.values())
            .flat_map(|leaves| leaves.values())
            .sum()
    }
}

/// Rank of a level-1 label, `None` for unranked values
pub fn level1_rank(label: &str) -> Option<usize> {
    AgentLayer::from_label(label).map(AgentLayer::rank)
}

/// Total order over level-1 labels
///
/// Ranked labels follow the fixed priority list; unranked labels come after
/// all ranked ones, ordered by display collation of the label.
pub fn compare_level1(a: &str, b: &str) -> Ordering {
    match (level1_rank(a), level1_rank(b)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collation::compare(a, b),
    }
}
