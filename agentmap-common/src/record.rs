//! Canonical catalog record and the fixed taxonomy vocabulary
//!
//! A `Record` is the shape every record has after normalization. Raw
//! records arrive as loosely-typed JSON (see `catalog`) and are converted by
//! the normalizer in `agentmap-browse`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Legacy level-1 label rewritten to [`AgentLayer::Application`]
pub const LEGACY_APPLICATION_LABEL: &str = "应用层";

/// Level-2/level-3 value meaning "absent"
pub const TAG_PLACEHOLDER: &str = "/";

/// One product/company entry in canonical form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    /// Session-stable identifier (positive, unique within a load)
    pub id: u64,
    pub name: String,
    pub name_en: String,
    /// Parent organisation
    pub company: String,
    pub description: String,
    pub features: Vec<String>,
    pub investors: Vec<String>,

    /// Level-1 tag (one of [`AgentLayer`] labels in well-formed data)
    pub agent_tag: String,
    pub agent_tag_level2: String,
    pub agent_tag_level3: String,
    /// Legacy coarse category (`infrastructure`, `llm`, `platform`, `application`)
    pub layer: String,

    pub market: String,
    pub country: String,
    pub category: String,
    pub is_chinese_product: String,

    /// Free-text revenue, e.g. `"$12M"` or `"N/A"`
    pub arr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr_product_million: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr_web_million: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr_app_million: Option<f64>,
    pub mau: String,

    /// Fields opaque to filtering (pricing, funding rounds, links, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Look up an opaque pass-through field as a string
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}

/// Ranked level-1 tags, in display and sort priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentLayer {
    Infrastructure,
    Model,
    Platform,
    Middleware,
    Application,
}

impl AgentLayer {
    /// All ranked layers in priority order
    pub const ALL: [AgentLayer; 5] = [
        AgentLayer::Infrastructure,
        AgentLayer::Model,
        AgentLayer::Platform,
        AgentLayer::Middleware,
        AgentLayer::Application,
    ];

    /// Canonical label as it appears in `agentTag`
    pub fn label(self) -> &'static str {
        match self {
            AgentLayer::Infrastructure => "基础设施层",
            AgentLayer::Model => "大模型层",
            AgentLayer::Platform => "平台/框架层",
            AgentLayer::Middleware => "Agent中间层",
            AgentLayer::Application => "Agent应用层",
        }
    }

    /// Position in the priority order (0 = first)
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Exact-match lookup of a canonical label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.label() == label)
    }

    /// Map a legacy coarse category onto its layer
    pub fn from_legacy_category(category: &str) -> Option<Self> {
        match category {
            "infrastructure" => Some(AgentLayer::Infrastructure),
            "llm" => Some(AgentLayer::Model),
            "platform" => Some(AgentLayer::Platform),
            "application" => Some(AgentLayer::Application),
            _ => None,
        }
    }
}

impl fmt::Display for AgentLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independent, non-hierarchical classification axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuxFacet {
    Market,
    Country,
    Category,
    ChineseFlag,
}

impl AuxFacet {
    pub const ALL: [AuxFacet; 4] = [
        AuxFacet::Market,
        AuxFacet::Country,
        AuxFacet::Category,
        AuxFacet::ChineseFlag,
    ];

    /// The record field this facet reads
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            AuxFacet::Market => &record.market,
            AuxFacet::Country => &record.country,
            AuxFacet::Category => &record.category,
            AuxFacet::ChineseFlag => &record.is_chinese_product,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuxFacet::Market => "market",
            AuxFacet::Country => "country",
            AuxFacet::Category => "category",
            AuxFacet::ChineseFlag => "chineseFlag",
        }
    }
}

impl fmt::Display for AuxFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuxFacet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "market" => Ok(AuxFacet::Market),
            "country" => Ok(AuxFacet::Country),
            "category" => Ok(AuxFacet::Category),
            "chineseflag" | "chinese" | "ischineseproduct" => Ok(AuxFacet::ChineseFlag),
            other => Err(Error::InvalidInput(format!("unknown facet: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layer_order_matches_rank() {
        for (i, layer) in AgentLayer::ALL.iter().enumerate() {
            assert_eq!(layer.rank(), i);
        }
        assert!(AgentLayer::Infrastructure < AgentLayer::Application);
    }

    #[test]
    fn test_layer_label_roundtrip() {
        for layer in AgentLayer::ALL {
            assert_eq!(AgentLayer::from_label(layer.label()), Some(layer));
        }
        assert_eq!(AgentLayer::from_label(LEGACY_APPLICATION_LABEL), None);
        assert_eq!(AgentLayer::from_label(""), None);
    }

    #[test]
    fn test_legacy_category_lookup() {
        assert_eq!(AgentLayer::from_legacy_category("llm"), Some(AgentLayer::Model));
        assert_eq!(
            AgentLayer::from_legacy_category("application"),
            Some(AgentLayer::Application)
        );
        assert_eq!(AgentLayer::from_legacy_category("robotics"), None);
    }

    #[test]
    fn test_facet_parse() {
        assert_eq!("market".parse::<AuxFacet>().unwrap(), AuxFacet::Market);
        assert_eq!("Country".parse::<AuxFacet>().unwrap(), AuxFacet::Country);
        assert_eq!("chinese".parse::<AuxFacet>().unwrap(), AuxFacet::ChineseFlag);
        assert!("scene".parse::<AuxFacet>().is_err());
    }

    #[test]
    fn test_facet_reads_its_field() {
        let record = Record {
            market: "出海".to_string(),
            country: "美国".to_string(),
            category: "Coding".to_string(),
            is_chinese_product: "是".to_string(),
            ..Default::default()
        };
        assert_eq!(AuxFacet::Market.value_of(&record), "出海");
        assert_eq!(AuxFacet::Country.value_of(&record), "美国");
        assert_eq!(AuxFacet::Category.value_of(&record), "Coding");
        assert_eq!(AuxFacet::ChineseFlag.value_of(&record), "是");
    }

    #[test]
    fn test_record_serializes_camel_case_with_extra() {
        let mut record = Record {
            id: 7,
            name_en: "Acme".to_string(),
            agent_tag_level2: "Coding".to_string(),
            arr_product_million: Some(12.0),
            ..Default::default()
        };
        record
            .extra
            .insert("website".to_string(), json!("https://acme.example"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["nameEn"], "Acme");
        assert_eq!(value["agentTagLevel2"], "Coding");
        assert_eq!(value["arrProductMillion"], 12.0);
        assert_eq!(value["website"], "https://acme.example");
        assert!(value.get("arrWebMillion").is_none());
        assert_eq!(record.extra_str("website"), Some("https://acme.example"));
    }
}
