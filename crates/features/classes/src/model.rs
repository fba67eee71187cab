//! Class records as stored in the content units.
//!
//! Every struct tolerates unknown fields and fills absent ones with defaults, so a
//! sparse unit still loads. Records are never mutated after loading.

use lct_derive::api_model;
use serde::{Deserialize, Serialize};

const fn first_level() -> u32 {
    1
}

/// A playable character class.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct ClassRecord {
    /// Stable identifier: the filename stem of the unit the record was loaded from.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "first_level")]
    pub tier: u32,
    #[serde(default = "first_level")]
    pub difficulty: u32,
    #[serde(default)]
    pub main_role: String,
    #[serde(default)]
    pub secondary_role: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub requirements: Option<ClassRequirements>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub guide: String,
    #[serde(default)]
    pub progression: Vec<ProgressionLevel>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl ClassRecord {
    /// Role tags: the main role followed by the secondary role, skipping blanks.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_role.as_str())
            .chain(self.secondary_role.as_deref())
            .filter(|tag| !tag.trim().is_empty())
    }
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct ClassRequirements {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub conditions: Vec<RequirementCondition>,
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct RequirementCondition {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// A scalar or a list of strings, as written by content authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct ProgressionLevel {
    pub level: u32,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}

/// One benefit granted at a progression level. `kind == "ability"` grants the
/// ability named by `value`.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct Benefit {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eligible_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_convert_to_expertise: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_ratio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choose: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AttributeOption>,
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct AttributeOption {
    pub attribute: String,
    pub value: i32,
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct Ability {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<AbilityCosts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<AbilityRequirement>,
}

/// Resource costs; a missing or zero cost means the ability does not use it.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityCosts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<u32>,
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct AbilityRequirement {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

/// Top-level shape of a content unit: a single `class:` mapping.
#[derive(Debug, Deserialize)]
pub(crate) struct ClassDocument {
    pub class: ClassRecord,
}
