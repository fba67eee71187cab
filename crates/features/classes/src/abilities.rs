//! Ability index: every ability of the catalog annotated with its class and the
//! level at which the class grants it.

use crate::catalog::Catalog;
use crate::model::{Ability, ClassRecord, ProgressionLevel};
use lct_derive::api_model;
use std::collections::{BTreeMap, BTreeSet};

const ABILITY_BENEFIT: &str = "ability";

#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct AbilityEntry {
    pub ability: Ability,
    pub class_id: String,
    pub class_name: String,
    pub level: u32,
}

/// Constraints on ability entries; empty lists and `None` impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityCriteria {
    /// Case-insensitive substring of the name, the description or any keyword.
    pub text: Option<String>,
    pub types: Vec<String>,
    /// Matches when the ability carries at least one of these keywords.
    pub keywords: Vec<String>,
    pub ranges: Vec<String>,
    pub class_ids: Vec<String>,
    pub level: Option<u32>,
    pub has_mana: Option<bool>,
    pub has_rp: Option<bool>,
    pub has_ap: Option<bool>,
}

impl AbilityCriteria {
    #[must_use]
    pub fn matches(&self, entry: &AbilityEntry) -> bool {
        let ability = &entry.ability;

        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let hit = std::iter::once(&ability.name)
                .chain(std::iter::once(&ability.description))
                .chain(&ability.keywords)
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        let costs = ability.costs.unwrap_or_default();
        one_of(&self.class_ids, &entry.class_id)
            && self.level.is_none_or(|level| level == entry.level)
            && one_of(&self.types, &ability.kind)
            && (self.keywords.is_empty() || ability.keywords.iter().any(|k| self.keywords.contains(k)))
            && one_of(&self.ranges, &ability.range)
            && uses(self.has_mana, costs.mana)
            && uses(self.has_rp, costs.rp)
            && uses(self.has_ap, costs.ap)
    }
}

/// Distinct values present in an index, for building filter menus.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, Default, PartialEq)]
pub struct AbilityFacets {
    pub types: Vec<String>,
    pub keywords: Vec<String>,
    pub ranges: Vec<String>,
    pub levels: Vec<u32>,
    /// Classes sorted by display name.
    pub classes: Vec<ClassRef>,
}

#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityIndex {
    entries: Vec<AbilityEntry>,
}

impl AbilityIndex {
    /// Flattens the abilities of every record, in catalog order.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let entries = catalog.iter().flat_map(entries_of).collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[AbilityEntry] {
        &self.entries
    }

    #[must_use]
    pub fn search(&self, criteria: &AbilityCriteria) -> Vec<AbilityEntry> {
        self.entries.iter().filter(|entry| criteria.matches(entry)).cloned().collect()
    }

    #[must_use]
    pub fn facets(&self) -> AbilityFacets {
        let mut types = BTreeSet::new();
        let mut keywords = BTreeSet::new();
        let mut ranges = BTreeSet::new();
        let mut levels = BTreeSet::new();
        let mut classes = BTreeMap::new();

        for entry in &self.entries {
            let ability = &entry.ability;
            if !ability.kind.is_empty() {
                types.insert(ability.kind.clone());
            }
            keywords.extend(ability.keywords.iter().cloned());
            if !ability.range.is_empty() {
                ranges.insert(ability.range.clone());
            }
            levels.insert(entry.level);
            classes.entry(entry.class_id.clone()).or_insert_with(|| entry.class_name.clone());
        }

        let mut classes: Vec<_> =
            classes.into_iter().map(|(id, name)| ClassRef { id, name }).collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        AbilityFacets {
            types: types.into_iter().collect(),
            keywords: keywords.into_iter().collect(),
            ranges: ranges.into_iter().collect(),
            levels: levels.into_iter().collect(),
            classes,
        }
    }
}

fn entries_of(record: &ClassRecord) -> impl Iterator<Item = AbilityEntry> + '_ {
    record.abilities.iter().map(|ability| AbilityEntry {
        level: granted_at(&record.progression, ability),
        ability: ability.clone(),
        class_id: record.id.clone(),
        class_name: record.name.clone(),
    })
}

/// First progression level with an ability benefit naming `ability` by id or name.
fn granted_at(progression: &[ProgressionLevel], ability: &Ability) -> u32 {
    progression
        .iter()
        .find(|level| {
            level.benefits.iter().any(|benefit| {
                benefit.kind == ABILITY_BENEFIT
                    && benefit
                        .value
                        .as_deref()
                        .is_some_and(|v| (!ability.id.is_empty() && v == ability.id) || v == ability.name)
            })
        })
        .map_or(1, |level| level.level)
}

fn one_of(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a == value)
}

fn uses(wanted: Option<bool>, cost: Option<u32>) -> bool {
    !wanted.unwrap_or(false) || cost.is_some_and(|c| c > 0)
}
