//! Filter Engine: a pure, order-preserving predicate over the catalog.

use crate::catalog::Catalog;
use crate::error::ClassesError;
use crate::model::ClassRecord;
use lct_domain::constants::NO_ROLE;

/// Inclusive numeric bound; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFilter {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl RangeFilter {
    #[must_use]
    pub const fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// `None` when both ends are open.
    #[must_use]
    pub const fn from_bounds(min: Option<u32>, max: Option<u32>) -> Option<Self> {
        if min.is_none() && max.is_none() { None } else { Some(Self { min, max }) }
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    const fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// User-selected constraints. Absent (or blank) options impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the name or the description.
    pub text: Option<String>,
    /// Case-insensitive membership in the record's role tags.
    pub role: Option<String>,
    pub tier_range: Option<RangeFilter>,
    pub difficulty_range: Option<RangeFilter>,
    /// Case-insensitive equality with the main role.
    pub main_role: Option<String>,
    /// Case-insensitive equality with the secondary role; `None` selects records
    /// without one.
    pub secondary_role: Option<String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub const fn tier_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.tier_range = RangeFilter::from_bounds(min, max);
        self
    }

    #[must_use]
    pub const fn difficulty_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.difficulty_range = RangeFilter::from_bounds(min, max);
        self
    }

    #[must_use]
    pub fn main_role(mut self, role: impl Into<String>) -> Self {
        self.main_role = Some(role.into());
        self
    }

    #[must_use]
    pub fn secondary_role(mut self, role: impl Into<String>) -> Self {
        self.secondary_role = Some(role.into());
        self
    }

    /// True when no option constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        present(self.text.as_ref()).is_none()
            && present(self.role.as_ref()).is_none()
            && present(self.main_role.as_ref()).is_none()
            && present(self.secondary_role.as_ref()).is_none()
            && self.tier_range.is_none()
            && self.difficulty_range.is_none()
    }

    /// # Errors
    /// [`ClassesError::Validation`] when a range has `min > max`.
    pub fn validate(&self) -> Result<(), ClassesError> {
        for (name, range) in [("tier", self.tier_range), ("difficulty", self.difficulty_range)] {
            if range.is_some_and(|r| r.is_inverted()) {
                return Err(ClassesError::validation(format!(
                    "{name} range minimum is greater than its maximum"
                )));
            }
        }
        Ok(())
    }

    /// Whether `record` satisfies every present option.
    #[must_use]
    pub fn matches(&self, record: &ClassRecord) -> bool {
        if let Some(text) = present(self.text.as_ref()) {
            let needle = text.to_lowercase();
            if !(contains_folded(&record.name, &needle) || contains_folded(&record.description, &needle))
            {
                return false;
            }
        }

        if let Some(role) = present(self.role.as_ref())
            && !record.tags().any(|tag| same_folded(tag, role))
        {
            return false;
        }

        if self.tier_range.is_some_and(|r| !r.contains(record.tier))
            || self.difficulty_range.is_some_and(|r| !r.contains(record.difficulty))
        {
            return false;
        }

        if let Some(main) = present(self.main_role.as_ref())
            && !same_folded(&record.main_role, main)
        {
            return false;
        }

        if let Some(secondary) = present(self.secondary_role.as_ref()) {
            let matched = match record.secondary_role.as_deref() {
                None => secondary.trim() == NO_ROLE,
                Some(role) => same_folded(role, secondary),
            };
            if !matched {
                return false;
            }
        }

        true
    }
}

/// The order-preserving sub-sequence of `catalog` matching `criteria`.
#[must_use]
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<ClassRecord> {
    catalog.iter().filter(|record| criteria.matches(record)).cloned().collect()
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

fn same_folded(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
