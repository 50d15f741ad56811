//! In-process evaluation of compiled predicates and sorts.
//!
//! The PostgreSQL store translates the same clauses to SQL; this module is
//! the reference semantics used by the in-memory store.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    AmountField, Clause, FlagField, Predicate, SortDirection, SortField, SortSpec, TextField,
};
use crate::models::{LaborCategory, Material, SkillLevel};

/// Field access needed to evaluate clauses against a catalog item.
pub trait Searchable {
    fn id(&self) -> Uuid;
    fn category_id(&self) -> Option<Uuid>;
    fn text(&self, field: TextField) -> Option<&str>;
    fn amount(&self, field: AmountField) -> Option<Decimal>;
    fn flag(&self, field: FlagField) -> Option<bool>;
    fn skill_level(&self) -> Option<SkillLevel>;
    fn tags(&self) -> &[String];
    fn sort_value(&self, field: SortField) -> SortValue;
}

/// Comparable projection of a sort column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Int(i64),
    Amount(Decimal),
    Text(String),
    /// Greatest value, matching PostgreSQL's default `NULLS LAST` on ascending order.
    Missing,
}

impl SortValue {
    fn text(value: Option<&str>) -> Self {
        value
            .map(|v| SortValue::Text(v.to_lowercase()))
            .unwrap_or(SortValue::Missing)
    }
}

impl Searchable for Material {
    fn id(&self) -> Uuid {
        self.id
    }

    fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_deref(),
            TextField::Brand => self.brand.as_deref(),
            TextField::Sku => self.sku.as_deref(),
        }
    }

    fn amount(&self, field: AmountField) -> Option<Decimal> {
        match field {
            AmountField::BasePrice => Some(self.base_price),
            _ => None,
        }
    }

    fn flag(&self, field: FlagField) -> Option<bool> {
        match field {
            FlagField::IsActive => Some(self.is_active),
            FlagField::IsPopular => Some(self.is_popular),
            FlagField::CertificationRequired => None,
        }
    }

    fn skill_level(&self) -> Option<SkillLevel> {
        None
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::BasePrice => SortValue::Amount(self.base_price),
            SortField::Brand => SortValue::text(self.brand.as_deref()),
            SortField::Sku => SortValue::text(self.sku.as_deref()),
            SortField::DisplayOrder => SortValue::Int(i64::from(self.display_order)),
            SortField::Created => SortValue::Int(self.created),
            _ => SortValue::text(Some(&self.name)),
        }
    }
}

impl Searchable for LaborCategory {
    fn id(&self) -> Uuid {
        self.id
    }

    fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_deref(),
            TextField::Brand | TextField::Sku => None,
        }
    }

    fn amount(&self, field: AmountField) -> Option<Decimal> {
        match field {
            AmountField::BaseHourlyRate => Some(self.base_hourly_rate),
            AmountField::BaseDailyRate => Some(self.base_daily_rate),
            AmountField::BasePrice => None,
        }
    }

    fn flag(&self, field: FlagField) -> Option<bool> {
        match field {
            FlagField::IsActive => Some(self.is_active),
            FlagField::IsPopular => Some(self.is_popular),
            FlagField::CertificationRequired => Some(self.certification_required),
        }
    }

    fn skill_level(&self) -> Option<SkillLevel> {
        Some(self.skill_level)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::BaseHourlyRate => SortValue::Amount(self.base_hourly_rate),
            SortField::BaseDailyRate => SortValue::Amount(self.base_daily_rate),
            SortField::SkillLevel => SortValue::Int(self.skill_level.rank()),
            SortField::MinimumExperienceYears => {
                SortValue::Int(i64::from(self.minimum_experience_years))
            }
            SortField::DisplayOrder => SortValue::Int(i64::from(self.display_order)),
            SortField::Created => SortValue::Int(self.created),
            _ => SortValue::text(Some(&self.name)),
        }
    }
}

/// Case-insensitive literal substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Clause {
    /// Evaluate this clause against an item.
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        match self {
            Clause::Text { fields, term } => fields
                .iter()
                .filter_map(|f| item.text(*f))
                .any(|value| contains_ignore_case(value, term)),
            Clause::Category(id) => item.category_id() == Some(*id),
            Clause::Range { field, min, max } => {
                let Some(value) = item.amount(*field) else {
                    return false;
                };
                min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
            }
            Clause::Flag { field, value } => item.flag(*field) == Some(*value),
            Clause::SkillLevel(level) => item.skill_level() == Some(*level),
            Clause::TagsAny(wanted) => wanted.iter().any(|needle| {
                item.tags()
                    .iter()
                    .any(|stored| contains_ignore_case(stored, needle))
            }),
        }
    }
}

impl Predicate {
    /// True when every clause matches.
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        self.clauses.iter().all(|c| c.matches(item))
    }
}

impl SortSpec {
    /// Total order: chosen field in the requested direction, then id ascending.
    pub fn compare<T: Searchable>(&self, a: &T, b: &T) -> Ordering {
        let primary = a.sort_value(self.field).cmp(&b.sort_value(self.field));
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}
