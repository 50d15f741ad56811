//! Compiled search types.
//!
//! Provides the normalized form produced by the filter compiler:
//! - Clause / Predicate: filter conditions, ANDed together
//! - SortSpec: allow-listed sort field plus direction
//! - PageWindow: validated page and page size
//! - SearchPage: one window of results with the unpaginated total

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SkillLevel;

/// Text columns that can take part in a substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Description,
    Brand,
    Sku,
}

impl TextField {
    /// Column name in storage.
    pub fn column(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Description => "description",
            TextField::Brand => "brand",
            TextField::Sku => "sku",
        }
    }
}

/// Decimal columns that accept range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountField {
    BasePrice,
    BaseHourlyRate,
    BaseDailyRate,
}

impl AmountField {
    /// Column name in storage.
    pub fn column(&self) -> &'static str {
        match self {
            AmountField::BasePrice => "base_price",
            AmountField::BaseHourlyRate => "base_hourly_rate",
            AmountField::BaseDailyRate => "base_daily_rate",
        }
    }
}

/// Boolean columns that accept tri-state filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    IsActive,
    IsPopular,
    CertificationRequired,
}

impl FlagField {
    /// Column name in storage.
    pub fn column(&self) -> &'static str {
        match self {
            FlagField::IsActive => "is_active",
            FlagField::IsPopular => "is_popular",
            FlagField::CertificationRequired => "certification_required",
        }
    }
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive literal substring match against any of the fields.
    Text { fields: Vec<TextField>, term: String },
    /// Exact category match.
    Category(Uuid),
    /// Inclusive range. At least one bound is set.
    Range {
        field: AmountField,
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    /// Exact boolean match.
    Flag { field: FlagField, value: bool },
    /// Exact skill level match.
    SkillLevel(SkillLevel),
    /// Matches when any supplied tag is a case-insensitive substring of any stored tag.
    TagsAny(Vec<String>),
}

/// Conjunction of clauses. An empty predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub clauses: Vec<Clause>,
}

impl Predicate {
    /// Create an empty predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Add a clause in place.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Allow-listed sort fields across both item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    BasePrice,
    Brand,
    Sku,
    BaseHourlyRate,
    BaseDailyRate,
    SkillLevel,
    MinimumExperienceYears,
    DisplayOrder,
    Created,
}

impl SortField {
    /// Resolve a material `sortBy` value. Unknown values fall back to name.
    pub fn for_material(value: Option<&str>) -> Self {
        match normalize_sort_key(value).as_str() {
            "baseprice" | "price" => SortField::BasePrice,
            "brand" => SortField::Brand,
            "sku" => SortField::Sku,
            "displayorder" => SortField::DisplayOrder,
            "createdat" | "created" => SortField::Created,
            _ => SortField::Name,
        }
    }

    /// Resolve a labor category `sortBy` value. Unknown values fall back to name.
    pub fn for_labor(value: Option<&str>) -> Self {
        match normalize_sort_key(value).as_str() {
            "basehourlyrate" | "hourlyrate" => SortField::BaseHourlyRate,
            "basedailyrate" | "dailyrate" => SortField::BaseDailyRate,
            "skilllevel" => SortField::SkillLevel,
            "minimumexperienceyears" | "experience" => SortField::MinimumExperienceYears,
            "displayorder" => SortField::DisplayOrder,
            "createdat" | "created" => SortField::Created,
            _ => SortField::Name,
        }
    }
}

/// Lowercase and drop separators so `base_price`, `basePrice` and `BasePrice` agree.
fn normalize_sort_key(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a `sortOrder` value. Anything other than `desc` sorts ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Sort field and direction. Ties are always broken by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Validated page window (1-indexed page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
}

impl PageWindow {
    /// Create a window. Callers clamp first; zero values are lifted to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Rows to skip: `(page - 1) * pageSize`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// `ceil(total / pageSize)`.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }
}

/// Normalized search: predicate, sort, and page window.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub window: PageWindow,
}

/// One page of results plus the total matching the same predicate.
#[derive(Debug, Clone)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub window: PageWindow,
}

impl<T> SearchPage<T> {
    pub fn new(items: Vec<T>, total_count: u64, window: PageWindow) -> Self {
        Self {
            items,
            total_count,
            window,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.window.total_pages(self.total_count)
    }

    /// Transform the items while keeping the counts.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchPage<U> {
        SearchPage {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            window: self.window,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn page_window_offset() {
        assert_eq!(PageWindow::new(1, 20).offset(), 0);
        assert_eq!(PageWindow::new(3, 20).offset(), 40);
    }

    #[test]
    fn page_window_lifts_zero() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window.page, 1);
        assert_eq!(window.page_size, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let window = PageWindow::new(1, 20);
        assert_eq!(window.total_pages(0), 0);
        assert_eq!(window.total_pages(3), 1);
        assert_eq!(window.total_pages(20), 1);
        assert_eq!(window.total_pages(21), 2);
    }

    #[test]
    fn material_sort_allow_list() {
        assert_eq!(SortField::for_material(Some("basePrice")), SortField::BasePrice);
        assert_eq!(SortField::for_material(Some("price")), SortField::BasePrice);
        assert_eq!(SortField::for_material(Some("display_order")), SortField::DisplayOrder);
        assert_eq!(SortField::for_material(Some("dailyRate")), SortField::Name);
        assert_eq!(SortField::for_material(Some("; DROP TABLE")), SortField::Name);
        assert_eq!(SortField::for_material(None), SortField::Name);
    }

    #[test]
    fn labor_sort_allow_list() {
        assert_eq!(SortField::for_labor(Some("hourlyRate")), SortField::BaseHourlyRate);
        assert_eq!(SortField::for_labor(Some("BaseDailyRate")), SortField::BaseDailyRate);
        assert_eq!(SortField::for_labor(Some("skillLevel")), SortField::SkillLevel);
        assert_eq!(SortField::for_labor(Some("price")), SortField::Name);
    }

    #[test]
    fn sort_direction_defaults_to_asc() {
        assert_eq!(SortDirection::parse(None), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
    }

    #[test]
    fn search_page_map_keeps_counts() {
        let page = SearchPage::new(vec![1, 2], 12, PageWindow::new(2, 2));
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total_count, 12);
        assert_eq!(mapped.total_pages(), 6);
    }
}
