//! Filter compiler: raw search parameters to a [`CompiledQuery`].
//!
//! Pure and synchronous. Validation failures are returned here, before any
//! store call is made.

use rust_decimal::Decimal;

use super::params::{LaborSearchParams, MaterialSearchParams};
use super::types::{
    AmountField, Clause, CompiledQuery, FlagField, Predicate, SortDirection, SortField, SortSpec,
    TextField,
};
use crate::config::SearchLimits;
use crate::error::{AppError, AppResult};
use crate::models::SkillLevel;

/// Fields searched by a material `searchTerm`.
pub const MATERIAL_TEXT_FIELDS: &[TextField] = &[
    TextField::Name,
    TextField::Description,
    TextField::Brand,
    TextField::Sku,
];

/// Fields searched by a labor `searchTerm`.
pub const LABOR_TEXT_FIELDS: &[TextField] = &[TextField::Name, TextField::Description];

/// Fields searched by global search on materials.
pub const GLOBAL_MATERIAL_FIELDS: &[TextField] =
    &[TextField::Name, TextField::Description, TextField::Brand];

#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler {
    limits: SearchLimits,
}

impl FilterCompiler {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Compile material search parameters.
    pub fn compile_materials(&self, params: &MaterialSearchParams) -> AppResult<CompiledQuery> {
        check_range("minPrice", "maxPrice", params.min_price, params.max_price)?;

        let mut predicate = Predicate::new();
        self.push_text(&mut predicate, MATERIAL_TEXT_FIELDS, params.search_term.as_deref());
        push_category(&mut predicate, params.category_id);
        push_range(
            &mut predicate,
            AmountField::BasePrice,
            params.min_price,
            params.max_price,
        );
        self.push_text(&mut predicate, &[TextField::Brand], params.brand.as_deref());
        push_flag(&mut predicate, FlagField::IsActive, params.is_active);
        push_flag(&mut predicate, FlagField::IsPopular, params.is_popular);
        self.push_tags(&mut predicate, params.tags.as_deref());

        Ok(CompiledQuery {
            predicate,
            sort: SortSpec::new(
                SortField::for_material(params.sort_by.as_deref()),
                SortDirection::parse(params.sort_order.as_deref()),
            ),
            window: self.limits.window(params.page, params.page_size),
        })
    }

    /// Compile labor category search parameters.
    pub fn compile_labor(&self, params: &LaborSearchParams) -> AppResult<CompiledQuery> {
        check_range(
            "minHourlyRate",
            "maxHourlyRate",
            params.min_hourly_rate,
            params.max_hourly_rate,
        )?;
        check_range(
            "minDailyRate",
            "maxDailyRate",
            params.min_daily_rate,
            params.max_daily_rate,
        )?;

        let skill_level = match params.skill_level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SkillLevel>().map_err(AppError::InvalidArgument)?),
        };

        let mut predicate = Predicate::new();
        self.push_text(&mut predicate, LABOR_TEXT_FIELDS, params.search_term.as_deref());
        push_category(&mut predicate, params.category_id);
        push_range(
            &mut predicate,
            AmountField::BaseHourlyRate,
            params.min_hourly_rate,
            params.max_hourly_rate,
        );
        push_range(
            &mut predicate,
            AmountField::BaseDailyRate,
            params.min_daily_rate,
            params.max_daily_rate,
        );
        if let Some(level) = skill_level {
            predicate.push(Clause::SkillLevel(level));
        }
        push_flag(
            &mut predicate,
            FlagField::CertificationRequired,
            params.certification_required,
        );
        push_flag(&mut predicate, FlagField::IsActive, params.is_active);
        push_flag(&mut predicate, FlagField::IsPopular, params.is_popular);
        self.push_tags(&mut predicate, params.tags.as_deref());

        Ok(CompiledQuery {
            predicate,
            sort: SortSpec::new(
                SortField::for_labor(params.sort_by.as_deref()),
                SortDirection::parse(params.sort_order.as_deref()),
            ),
            window: self.limits.window(params.page, params.page_size),
        })
    }

    /// Active items whose `fields` contain `term`. Used by global search.
    pub fn active_text_predicate(&self, fields: &[TextField], term: &str) -> Predicate {
        Predicate::new()
            .and(Clause::Text {
                fields: fields.to_vec(),
                term: term.to_string(),
            })
            .and(Clause::Flag {
                field: FlagField::IsActive,
                value: true,
            })
    }

    /// Trim, drop control characters, and cap the length.
    ///
    /// Returns `None` when nothing usable is left.
    pub fn sanitize_term(&self, raw: &str) -> Option<String> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_control())
            .take(self.limits.max_term_len)
            .collect();
        let cleaned = cleaned.trim();

        (!cleaned.is_empty()).then(|| cleaned.to_string())
    }

    fn push_text(&self, predicate: &mut Predicate, fields: &[TextField], raw: Option<&str>) {
        if let Some(term) = raw.and_then(|r| self.sanitize_term(r)) {
            predicate.push(Clause::Text {
                fields: fields.to_vec(),
                term,
            });
        }
    }

    fn push_tags(&self, predicate: &mut Predicate, raw: Option<&str>) {
        let tags = raw.map(|r| self.parse_tags(r)).unwrap_or_default();
        if !tags.is_empty() {
            predicate.push(Clause::TagsAny(tags));
        }
    }

    /// Split a comma-separated tag list, dropping blank entries.
    pub fn parse_tags(&self, raw: &str) -> Vec<String> {
        raw.split(',')
            .filter_map(|tag| self.sanitize_term(tag))
            .collect()
    }
}

fn check_range(
    min_name: &str,
    max_name: &str,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> AppResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(AppError::invalid(format!(
            "{min_name} cannot be greater than {max_name}"
        ))),
        _ => Ok(()),
    }
}

fn push_category(predicate: &mut Predicate, category_id: Option<uuid::Uuid>) {
    if let Some(id) = category_id {
        predicate.push(Clause::Category(id));
    }
}

fn push_range(
    predicate: &mut Predicate,
    field: AmountField,
    min: Option<Decimal>,
    max: Option<Decimal>,
) {
    if min.is_some() || max.is_some() {
        predicate.push(Clause::Range { field, min, max });
    }
}

fn push_flag(predicate: &mut Predicate, field: FlagField, value: Option<bool>) {
    if let Some(value) = value {
        predicate.push(Clause::Flag { field, value });
    }
}
