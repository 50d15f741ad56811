//! Catalog query builder using SeaQuery.
//!
//! Translates a compiled [`Predicate`] and [`SortSpec`] into PostgreSQL.
//! The page query and the count query share the same WHERE construction,
//! so the total always reflects the predicate the page was cut from.

use sea_query::{
    Alias, Asterisk, Cond, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};

use crate::search::types::{
    Clause, CompiledQuery, Predicate, SortDirection, SortField, SortSpec, TextField,
};

/// Tables holding searchable catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Material,
    LaborCategory,
}

impl CatalogTable {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogTable::Material => "material",
            CatalogTable::LaborCategory => "labor_category",
        }
    }
}

/// Query builder for catalog searches.
pub struct CatalogQueryBuilder {
    table: CatalogTable,
}

impl CatalogQueryBuilder {
    pub fn new(table: CatalogTable) -> Self {
        Self { table }
    }

    /// Build the windowed SELECT.
    pub fn build(&self, query: &CompiledQuery) -> String {
        let mut select = Query::select();
        select.column((Alias::new(self.table.name()), Asterisk));
        select.from(Alias::new(self.table.name()));

        self.add_filters(&mut select, &query.predicate);
        self.add_sort(&mut select, &query.sort);

        select.limit(u64::from(query.window.page_size));
        select.offset(query.window.offset());

        select.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT over the same predicate, without window or sort.
    pub fn build_count(&self, predicate: &Predicate) -> String {
        let mut select = Query::select();
        select.expr(Expr::col(Asterisk).count());
        select.from(Alias::new(self.table.name()));

        self.add_filters(&mut select, predicate);

        select.to_string(PostgresQueryBuilder)
    }

    /// AND every clause onto the WHERE.
    fn add_filters(&self, select: &mut SelectStatement, predicate: &Predicate) {
        for clause in &predicate.clauses {
            select.cond_where(self.clause_condition(clause));
        }
    }

    fn column(&self, name: &str) -> SimpleExpr {
        Expr::col((Alias::new(self.table.name()), Alias::new(name))).into()
    }

    /// Case-insensitive literal substring match.
    fn ilike(&self, column: &str, term: &str) -> SimpleExpr {
        Expr::cust_with_values(
            format!("{}.{column} ILIKE $1", self.table.name()),
            [contains_pattern(term)],
        )
    }

    fn clause_condition(&self, clause: &Clause) -> Cond {
        match clause {
            Clause::Text { fields, term } => fields
                .iter()
                .fold(Cond::any(), |cond, field| {
                    cond.add(self.ilike(field.column(), term))
                }),
            Clause::Category(id) => Cond::all().add(self.column("category_id").eq(*id)),
            Clause::Range { field, min, max } => {
                let mut cond = Cond::all();
                if let Some(min) = min {
                    cond = cond.add(self.column(field.column()).gte(*min));
                }
                if let Some(max) = max {
                    cond = cond.add(self.column(field.column()).lte(*max));
                }
                cond
            }
            Clause::Flag { field, value } => {
                Cond::all().add(self.column(field.column()).eq(*value))
            }
            Clause::SkillLevel(level) => {
                Cond::all().add(self.column("skill_level").eq(level.as_str()))
            }
            Clause::TagsAny(tags) => tags.iter().fold(Cond::any(), |cond, tag| {
                cond.add(Expr::cust_with_values(
                    format!(
                        "EXISTS (SELECT 1 FROM unnest({}.tags) AS tag WHERE tag ILIKE $1)",
                        self.table.name()
                    ),
                    [contains_pattern(tag)],
                ))
            }),
        }
    }

    /// ORDER BY the chosen field, then id ascending.
    fn add_sort(&self, select: &mut SelectStatement, sort: &SortSpec) {
        let order = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let table = self.table.name();

        match sort.field {
            SortField::Name | SortField::Brand | SortField::Sku => {
                let column = match sort.field {
                    SortField::Brand => TextField::Brand,
                    SortField::Sku => TextField::Sku,
                    _ => TextField::Name,
                };
                select.order_by_expr(
                    Expr::cust(format!("LOWER({table}.{})", column.column())),
                    order,
                );
            }
            SortField::SkillLevel => {
                select.order_by_expr(
                    Expr::cust(format!(
                        "CASE {table}.skill_level WHEN 'entry' THEN 1 WHEN 'intermediate' THEN 2 ELSE 3 END"
                    )),
                    order,
                );
            }
            field => {
                select.order_by((Alias::new(table), Alias::new(sort_column(field))), order);
            }
        }

        select.order_by((Alias::new(table), Alias::new("id")), Order::Asc);
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::BasePrice => "base_price",
        SortField::BaseHourlyRate => "base_hourly_rate",
        SortField::BaseDailyRate => "base_daily_rate",
        SortField::MinimumExperienceYears => "minimum_experience_years",
        SortField::DisplayOrder => "display_order",
        SortField::Created => "created",
        SortField::Name => "name",
        SortField::Brand => "brand",
        SortField::Sku => "sku",
        SortField::SkillLevel => "skill_level",
    }
}

/// `%term%` with LIKE wildcards escaped.
fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like_wildcards(term))
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
