//! External DTO shapes.
//!
//! Vendor-derived fields default to `0`/`null`/`false` and are only filled
//! by the stats endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, CategoryType, LaborCategory, Material, SkillLevel};
use crate::stats::vendor::{LaborVendorStats, MaterialVendorStats};

/// Category lookup used to resolve `categoryName`.
pub type CategoryLabel = HashMap<Uuid, Category>;

fn category_name(labels: &CategoryLabel, category_id: Option<Uuid>) -> String {
    category_id
        .and_then(|id| labels.get(&id))
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

/// Material as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDto {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    /// Empty when the category is missing.
    pub category_name: String,
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub min_order_quantity: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_order_quantity: Option<Decimal>,
    pub hsn_code: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub gst_percentage: Option<Decimal>,
    pub is_active: bool,
    pub is_popular: bool,
    pub display_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
    pub available_vendors: u32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_vendor_price: Option<Decimal>,
    pub in_stock: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub stock_level: Option<Decimal>,
}

impl MaterialDto {
    /// Build the plain DTO without vendor fields.
    pub fn new(material: Material, labels: &CategoryLabel) -> Self {
        Self {
            id: material.id,
            category_name: category_name(labels, material.category_id),
            category_id: material.category_id,
            name: material.name,
            description: material.description,
            tags: material.tags,
            sku: material.sku,
            brand: material.brand,
            unit: material.unit,
            base_price: material.base_price,
            min_order_quantity: material.min_order_quantity,
            max_order_quantity: material.max_order_quantity,
            hsn_code: material.hsn_code,
            gst_percentage: material.gst_percentage,
            is_active: material.is_active,
            is_popular: material.is_popular,
            display_order: material.display_order,
            created_at: material.created,
            updated_at: material.changed,
            available_vendors: 0,
            average_vendor_price: None,
            in_stock: false,
            stock_level: None,
        }
    }

    /// Attach vendor-derived fields.
    pub fn with_vendor_stats(mut self, stats: &MaterialVendorStats) -> Self {
        self.available_vendors = stats.available_vendors;
        self.average_vendor_price = stats.average_vendor_price;
        self.in_stock = stats.in_stock;
        self.stock_level = stats.stock_level;
        self
    }
}

/// Labor category as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCategoryDto {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub category_name: String,
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_hourly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_daily_rate: Decimal,
    pub skill_level: SkillLevel,
    pub minimum_experience_years: i32,
    pub certification_required: bool,
    pub is_active: bool,
    pub is_popular: bool,
    pub display_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
    pub available_vendors: u32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_vendor_rate: Option<Decimal>,
    pub available_workers: i64,
}

impl LaborCategoryDto {
    /// Build the plain DTO without vendor fields.
    pub fn new(labor: LaborCategory, labels: &CategoryLabel) -> Self {
        Self {
            id: labor.id,
            category_name: category_name(labels, labor.category_id),
            category_id: labor.category_id,
            name: labor.name,
            description: labor.description,
            tags: labor.tags,
            base_hourly_rate: labor.base_hourly_rate,
            base_daily_rate: labor.base_daily_rate,
            skill_level: labor.skill_level,
            minimum_experience_years: labor.minimum_experience_years,
            certification_required: labor.certification_required,
            is_active: labor.is_active,
            is_popular: labor.is_popular,
            display_order: labor.display_order,
            created_at: labor.created,
            updated_at: labor.changed,
            available_vendors: 0,
            average_vendor_rate: None,
            available_workers: 0,
        }
    }

    /// Attach vendor-derived fields.
    pub fn with_vendor_stats(mut self, stats: &LaborVendorStats) -> Self {
        self.available_vendors = stats.available_vendors;
        self.average_vendor_rate = stats.average_vendor_rate;
        self.available_workers = stats.available_workers;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub key: String,
    pub name: String,
    pub category_type: CategoryType,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            key: category.key,
            name: category.name,
            category_type: category.category_type,
            parent_id: category.parent_id,
            is_active: category.is_active,
            display_order: category.display_order,
        }
    }
}

/// Two capped lists plus the combined count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchResult {
    pub materials: Vec<MaterialDto>,
    pub labor_categories: Vec<LaborCategoryDto>,
    pub total_results: usize,
}

impl GlobalSearchResult {
    pub fn new(materials: Vec<MaterialDto>, labor_categories: Vec<LaborCategoryDto>) -> Self {
        let total_results = materials.len() + labor_categories.len();
        Self {
            materials,
            labor_categories,
            total_results,
        }
    }
}
