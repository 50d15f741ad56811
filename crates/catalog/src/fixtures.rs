//! Catalog fixture builders.
//!
//! Used by tests and by the in-memory demo catalog.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    Category, CategoryType, LaborCategory, Material, SkillLevel, VendorInventory,
    VendorLaborAvailability,
};

/// Create an active material with default values.
pub fn test_material(name: &str) -> Material {
    let now = chrono::Utc::now().timestamp();
    Material {
        id: Uuid::now_v7(),
        category_id: None,
        name: name.to_string(),
        description: None,
        tags: Vec::new(),
        sku: None,
        brand: None,
        unit: "unit".to_string(),
        base_price: Decimal::ZERO,
        min_order_quantity: None,
        max_order_quantity: None,
        hsn_code: None,
        gst_percentage: None,
        is_active: true,
        is_popular: false,
        display_order: 0,
        created: now,
        changed: now,
    }
}

/// Create an active entry-level labor category with default values.
pub fn test_labor(name: &str) -> LaborCategory {
    let now = chrono::Utc::now().timestamp();
    LaborCategory {
        id: Uuid::now_v7(),
        category_id: None,
        name: name.to_string(),
        description: None,
        tags: Vec::new(),
        base_hourly_rate: Decimal::ZERO,
        base_daily_rate: Decimal::ZERO,
        skill_level: SkillLevel::Entry,
        minimum_experience_years: 0,
        certification_required: false,
        is_active: true,
        is_popular: false,
        display_order: 0,
        created: now,
        changed: now,
    }
}

/// Create an active category.
pub fn test_category(key: &str, category_type: CategoryType) -> Category {
    Category {
        id: Uuid::now_v7(),
        key: key.to_string(),
        name: key.replace('-', " "),
        category_type,
        parent_id: None,
        is_active: true,
        display_order: 0,
    }
}

/// Create a vendor inventory row.
pub fn test_inventory(
    material_id: Uuid,
    vendor_price: i64,
    stock_quantity: i64,
    is_available: bool,
) -> VendorInventory {
    VendorInventory {
        vendor_id: Uuid::now_v7(),
        material_id,
        vendor_price: Decimal::from(vendor_price),
        stock_quantity: Decimal::from(stock_quantity),
        is_available,
    }
}

/// Create a vendor labor availability row.
pub fn test_availability(
    labor_category_id: Uuid,
    daily_rate: i64,
    available_workers: i32,
    is_available: bool,
) -> VendorLaborAvailability {
    VendorLaborAvailability {
        vendor_id: Uuid::now_v7(),
        labor_category_id,
        hourly_rate: Decimal::from(daily_rate) / Decimal::from(8),
        daily_rate: Decimal::from(daily_rate),
        available_workers,
        is_available,
    }
}

/// Builder methods for material fixtures.
pub trait MaterialFixture: Sized {
    fn with_category(self, category_id: Uuid) -> Self;
    fn with_price(self, price: i64) -> Self;
    fn with_brand(self, brand: &str) -> Self;
    fn with_sku(self, sku: &str) -> Self;
    fn with_description(self, description: &str) -> Self;
    fn with_tags(self, tags: &[&str]) -> Self;
    fn with_display_order(self, display_order: i32) -> Self;
    fn popular(self) -> Self;
    fn inactive(self) -> Self;
}

impl MaterialFixture for Material {
    fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    fn with_price(mut self, price: i64) -> Self {
        self.base_price = Decimal::from(price);
        self
    }

    fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Builder methods for labor category fixtures.
pub trait LaborFixture: Sized {
    fn with_category(self, category_id: Uuid) -> Self;
    fn with_rates(self, hourly: i64, daily: i64) -> Self;
    fn with_skill(self, skill_level: SkillLevel) -> Self;
    fn with_experience(self, years: i32) -> Self;
    fn with_description(self, description: &str) -> Self;
    fn with_tags(self, tags: &[&str]) -> Self;
    fn with_display_order(self, display_order: i32) -> Self;
    fn certified(self) -> Self;
    fn popular(self) -> Self;
    fn inactive(self) -> Self;
}

impl LaborFixture for LaborCategory {
    fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    fn with_rates(mut self, hourly: i64, daily: i64) -> Self {
        self.base_hourly_rate = Decimal::from(hourly);
        self.base_daily_rate = Decimal::from(daily);
        self
    }

    fn with_skill(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = skill_level;
        self
    }

    fn with_experience(mut self, years: i32) -> Self {
        self.minimum_experience_years = years;
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    fn certified(mut self) -> Self {
        self.certification_required = true;
        self
    }

    fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_builder() {
        let material = test_material("Cement")
            .with_price(420)
            .with_brand("Acme")
            .with_tags(&["grey", "bulk"])
            .popular()
            .inactive();

        assert_eq!(material.name, "Cement");
        assert_eq!(material.base_price, Decimal::from(420));
        assert_eq!(material.brand.as_deref(), Some("Acme"));
        assert_eq!(material.tags.len(), 2);
        assert!(material.is_popular);
        assert!(!material.is_active);
    }

    #[test]
    fn labor_builder() {
        let labor = test_labor("Mason")
            .with_rates(100, 800)
            .with_skill(SkillLevel::Intermediate)
            .certified();

        assert_eq!(labor.base_daily_rate, Decimal::from(800));
        assert_eq!(labor.skill_level, SkillLevel::Intermediate);
        assert!(labor.certification_required);
        assert!(labor.is_active);
    }

    #[test]
    fn category_name_from_key() {
        let category = test_category("power-tools", CategoryType::Material);
        assert_eq!(category.name, "power tools");
    }
}
