//! Catalog data models.
//!
//! - Category: material or labor grouping with an optional parent
//! - Material: sellable goods priced per unit
//! - LaborCategory: labor services priced per hour and per day
//! - VendorInventory / VendorLaborAvailability: vendor offerings joined to items

pub mod category;
pub mod labor;
pub mod material;
pub mod vendor;

pub use category::{Category, CategoryType};
pub use labor::{LaborCategory, SkillLevel};
pub use material::Material;
pub use vendor::{VendorInventory, VendorLaborAvailability};
