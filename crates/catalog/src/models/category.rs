//! Catalog categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of catalog item a category groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Material,
    Labor,
}

impl CategoryType {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Material => "material",
            CategoryType::Labor => "labor",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "material" => Ok(CategoryType::Material),
            "labor" => Ok(CategoryType::Labor),
            other => Err(format!("unknown category type: {other}")),
        }
    }
}

impl TryFrom<String> for CategoryType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A catalog category.
///
/// `parent_id` is a plain back-reference; no cycle detection is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,

    /// Stable slug.
    pub key: String,

    pub name: String,

    #[sqlx(try_from = "String")]
    pub category_type: CategoryType,

    pub parent_id: Option<Uuid>,

    pub is_active: bool,

    pub display_order: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn category_type_parses_case_insensitively() {
        assert_eq!("Material".parse::<CategoryType>(), Ok(CategoryType::Material));
        assert_eq!("LABOR".parse::<CategoryType>(), Ok(CategoryType::Labor));
        assert!("service".parse::<CategoryType>().is_err());
    }

    #[test]
    fn category_type_serializes_lowercase() {
        let json = serde_json::to_string(&CategoryType::Labor).unwrap();
        assert_eq!(json, "\"labor\"");
    }
}
