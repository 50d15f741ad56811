//! Labor service catalog items.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Required skill level for a labor service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Entry,
    Intermediate,
    Expert,
}

impl SkillLevel {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Entry => "entry",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Expert => "expert",
        }
    }

    /// Position used when sorting by skill level.
    pub fn rank(&self) -> i64 {
        match self {
            SkillLevel::Entry => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Expert => 3,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(SkillLevel::Entry),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "expert" => Ok(SkillLevel::Expert),
            other => Err(format!("unknown skill level: {other}")),
        }
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A labor service offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LaborCategory {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    pub category_id: Option<Uuid>,

    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub base_hourly_rate: Decimal,

    pub base_daily_rate: Decimal,

    #[sqlx(try_from = "String")]
    pub skill_level: SkillLevel,

    pub minimum_experience_years: i32,

    pub certification_required: bool,

    pub is_active: bool,

    pub is_popular: bool,

    pub display_order: i32,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn skill_level_round_trips_through_str() {
        for level in [SkillLevel::Entry, SkillLevel::Intermediate, SkillLevel::Expert] {
            assert_eq!(level.as_str().parse::<SkillLevel>(), Ok(level));
        }
        assert_eq!(" Expert ".parse::<SkillLevel>(), Ok(SkillLevel::Expert));
        assert!("master".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn skill_level_rank_is_ascending() {
        assert!(SkillLevel::Entry.rank() < SkillLevel::Intermediate.rank());
        assert!(SkillLevel::Intermediate.rank() < SkillLevel::Expert.rank());
    }
}
