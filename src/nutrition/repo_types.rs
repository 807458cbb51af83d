use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::GenerationError;

/// Daily totals and per-meal split, as stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserMacroProfile {
    pub calories: f64,
    pub protein_percent: f64,
    pub carb_percent: f64,
    pub fat_percent: f64,
    pub breakfast_percent: f64,
    pub lunch_percent: f64,
    pub dinner_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// `foodType` selector as sent by clients: "0" breakfast, "1" lunch, "2" dinner.
    pub fn from_selector(raw: &str) -> Result<Self, GenerationError> {
        match raw.trim().parse::<i64>() {
            Ok(0) => Ok(Self::Breakfast),
            Ok(1) => Ok(Self::Lunch),
            Ok(2) => Ok(Self::Dinner),
            _ => Err(GenerationError::InvalidMealType(raw.to_string())),
        }
    }

    pub fn as_index(self) -> i32 {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// One meal's share of the daily targets. Not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealMacroTarget {
    pub calories: f64,
    pub protein_percent: f64,
    pub carb_percent: f64,
    pub fat_percent: f64,
}
