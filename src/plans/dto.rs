use serde::{Deserialize, Serialize};

use crate::generation::{GeneratedMealPlan, GeneratedWorkoutPlan};

/// Enum selectors arrive either as JSON numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Int(i64),
    Text(String),
}

impl Selector {
    pub fn as_text(&self) -> String {
        match self {
            Selector::Int(v) => v.to_string(),
            Selector::Text(s) => s.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Selector::Int(v) => Some(*v),
            Selector::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_phrase: Option<String>,
    pub food_type: Selector,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_phrase: Option<String>,
    pub workout_type: Selector,
    pub workout_sub_type: Selector,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub meal_plan: GeneratedMealPlan,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanResponse {
    pub workout_plan: GeneratedWorkoutPlan,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
}
