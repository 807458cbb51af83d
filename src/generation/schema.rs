//! Strict parsing of model output.
//!
//! The model's reply is untrusted text. It is decoded into the typed plans
//! below or rejected; nothing downstream ever sees the raw JSON.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::GenerationError;
use crate::exercises::ExercisePool;

lazy_static! {
    static ref CODE_FENCE_RE: Regex =
        Regex::new(r"(?s)^```[A-Za-z]*\s*\n?(.*?)\n?\s*```$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMealPlan {
    #[serde(rename = "Meal_name")]
    pub meal_name: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "Food_description")]
    pub food_description: String,
    #[serde(rename = "Ingredients", deserialize_with = "text_or_lines")]
    pub ingredients: String,
    #[serde(rename = "Cooking_Time", deserialize_with = "integer")]
    pub cooking_time: i64,
    #[serde(rename = "Recipe", deserialize_with = "text_or_lines")]
    pub recipe: String,
    #[serde(rename = "Calories", deserialize_with = "integer")]
    pub calories: i64,
    #[serde(rename = "Protein", deserialize_with = "integer")]
    pub protein: i64,
    #[serde(rename = "Fat", deserialize_with = "integer")]
    pub fat: i64,
    #[serde(rename = "Carbs", deserialize_with = "integer")]
    pub carbs: i64,
    #[serde(rename = "Serving_size")]
    pub serving_size: String,
}

/// Six exercises with sets and reps, in the flat shape the model is asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkoutPlan {
    #[serde(rename = "ExerciseName_1")]
    pub exercise_name_1: String,
    #[serde(rename = "Sets_1", deserialize_with = "integer")]
    pub sets_1: i64,
    #[serde(rename = "Reps_1", deserialize_with = "integer")]
    pub reps_1: i64,
    #[serde(rename = "ExerciseName_2")]
    pub exercise_name_2: String,
    #[serde(rename = "Sets_2", deserialize_with = "integer")]
    pub sets_2: i64,
    #[serde(rename = "Reps_2", deserialize_with = "integer")]
    pub reps_2: i64,
    #[serde(rename = "ExerciseName_3")]
    pub exercise_name_3: String,
    #[serde(rename = "Sets_3", deserialize_with = "integer")]
    pub sets_3: i64,
    #[serde(rename = "Reps_3", deserialize_with = "integer")]
    pub reps_3: i64,
    #[serde(rename = "ExerciseName_4")]
    pub exercise_name_4: String,
    #[serde(rename = "Sets_4", deserialize_with = "integer")]
    pub sets_4: i64,
    #[serde(rename = "Reps_4", deserialize_with = "integer")]
    pub reps_4: i64,
    #[serde(rename = "ExerciseName_5")]
    pub exercise_name_5: String,
    #[serde(rename = "Sets_5", deserialize_with = "integer")]
    pub sets_5: i64,
    #[serde(rename = "Reps_5", deserialize_with = "integer")]
    pub reps_5: i64,
    #[serde(rename = "ExerciseName_6")]
    pub exercise_name_6: String,
    #[serde(rename = "Sets_6", deserialize_with = "integer")]
    pub sets_6: i64,
    #[serde(rename = "Reps_6", deserialize_with = "integer")]
    pub reps_6: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutExercise<'a> {
    pub name: &'a str,
    pub sets: i64,
    pub reps: i64,
}

impl GeneratedWorkoutPlan {
    pub fn exercises(&self) -> [WorkoutExercise<'_>; 6] {
        [
            WorkoutExercise { name: &self.exercise_name_1, sets: self.sets_1, reps: self.reps_1 },
            WorkoutExercise { name: &self.exercise_name_2, sets: self.sets_2, reps: self.reps_2 },
            WorkoutExercise { name: &self.exercise_name_3, sets: self.sets_3, reps: self.reps_3 },
            WorkoutExercise { name: &self.exercise_name_4, sets: self.sets_4, reps: self.reps_4 },
            WorkoutExercise { name: &self.exercise_name_5, sets: self.sets_5, reps: self.reps_5 },
            WorkoutExercise { name: &self.exercise_name_6, sets: self.sets_6, reps: self.reps_6 },
        ]
    }

    fn normalize_names(&mut self) {
        for name in [
            &mut self.exercise_name_1,
            &mut self.exercise_name_2,
            &mut self.exercise_name_3,
            &mut self.exercise_name_4,
            &mut self.exercise_name_5,
            &mut self.exercise_name_6,
        ] {
            *name = name.trim().to_lowercase();
        }
    }
}

fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Num {
        Int(i64),
        Float(f64),
        Text(String),
    }
    match Num::deserialize(d)? {
        Num::Int(v) => Ok(v),
        Num::Float(v)
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 =>
        {
            Ok(v as i64)
        }
        Num::Float(v) => Err(de::Error::custom(format!("expected an integer, got {v}"))),
        Num::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}

fn text_or_lines<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        One(String),
        Lines(Vec<String>),
    }
    Ok(match Text::deserialize(d)? {
        Text::One(s) => s,
        Text::Lines(lines) => lines.join("\n"),
    })
}

/// Trim whitespace and an enclosing markdown code fence.
fn unwrap_body(raw: &str) -> &str {
    let trimmed = raw.trim();
    CODE_FENCE_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed)
}

fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, GenerationError> {
    serde_json::from_str(unwrap_body(raw))
        .map_err(|e| GenerationError::MalformedGenerationOutput(e.to_string()))
}

pub fn parse_meal_plan(raw: &str) -> Result<GeneratedMealPlan, GenerationError> {
    let plan: GeneratedMealPlan = decode(raw)?;
    if plan.meal_name.trim().is_empty() {
        return Err(GenerationError::MalformedGenerationOutput("empty Meal_name".into()));
    }
    for (field, value) in [
        ("Cooking_Time", plan.cooking_time),
        ("Calories", plan.calories),
        ("Protein", plan.protein),
        ("Fat", plan.fat),
        ("Carbs", plan.carbs),
    ] {
        if value < 0 {
            return Err(GenerationError::MalformedGenerationOutput(format!(
                "{field} must not be negative, got {value}"
            )));
        }
    }
    Ok(plan)
}

/// Decode and check every exercise against the candidate pool.
pub fn parse_workout_plan(
    raw: &str,
    pool: &ExercisePool,
) -> Result<GeneratedWorkoutPlan, GenerationError> {
    let mut plan: GeneratedWorkoutPlan = decode(raw)?;
    plan.normalize_names();

    for (i, ex) in plan.exercises().iter().enumerate() {
        let slot = i + 1;
        if ex.name.is_empty() {
            return Err(GenerationError::MalformedGenerationOutput(format!(
                "ExerciseName_{slot} is empty"
            )));
        }
        if !pool.contains_name(ex.name) {
            return Err(GenerationError::MalformedGenerationOutput(format!(
                "ExerciseName_{slot} {:?} is not in the candidate list",
                ex.name
            )));
        }
        if ex.sets <= 0 || ex.reps <= 0 {
            return Err(GenerationError::MalformedGenerationOutput(format!(
                "Sets_{slot}/Reps_{slot} must be positive"
            )));
        }
    }
    Ok(plan)
}
