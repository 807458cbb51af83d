use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::GenerationError;

/// Static catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub name: String,
    pub target_muscle: String,
    pub body_part: String,
    pub equipment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    UpperBodyPush,
    UpperBodyPull,
    LowerBody,
    CoreCardio,
}

impl WorkoutType {
    pub fn from_index(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::UpperBodyPush),
            1 => Some(Self::UpperBodyPull),
            2 => Some(Self::LowerBody),
            3 => Some(Self::CoreCardio),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UpperBodyPush => "Upper Body Push",
            Self::UpperBodyPull => "Upper Body Pull",
            Self::LowerBody => "Lower Body",
            Self::CoreCardio => "Core/Cardio",
        }
    }

    /// Subcategories in `workoutSubType` index order.
    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            Self::UpperBodyPush => &["Chest", "Shoulder", "Upper arms"],
            Self::UpperBodyPull => &["Lower arms", "Back"],
            Self::LowerBody => &["Lower legs", "Upper legs"],
            Self::CoreCardio => &["Waist", "Cardio"],
        }
    }
}

/// A validated (type, subtype) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutCategory {
    pub workout_type: WorkoutType,
    pub type_index: i32,
    pub sub_type_index: i32,
    pub sub_category: &'static str,
}

impl WorkoutCategory {
    pub fn resolve(workout_type: i64, sub_type: i64) -> Result<Self, GenerationError> {
        let invalid = || GenerationError::InvalidWorkoutCategory {
            workout_type,
            sub_type,
        };
        let kind = WorkoutType::from_index(workout_type).ok_or_else(invalid)?;
        let sub_category = usize::try_from(sub_type)
            .ok()
            .and_then(|i| kind.sub_categories().get(i).copied())
            .ok_or_else(invalid)?;
        Ok(Self {
            workout_type: kind,
            type_index: workout_type as i32,
            sub_type_index: sub_type as i32,
            sub_category,
        })
    }

    pub fn label(&self) -> &'static str {
        self.workout_type.label()
    }
}

/// Candidate exercises: every body-part match first, then sampled others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExercisePool {
    pub matches: Vec<ExerciseRecord>,
    pub others: Vec<ExerciseRecord>,
}

impl ExercisePool {
    pub fn len(&self) -> usize {
        self.matches.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.matches.iter().chain(self.others.iter())
    }

    /// Case-insensitive membership by exercise name.
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.iter().any(|ex| ex.name.to_lowercase() == wanted)
    }
}
