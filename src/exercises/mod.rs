pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo::{ExerciseCatalog, PgExerciseCatalog};
pub use repo_types::{ExercisePool, ExerciseRecord, WorkoutCategory, WorkoutType};
