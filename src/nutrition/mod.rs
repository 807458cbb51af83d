pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo::{MacroProfileRepo, PgMacroProfileRepo};
pub use repo_types::{MealMacroTarget, MealType, UserMacroProfile};
