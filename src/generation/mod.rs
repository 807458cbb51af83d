pub mod api_types;
pub mod client;
pub mod prompts;
pub mod schema;

pub use client::{GenerationApi, OpenAiClient};
pub use prompts::Prompt;
pub use schema::{GeneratedMealPlan, GeneratedWorkoutPlan};
