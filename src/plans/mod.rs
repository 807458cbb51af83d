mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{MealRecord, PgPlanWriter, PlanWriter, WorkoutRecord};

pub fn router() -> Router<AppState> {
    handlers::generate_routes()
}
