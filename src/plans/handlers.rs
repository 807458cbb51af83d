use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::{
    ErrorResponse, GenerateMealRequest, GenerateWorkoutRequest, MealPlanResponse,
    WorkoutPlanResponse,
};
use super::services::{generate_meal, generate_workout, MealRequest, WorkoutRequest};
use crate::error::GenerationError;
use crate::state::AppState;

const INVALID_INPUT: &str = "Invalid input parameters";
const MEAL_FAILED: &str = "Error generating meal plan";
const WORKOUT_FAILED: &str = "Error generating workout plan";

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn generate_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-specific-meal", post(generate_specific_meal))
        .route("/generate-specific-workout", post(generate_specific_workout))
}

fn reply(status: StatusCode, message: &'static str) -> ApiError {
    (status, Json(ErrorResponse { message }))
}

fn bad_request(reason: impl std::fmt::Display) -> ApiError {
    warn!(%reason, "rejected request");
    reply(StatusCode::BAD_REQUEST, INVALID_INPUT)
}

/// Opaque client message; the detail only goes to the log.
fn pipeline_failure(err: GenerationError, message: &'static str) -> ApiError {
    if err.is_invalid_input() {
        return bad_request(err);
    }
    error!(error = %err, "generation pipeline failed");
    reply(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|e| bad_request(format!("userId: {}", e)))
}

#[instrument(skip(state, body))]
pub async fn generate_specific_meal(
    State(state): State<AppState>,
    body: Result<Json<GenerateMealRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;
    let user_id = parse_user_id(&body.user_id)?;

    let req = MealRequest {
        user_id,
        user_phrase: body.user_phrase,
        food_type: body.food_type.as_text(),
    };
    let meal_plan = generate_meal(&state, req)
        .await
        .map_err(|e| pipeline_failure(e, MEAL_FAILED))?;
    Ok(Json(MealPlanResponse { meal_plan }))
}

#[instrument(skip(state, body))]
pub async fn generate_specific_workout(
    State(state): State<AppState>,
    body: Result<Json<GenerateWorkoutRequest>, JsonRejection>,
) -> Result<Json<WorkoutPlanResponse>, ApiError> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;
    let user_id = parse_user_id(&body.user_id)?;
    let workout_type = body
        .workout_type
        .as_int()
        .ok_or_else(|| bad_request("workoutType is not an integer"))?;
    let workout_sub_type = body
        .workout_sub_type
        .as_int()
        .ok_or_else(|| bad_request("workoutSubType is not an integer"))?;

    let req = WorkoutRequest {
        user_id,
        user_phrase: body.user_phrase,
        workout_type,
        workout_sub_type,
    };
    let workout_plan = generate_workout(&state, req)
        .await
        .map_err(|e| pipeline_failure(e, WORKOUT_FAILED))?;
    Ok(Json(WorkoutPlanResponse { workout_plan }))
}
