use anyhow::anyhow;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::repo::{MealRecord, WorkoutRecord};
use crate::credits::DebitOutcome;
use crate::error::{GenerationError, Result};
use crate::exercises::{services::build_pool, WorkoutCategory};
use crate::generation::{
    prompts::{meal_prompt, workout_prompt},
    schema::{parse_meal_plan, parse_workout_plan},
    GeneratedMealPlan, GeneratedWorkoutPlan, Prompt,
};
use crate::images::services::meal_image_url;
use crate::nutrition::{services::allocate, MealType};
use crate::preferences::services::{
    fetch_food_preferences, fetch_liked_equipment, select_equipment,
};
use crate::state::AppState;
use crate::upstream::{read_with_retry, with_timeout};

#[derive(Debug, Clone)]
pub struct MealRequest {
    pub user_id: Uuid,
    pub user_phrase: Option<String>,
    pub food_type: String,
}

#[derive(Debug, Clone)]
pub struct WorkoutRequest {
    pub user_id: Uuid,
    pub user_phrase: Option<String>,
    pub workout_type: i64,
    pub workout_sub_type: i64,
}

/// Refuse up front when the user has nothing left to spend.
async fn ensure_credit(st: &AppState, user_id: Uuid) -> Result<()> {
    let balance = read_with_retry(&st.config.upstream, "credit balance", || {
        st.credits.balance(user_id)
    })
    .await
    .map_err(GenerationError::UpstreamReadFailure)?;
    match balance {
        Some(b) if b > 0 => Ok(()),
        _ => Err(GenerationError::InsufficientCredit),
    }
}

async fn generate(st: &AppState, prompt: &Prompt) -> Result<String> {
    with_timeout(
        st.config.upstream.generation_timeout(),
        "text generation",
        st.generator.generate_text(&prompt.system, &prompt.user),
    )
    .await
    .map_err(GenerationError::GenerationRequestFailure)
}

async fn debit(st: &AppState, user_id: Uuid) -> Result<()> {
    let outcome = with_timeout(
        st.config.upstream.timeout(),
        "credit debit",
        st.credits.check_and_debit(user_id),
    )
    .await
    .map_err(GenerationError::CreditDebitFailure)?;
    match outcome {
        DebitOutcome::Debited(remaining) => {
            debug!(%user_id, remaining, "credit debited");
            Ok(())
        }
        DebitOutcome::Insufficient => Err(GenerationError::InsufficientCredit),
    }
}

/// Meal pipeline: inputs, prompt, generation, image, row, credit.
#[instrument(skip(st, req), fields(user_id = %req.user_id))]
pub async fn generate_meal(st: &AppState, req: MealRequest) -> Result<GeneratedMealPlan> {
    let meal = MealType::from_selector(&req.food_type)?;
    let user_id = req.user_id;
    ensure_credit(st, user_id).await?;

    let cfg = &st.config.upstream;
    let (preferences, profile) = tokio::try_join!(
        fetch_food_preferences(st.preferences.as_ref(), cfg, user_id),
        read_with_retry(cfg, "macro profile", || st.macros.fetch_profile(user_id)),
    )
    .map_err(GenerationError::UpstreamReadFailure)?;
    let profile = profile.ok_or_else(|| {
        GenerationError::UpstreamReadFailure(anyhow!("no macro profile for user {}", user_id))
    })?;

    let target = allocate(&profile, meal);
    let prompt = meal_prompt(
        meal,
        &preferences.liked_names(),
        &target,
        req.user_phrase.as_deref(),
    );
    debug!(meal = meal.as_str(), calories = target.calories, "meal prompt built");

    let raw = generate(st, &prompt).await?;
    let plan = parse_meal_plan(&raw)?;

    let image_url = meal_image_url(st, user_id, &plan.meal_name).await;

    let record = MealRecord {
        user_id,
        meal_type: meal.as_index(),
        plan,
        image_url,
    };
    with_timeout(cfg.timeout(), "meal insert", st.plans.insert_meal(&record))
        .await
        .map_err(GenerationError::PersistenceFailure)?;

    debit(st, user_id).await?;
    info!(%user_id, meal = meal.as_str(), name = %record.plan.meal_name, "meal generated");
    Ok(record.plan)
}

/// Workout pipeline: category, equipment, pool, prompt, generation, row, credit.
#[instrument(skip(st, req), fields(user_id = %req.user_id))]
pub async fn generate_workout(st: &AppState, req: WorkoutRequest) -> Result<GeneratedWorkoutPlan> {
    let category = WorkoutCategory::resolve(req.workout_type, req.workout_sub_type)?;
    let user_id = req.user_id;
    ensure_credit(st, user_id).await?;

    let cfg = &st.config.upstream;
    let mut rng = st.rng();

    let liked = fetch_liked_equipment(st.preferences.as_ref(), cfg, user_id)
        .await
        .map_err(GenerationError::UpstreamReadFailure)?;
    let equipment = select_equipment(liked, &mut rng).liked_names();
    if equipment.is_empty() {
        return Err(GenerationError::InvalidInput("user has no preferred equipment".into()));
    }

    let catalog = read_with_retry(cfg, "exercise catalog", || {
        st.exercises.fetch_by_equipment(&equipment)
    })
    .await
    .map_err(GenerationError::UpstreamReadFailure)?;
    let pool = build_pool(catalog, category.sub_category, &mut rng);
    if pool.is_empty() {
        return Err(GenerationError::InvalidInput(
            "no exercises match the preferred equipment".into(),
        ));
    }
    debug!(
        matches = pool.matches.len(),
        others = pool.others.len(),
        sub_category = category.sub_category,
        "exercise pool built"
    );

    let prompt = workout_prompt(&category, &equipment, &pool, req.user_phrase.as_deref());
    let raw = generate(st, &prompt).await?;
    let plan = parse_workout_plan(&raw, &pool)?;

    let record = WorkoutRecord {
        user_id,
        type_int: category.type_index,
        sub_type_int: category.sub_type_index,
        type_string: category.label().to_string(),
        sub_type_string: category.sub_category.to_uppercase(),
        plan,
    };
    with_timeout(cfg.timeout(), "workout insert", st.plans.insert_workout(&record))
        .await
        .map_err(GenerationError::PersistenceFailure)?;

    debit(st, user_id).await?;
    info!(%user_id, category = category.label(), sub = category.sub_category, "workout generated");
    Ok(record.plan)
}
