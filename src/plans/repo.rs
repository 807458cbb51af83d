use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::generation::{GeneratedMealPlan, GeneratedWorkoutPlan};

/// Row for `user_temp_gen`.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub user_id: Uuid,
    pub meal_type: i32,
    pub plan: GeneratedMealPlan,
    pub image_url: Option<String>,
}

/// Row for `user_temp_workout_gen`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub user_id: Uuid,
    pub type_int: i32,
    pub sub_type_int: i32,
    pub type_string: String,
    pub sub_type_string: String,
    pub plan: GeneratedWorkoutPlan,
}

/// Single-row inserts of generated plans. No idempotency key: each call adds a row.
#[async_trait]
pub trait PlanWriter: Send + Sync {
    async fn insert_meal(&self, record: &MealRecord) -> anyhow::Result<()>;
    async fn insert_workout(&self, record: &WorkoutRecord) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgPlanWriter {
    db: PgPool,
}

impl PgPlanWriter {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanWriter for PgPlanWriter {
    async fn insert_meal(&self, r: &MealRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_temp_gen
                (user_id, meal_type, meal_name, food_description, ingredients, cooking_time,
                 recipe, calories, protein, fats, carbs, serving_size, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(r.user_id)
        .bind(r.meal_type)
        .bind(&r.plan.meal_name)
        .bind(&r.plan.food_description)
        .bind(&r.plan.ingredients)
        .bind(r.plan.cooking_time)
        .bind(&r.plan.recipe)
        .bind(r.plan.calories)
        .bind(r.plan.protein)
        .bind(r.plan.fat)
        .bind(r.plan.carbs)
        .bind(&r.plan.serving_size)
        .bind(r.image_url.as_deref())
        .execute(&self.db)
        .await
        .context("insert meal")?;
        Ok(())
    }

    async fn insert_workout(&self, r: &WorkoutRecord) -> anyhow::Result<()> {
        let mut query = sqlx::query(
            r#"
            INSERT INTO user_temp_workout_gen
                (user_id, type_int, sub_type_int, type_string, sub_type_string,
                 exercise_id_1, sets_1, reps_1, exercise_id_2, sets_2, reps_2,
                 exercise_id_3, sets_3, reps_3, exercise_id_4, sets_4, reps_4,
                 exercise_id_5, sets_5, reps_5, exercise_id_6, sets_6, reps_6)
            VALUES ($1, $2, $3, $4, $5,
                    $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23)
            "#,
        )
        .bind(r.user_id)
        .bind(r.type_int)
        .bind(r.sub_type_int)
        .bind(&r.type_string)
        .bind(&r.sub_type_string);

        for ex in r.plan.exercises() {
            query = query.bind(ex.name).bind(ex.sets).bind(ex.reps);
        }

        query.execute(&self.db).await.context("insert workout")?;
        Ok(())
    }
}
