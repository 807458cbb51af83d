use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::ExerciseRecord;

#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    async fn fetch_by_equipment(&self, equipment: &[String]) -> anyhow::Result<Vec<ExerciseRecord>>;
}

#[derive(Clone)]
pub struct PgExerciseCatalog {
    db: PgPool,
}

impl PgExerciseCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExerciseCatalog for PgExerciseCatalog {
    async fn fetch_by_equipment(&self, equipment: &[String]) -> anyhow::Result<Vec<ExerciseRecord>> {
        let rows = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT name, target AS target_muscle, "bodyPart" AS body_part, equipment
            FROM workout_data
            WHERE equipment = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(equipment)
        .fetch_all(&self.db)
        .await
        .context("fetch exercises by equipment")?;
        Ok(rows)
    }
}
