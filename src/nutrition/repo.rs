use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::UserMacroProfile;

#[async_trait]
pub trait MacroProfileRepo: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<Option<UserMacroProfile>>;
}

#[derive(Clone)]
pub struct PgMacroProfileRepo {
    db: PgPool,
}

impl PgMacroProfileRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MacroProfileRepo for PgMacroProfileRepo {
    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<Option<UserMacroProfile>> {
        let row = sqlx::query_as::<_, UserMacroProfile>(
            r#"
            SELECT calories, protein_percent, carb_percent, fat_percent,
                   breakfast_percent, lunch_percent, dinner_percent
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("fetch macro profile")?;
        Ok(row)
    }
}
