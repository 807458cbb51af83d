use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{PreferenceCategory, PreferenceItem};

#[async_trait]
pub trait PreferenceRepo: Send + Sync {
    /// Liked entries of one category for a user.
    async fn fetch_liked(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
    ) -> anyhow::Result<Vec<PreferenceItem>>;
}

#[derive(Clone)]
pub struct PgPreferenceRepo {
    db: PgPool,
}

impl PgPreferenceRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepo for PgPreferenceRepo {
    async fn fetch_liked(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
    ) -> anyhow::Result<Vec<PreferenceItem>> {
        // view and column names come from a closed enum, never from input
        let sql = format!(
            "SELECT {col} AS item_name, preference FROM {view} WHERE user_id = $1 AND preference = true",
            col = category.name_column(),
            view = category.view(),
        );
        let rows = sqlx::query_as::<_, PreferenceItem>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .with_context(|| format!("fetch preferences from {}", category.view()))?;
        Ok(rows)
    }
}
