use std::sync::Arc;

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::credits::{CreditLedger, PgCreditLedger};
use crate::exercises::{ExerciseCatalog, PgExerciseCatalog};
use crate::generation::{GenerationApi, OpenAiClient};
use crate::images::{HttpImageFetcher, ImageFetcher};
use crate::nutrition::{MacroProfileRepo, PgMacroProfileRepo};
use crate::plans::{PgPlanWriter, PlanWriter};
use crate::preferences::{PgPreferenceRepo, PreferenceRepo};
use crate::storage::{Storage, StorageClient};

/// Every collaborator of the pipelines, injected at construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub macros: Arc<dyn MacroProfileRepo>,
    pub preferences: Arc<dyn PreferenceRepo>,
    pub exercises: Arc<dyn ExerciseCatalog>,
    pub plans: Arc<dyn PlanWriter>,
    pub credits: Arc<dyn CreditLedger>,
    pub generator: Arc<dyn GenerationApi>,
    pub images: Arc<dyn ImageFetcher>,
    pub storage: Arc<dyn StorageClient>,
    /// Fixed seed for the sampling steps; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let storage = Arc::new(Storage::new(&config.storage).await?) as Arc<dyn StorageClient>;
        let generator =
            Arc::new(OpenAiClient::new(config.openai.clone())?) as Arc<dyn GenerationApi>;

        Ok(Self {
            macros: Arc::new(PgMacroProfileRepo::new(db.clone())),
            preferences: Arc::new(PgPreferenceRepo::new(db.clone())),
            exercises: Arc::new(PgExerciseCatalog::new(db.clone())),
            plans: Arc::new(PgPlanWriter::new(db.clone())),
            credits: Arc::new(PgCreditLedger::new(db)),
            generator,
            images: Arc::new(HttpImageFetcher::default()),
            storage,
            config,
            rng_seed: None,
        })
    }

    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
