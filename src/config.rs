use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub chat_model: String,
    pub image_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub public_base_url: String,
}

/// Timeouts and retry policy applied to every external call.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub timeout_secs: u64,
    pub generation_timeout_secs: u64,
    pub read_retry_attempts: u32,
    pub read_retry_backoff_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            generation_timeout_secs: 120,
            read_retry_attempts: 3,
            read_retry_backoff_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub openai: OpenAiConfig,
    pub storage: StorageConfig,
    pub upstream: UpstreamConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;
        let openai = OpenAiConfig {
            api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY")?,
            api_url: env_or("OPENAI_API_URL", "https://api.openai.com"),
            chat_model: env_or("OPENAI_CHAT_MODEL", "gpt-4"),
            image_model: env_or("OPENAI_IMAGE_MODEL", "dall-e-3"),
        };

        let endpoint = std::env::var("STORAGE_ENDPOINT").context("STORAGE_ENDPOINT")?;
        let storage = StorageConfig {
            public_base_url: env_or("STORAGE_PUBLIC_BASE_URL", &endpoint),
            endpoint,
            bucket: env_or("STORAGE_BUCKET", "image_generation"),
            access_key: std::env::var("STORAGE_ACCESS_KEY").context("STORAGE_ACCESS_KEY")?,
            secret_key: std::env::var("STORAGE_SECRET_KEY").context("STORAGE_SECRET_KEY")?,
            region: env_or("STORAGE_REGION", "us-east-1"),
        };

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            timeout_secs: env_parse("UPSTREAM_TIMEOUT_SECS", defaults.timeout_secs),
            generation_timeout_secs: env_parse(
                "GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout_secs,
            ),
            read_retry_attempts: env_parse("READ_RETRY_ATTEMPTS", defaults.read_retry_attempts),
            read_retry_backoff_ms: env_parse(
                "READ_RETRY_BACKOFF_MS",
                defaults.read_retry_backoff_ms,
            ),
        };

        Ok(Self {
            database_url,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            openai,
            storage,
            upstream,
        })
    }
}
