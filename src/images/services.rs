use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::GenerationError;
use crate::state::AppState;
use crate::upstream::with_timeout;

const MEAL_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Downloads a generated picture from the URL the generation API hands back.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Bytes>;
}

#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    http: reqwest::Client,
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Bytes> {
        let res = self.http.get(url).send().await.context("fetch generated image")?;
        if !res.status().is_success() {
            return Err(anyhow!("unable to fetch the image: {}", res.status()));
        }
        res.bytes().await.context("read image body")
    }
}

pub fn meal_image_key(user_id: Uuid, at: OffsetDateTime) -> String {
    let millis = at.unix_timestamp_nanos() / 1_000_000;
    format!("images/{}/{}-meal.png", user_id, millis)
}

async fn generate_and_upload(st: &AppState, user_id: Uuid, meal_name: &str) -> anyhow::Result<Option<String>> {
    let limit = st.config.upstream.generation_timeout();
    let Some(source_url) =
        with_timeout(limit, "image generation", st.generator.generate_image(meal_name)).await?
    else {
        return Ok(None);
    };

    let limit = st.config.upstream.timeout();
    let body = with_timeout(limit, "image download", st.images.fetch(&source_url)).await?;

    let key = meal_image_key(user_id, OffsetDateTime::now_utc());
    with_timeout(
        limit,
        "image upload",
        st.storage.put_object(&key, body, MEAL_IMAGE_CONTENT_TYPE),
    )
    .await
    .with_context(|| format!("put_object {}", key))?;

    Ok(Some(st.storage.public_url(&key)))
}

/// Picture of the meal stored in the blob store. Failures degrade to no image.
pub async fn meal_image_url(st: &AppState, user_id: Uuid, meal_name: &str) -> Option<String> {
    match generate_and_upload(st, user_id, meal_name).await {
        Ok(Some(url)) => {
            info!(%user_id, %url, "meal image stored");
            Some(url)
        }
        Ok(None) => {
            warn!(%user_id, "image generation returned no image");
            None
        }
        Err(e) => {
            let err = GenerationError::ImageGenerationFailure(e);
            warn!(%user_id, error = %err, "continuing without meal image");
            None
        }
    }
}

#[cfg(test)]
mod image_tests {
    use super::*;
    use crate::testing::Fakes;
    use time::macros::datetime;

    #[test]
    fn key_uses_user_and_millis() {
        let user = Uuid::nil();
        let key = meal_image_key(user, datetime!(2024-01-01 00:00:00.123 UTC));
        assert_eq!(key, format!("images/{}/1704067200123-meal.png", user));
    }

    #[tokio::test]
    async fn stores_generated_image() {
        let fakes = Fakes::new();
        let state = fakes.state();
        let user = Uuid::new_v4();

        let url = meal_image_url(&state, user, "Jerk Chicken").await.unwrap();
        let puts = fakes.storage.puts();
        assert_eq!(puts.len(), 1);
        assert!(puts[0].0.starts_with(&format!("images/{}/", user)));
        assert!(puts[0].0.ends_with("-meal.png"));
        assert_eq!(puts[0].1, MEAL_IMAGE_CONTENT_TYPE);
        assert_eq!(url, format!("https://blobs.test/image_generation/{}", puts[0].0));
        assert_eq!(fakes.generator.image_subjects(), vec!["Jerk Chicken".to_string()]);
    }

    #[tokio::test]
    async fn missing_image_is_not_an_error() {
        let fakes = Fakes::new();
        fakes.generator.set_image(Ok(None));
        assert!(meal_image_url(&fakes.state(), Uuid::new_v4(), "Pho").await.is_none());
        assert!(fakes.storage.puts().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_degrades_to_none() {
        let fakes = Fakes::new();
        fakes.storage.fail_puts();
        assert!(meal_image_url(&fakes.state(), Uuid::new_v4(), "Pho").await.is_none());
    }
}
