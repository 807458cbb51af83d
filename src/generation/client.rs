use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageGenerationRequest,
    ImageGenerationResponse,
};
use super::prompts;
use crate::config::OpenAiConfig;

/// Hosted text and image generation.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Raw assistant text for a system + user message pair.
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;

    /// URL of a generated picture of the named dish, `None` when the API returned none.
    async fn generate_image(&self, subject: &str) -> anyhow::Result<Option<String>>;
}

pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> anyhow::Result<Self> {
        let http = Client::builder().build().context("build http client")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> anyhow::Result<R>
    where
        B: serde::Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("send {}", path))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(anyhow!("{} returned {}: {}", path, status.as_u16(), message));
        }

        response
            .json::<R>()
            .await
            .with_context(|| format!("decode {} response", path))
    }
}

#[async_trait]
impl GenerationApi for OpenAiClient {
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.chat_model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
        };
        let completion: ChatCompletionResponse = self.post("chat/completions", &request).await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("chat completion returned no content"))?;
        debug!(len = content.len(), "chat completion received");
        Ok(content)
    }

    async fn generate_image(&self, subject: &str) -> anyhow::Result<Option<String>> {
        let request = ImageGenerationRequest::meal_photo(
            self.config.image_model.clone(),
            prompts::image_prompt(subject),
        );
        let response: ImageGenerationResponse = self.post("images/generations", &request).await?;
        Ok(response.data.into_iter().next().and_then(|d| d.url))
    }
}
