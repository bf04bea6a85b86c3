//! Client for the AI gateway with model fallback and per-model retry.

use std::time::Duration;

use openai::chat::{ChatCompletionMessage, ChatCompletionMessageRole};
use serde::Serialize;
use serde_json::Value;
use tokio::time;
use tracing::{debug, warn};

use crate::ai_settings;
use crate::config::Settings;
use crate::error::AppError;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatCompletionMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    modalities: Option<&'a [&'a str]>,
}

fn msg(role: ChatCompletionMessageRole, txt: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Some(txt.to_string()),
        ..Default::default()
    }
}

/// Outcome of a single model attempt.
enum AttemptError {
    /// Rate limit or overload: retry the same model after backing off.
    Transient(String),
    /// Anything else: give up on this model and fall through to the next.
    Permanent(String),
}

/// Gateway client that walks an ordered list of candidate models.
///
/// Each model is retried with exponential backoff on transient failures
/// before the next model in the chain is tried; the first extractable
/// answer wins. Retries are sequential by design, and the client holds no
/// state between calls.
pub struct FallbackClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
    max_attempts: u32,
    base_delay: Duration,
}

impl FallbackClient {
    pub fn new(
        base_url: String,
        api_key: String,
        models: Vec<String>,
        max_attempts: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            models,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Build a client from the environment, using the default model chain.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        if settings.ai_api_key.is_empty() {
            return Err(AppError::MissingCredentials("AI_API_KEY"));
        }
        Ok(Self::new(
            settings.ai_api_base.clone(),
            settings.ai_api_key.clone(),
            ai_settings::default_model_chain(),
            settings.ai_max_attempts,
            Duration::from_millis(settings.ai_backoff_ms),
        ))
    }

    /// Run the prompt through the fallback chain and return the first answer.
    pub async fn generate(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, AppError> {
        let messages = vec![
            msg(ChatCompletionMessageRole::System, system),
            msg(ChatCompletionMessageRole::User, user),
        ];
        let mut last_error = String::from("no models configured");
        for model in &self.models {
            for attempt in 0..self.max_attempts {
                match self.attempt(model, &messages, temperature).await {
                    Ok(answer) => {
                        debug!(model = %model, attempt, "model answered");
                        return Ok(answer);
                    }
                    Err(AttemptError::Transient(e)) => {
                        warn!(model = %model, attempt, error = %e, "transient gateway failure");
                        last_error = e;
                        if attempt + 1 < self.max_attempts {
                            time::sleep(self.base_delay * (1u32 << attempt.min(8))).await;
                        }
                    }
                    Err(AttemptError::Permanent(e)) => {
                        warn!(model = %model, error = %e, "model failed, falling through to next");
                        last_error = e;
                        break;
                    }
                }
            }
        }
        Err(AppError::Exhausted { last: last_error })
    }

    async fn attempt(
        &self,
        model: &str,
        messages: &[ChatCompletionMessage],
        temperature: f32,
    ) -> Result<String, AttemptError> {
        let req = ChatRequest {
            model,
            messages,
            temperature,
            modalities: None,
        };
        let res = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(format!("network error: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AttemptError::Transient(format!("network error: {e}")))?;
        debug!(%status, body_len = body.len(), "gateway response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(AttemptError::Transient(format!("gateway returned {status}")));
        }
        if !status.is_success() {
            return Err(AttemptError::Permanent(format!("gateway returned {status}")));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AttemptError::Permanent(format!("unreadable gateway response: {e}")))?;
        let text = value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AttemptError::Permanent(
                "no content in gateway response".into(),
            ));
        }
        Ok(text.to_string())
    }

    /// Request a generated image and return its data-URI payload.
    ///
    /// Single model, no fallback chain: hero images are best-effort and the
    /// caller degrades on any error.
    pub async fn generate_image(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let messages = vec![msg(ChatCompletionMessageRole::User, prompt)];
        let req = ChatRequest {
            model,
            messages: &messages,
            temperature: 0.7,
            modalities: Some(&["image", "text"]),
        };
        let res = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("image request failed: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "image model returned {}",
                res.status()
            )));
        }
        let value: Value = res
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("unreadable image response: {e}")))?;
        let data_uri = value
            .pointer("/choices/0/message/images/0/image_url/url")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .pointer("/choices/0/message/content")
                    .and_then(Value::as_str)
                    .filter(|s| s.starts_with("data:"))
            })
            .ok_or_else(|| {
                AppError::MalformedResponse("no image payload in model response".into())
            })?;
        Ok(data_uri.to_string())
    }
}
