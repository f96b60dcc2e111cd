//! Gemini `generateContent` client.

use async_trait::async_trait;
use branchdesk_core::config::LlmConfig;
use branchdesk_core::error::{BranchdeskError, Result};
use branchdesk_core::traits::Generator;
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// Client for the Google Generative Language API.
pub struct GeminiClient {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    /// Model names to probe, in preference order.
    pub(crate) candidates: Vec<String>,
    /// Model that last answered successfully; probed lazily.
    pub(crate) resolved: RwLock<Option<String>>,
    pub(crate) client: reqwest::Client,
}

impl GeminiClient {
    /// Create from configuration.
    ///
    /// Resolution order for the API key: `config.llm.api_key` >
    /// `GEMINI_API_KEY` > `GOOGLE_API_KEY` > empty (rejected on first call).
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .unwrap_or_default()
        };

        let base_url = if config.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com/v1beta".to_string()
        } else {
            config.endpoint.trim_end_matches('/').to_string()
        };

        if config.model_candidates.is_empty() {
            return Err(BranchdeskError::Config(
                "llm.model_candidates must name at least one model".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BranchdeskError::Http(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url,
            candidates: config.model_candidates.clone(),
            resolved: RwLock::new(None),
            client,
        })
    }

    /// One `generateContent` round trip against a specific model.
    pub(crate) async fn generate_with_model(&self, model: &str, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(BranchdeskError::Config(
                "No Gemini API key configured (llm.api_key / GEMINI_API_KEY)".into(),
            ));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BranchdeskError::Http(format!("gemini connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| BranchdeskError::Http(e.to_string()))?;
        Ok(extract_text(&body))
    }
}

/// Classify a non-success `generateContent` response.
fn map_api_error(status: u16, body: &str) -> BranchdeskError {
    let detail = format!("gemini API error {status}: {body}");
    if status == 429 || body.contains("RESOURCE_EXHAUSTED") || body.to_lowercase().contains("quota")
    {
        BranchdeskError::RateLimited(detail)
    } else if status == 404 || body.contains("NOT_FOUND") {
        BranchdeskError::ModelUnavailable(detail)
    } else {
        BranchdeskError::Provider(detail)
    }
}

/// Pull the generated text out of a `generateContent` response.
fn extract_text(body: &Value) -> String {
    body["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl Generator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let model = self.resolve_model().await?;
        match self.generate_with_model(&model, prompt).await {
            Err(e @ BranchdeskError::ModelUnavailable(_)) => {
                // The cached model disappeared from the API — probe again once.
                tracing::warn!("⚠️ Model '{}' no longer served: {e}", model);
                self.invalidate_model().await;
                let retry = self.resolve_model().await?;
                self.generate_with_model(&retry, prompt).await
            }
            other => other,
        }
    }
}
