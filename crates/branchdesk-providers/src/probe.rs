//! Model-name fallback probing.
//!
//! Hosted model names rotate: a configured name can 404 overnight. Instead
//! of failing the chat, the client probes its candidate list with a tiny
//! generation call, caches the first name that answers, and as a last
//! resort asks `ListModels` for anything that supports `generateContent`.

use branchdesk_core::error::{BranchdeskError, Result};
use serde_json::Value;

use crate::gemini::GeminiClient;

/// Prompt used to cheaply verify that a model actually answers.
const PROBE_PROMPT: &str = "ping";

impl GeminiClient {
    /// Resolve the model to use, probing on first call and caching after.
    pub(crate) async fn resolve_model(&self) -> Result<String> {
        if let Some(model) = self.resolved.read().await.clone() {
            return Ok(model);
        }

        let mut guard = self.resolved.write().await;
        // Another caller may have finished probing while we waited.
        if let Some(model) = guard.clone() {
            return Ok(model);
        }

        for candidate in &self.candidates {
            match self.generate_with_model(candidate, PROBE_PROMPT).await {
                Ok(_) => {
                    tracing::info!("✅ Generation model resolved: '{}'", candidate);
                    *guard = Some(candidate.clone());
                    return Ok(candidate.clone());
                }
                Err(e) => {
                    tracing::debug!("Model probe '{}' failed: {e}", candidate);
                }
            }
        }

        // Every candidate refused — ask the API what it actually serves.
        let models = self.list_generation_models().await?;
        if let Some(model) = models.into_iter().next() {
            tracing::info!("✅ Generation model resolved via ListModels: '{}'", model);
            *guard = Some(model.clone());
            return Ok(model);
        }

        Err(BranchdeskError::ModelUnavailable(
            "no model supporting generateContent found".into(),
        ))
    }

    /// Forget the cached model so the next call re-probes.
    pub(crate) async fn invalidate_model(&self) {
        *self.resolved.write().await = None;
    }

    /// List model ids that support `generateContent`.
    pub(crate) async fn list_generation_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BranchdeskError::Http(format!("gemini connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BranchdeskError::Provider(format!(
                "gemini ListModels error {status}: {text}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| BranchdeskError::Http(e.to_string()))?;
        Ok(generation_model_ids(&body))
    }
}

/// Extract generation-capable model ids from a `ListModels` response.
fn generation_model_ids(body: &Value) -> Vec<String> {
    let Some(models) = body["models"].as_array() else {
        return Vec::new();
    };
    models
        .iter()
        .filter(|m| {
            m["supportedGenerationMethods"]
                .as_array()
                .is_some_and(|methods| methods.iter().any(|v| v == "generateContent"))
        })
        .filter_map(|m| m["name"].as_str())
        .map(|name| name.strip_prefix("models/").unwrap_or(name).to_string())
        .collect()
}
