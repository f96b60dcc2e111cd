//! # Branchdesk Providers
//!
//! Text-generation provider implementations. The only wired provider is the
//! Gemini `generateContent` API; model names are not trusted blindly — the
//! client probes a candidate list and falls back to `ListModels` when every
//! candidate is rejected (hosted model names rotate faster than configs do).

pub mod gemini;
pub mod probe;

use branchdesk_core::config::BranchdeskConfig;
use branchdesk_core::error::{BranchdeskError, Result};
use branchdesk_core::traits::Generator;

pub use gemini::GeminiClient;

/// Create a generator from configuration.
pub fn create_generator(config: &BranchdeskConfig) -> Result<Box<dyn Generator>> {
    match config.llm.provider.as_str() {
        "gemini" | "google" => Ok(Box::new(gemini::GeminiClient::new(&config.llm)?)),
        other => Err(BranchdeskError::Config(format!(
            "Unknown generation provider '{other}'"
        ))),
    }
}
