//! Collaborator traits.
//!
//! The assistant core talks to two external services, both injected behind
//! trait objects so the response policy can be tested without network access.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Employee, KnowledgeRecord};

/// A text-generation provider.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Provider name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Generate a completion for a fully assembled prompt.
    ///
    /// A single network round trip; callers impose their own timeout.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// The spreadsheet-backed record source.
///
/// Fetch failures are absorbed here: both methods return an empty list when
/// the backing sheet is unreachable, so callers treat "no rows" and "fetch
/// failed" identically as an empty knowledge base.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// All guideline question/answer records, in sheet order.
    async fn guidelines(&self) -> Vec<KnowledgeRecord>;

    /// All roster entries, in sheet order.
    async fn roster(&self) -> Vec<Employee>;
}
