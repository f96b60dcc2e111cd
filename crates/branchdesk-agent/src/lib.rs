//! # Branchdesk Agent
//! The assistant engine — wires the record source, the lexical matcher, and
//! the generation provider behind a single ask-and-answer surface.
//!
//! ## Features:
//! - **Three-way response policy**: refuse on weak matches, answer strong
//!   matches from the stored record, escalate the band in between
//! - **Grounded escalation**: only the top-ranked records travel to the
//!   generation provider, never the whole sheet
//! - **Total answers**: every fault on the escalation path is converted to
//!   a user-readable message — `ask` cannot fail
//! - **Roster login**: employee-id lookup against the roster sheet

pub mod policy;
pub mod prompt;

use std::sync::Arc;

use branchdesk_core::config::BranchdeskConfig;
use branchdesk_core::error::Result;
use branchdesk_core::traits::{Generator, KnowledgeSource};
use branchdesk_core::types::{Employee, ScoredCandidate};

/// The Branchdesk assistant.
pub struct Assistant {
    config: BranchdeskConfig,
    source: Arc<dyn KnowledgeSource>,
    generator: Box<dyn Generator>,
}

impl Assistant {
    /// Create an assistant from configuration.
    pub fn new(config: BranchdeskConfig) -> Result<Self> {
        let generator = branchdesk_providers::create_generator(&config)?;
        let source = Arc::new(branchdesk_knowledge::SheetsClient::new(&config.sheets)?);
        Ok(Self {
            config,
            source,
            generator,
        })
    }

    /// Assemble from explicit collaborators (tests, alternative backends).
    pub fn with_collaborators(
        config: BranchdeskConfig,
        source: Arc<dyn KnowledgeSource>,
        generator: Box<dyn Generator>,
    ) -> Self {
        Self {
            config,
            source,
            generator,
        }
    }

    /// Answer one question for a logged-in user.
    ///
    /// Always returns displayable text; see [`policy::answer`].
    pub async fn ask(&self, query: &str, user_name: &str) -> String {
        let records = self.source.guidelines().await;
        policy::answer(
            query,
            &records,
            user_name,
            self.generator.as_ref(),
            &self.config,
        )
        .await
    }

    /// Ranked candidate preview, used by the UI for citation display.
    pub async fn search(&self, query: &str) -> Vec<ScoredCandidate> {
        let records = self.source.guidelines().await;
        branchdesk_match::rank(query, &records, self.config.retrieval.top_k)
    }

    /// Look up an employee id against the roster sheet.
    pub async fn login(&self, employee_id: &str) -> Option<Employee> {
        let roster = self.source.roster().await;
        branchdesk_knowledge::roster::find_employee(&roster, employee_id).cloned()
    }

    /// Generation provider name, for diagnostics.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn config(&self) -> &BranchdeskConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use branchdesk_core::types::KnowledgeRecord;

    struct FixedSource {
        records: Vec<KnowledgeRecord>,
        roster: Vec<Employee>,
    }

    #[async_trait]
    impl KnowledgeSource for FixedSource {
        async fn guidelines(&self) -> Vec<KnowledgeRecord> {
            self.records.clone()
        }

        async fn roster(&self) -> Vec<Employee> {
            self.roster.clone()
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, _prompt: &str) -> branchdesk_core::error::Result<String> {
            Ok("생성된 답변".into())
        }
    }

    fn assistant() -> Assistant {
        let source = FixedSource {
            records: vec![
                KnowledgeRecord::new("사고 접수 방법", "앱에서 접수"),
                KnowledgeRecord::new("연차 규정 안내", "규정 참고"),
            ],
            roster: vec![Employee {
                employee_id: "10234".into(),
                name: "김설계".into(),
            }],
        };
        Assistant::with_collaborators(
            BranchdeskConfig::default(),
            Arc::new(source),
            Box::new(EchoGenerator),
        )
    }

    #[tokio::test]
    async fn test_ask_strong_match_skips_generation() {
        let result = assistant().ask("사고 접수 방법", "김설계").await;
        assert!(result.contains("• 앱에서 접수"));
    }

    #[tokio::test]
    async fn test_ask_partial_match_uses_generator() {
        let result = assistant().ask("사고 나면 접수 어떻게", "김설계").await;
        assert_eq!(result, "생성된 답변");
    }

    #[tokio::test]
    async fn test_search_returns_ranked_candidates() {
        let candidates = assistant().search("사고 접수").await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].question, "사고 접수 방법");
        assert_eq!(candidates[0].display_row(), 2);
        assert!(candidates[0].score > candidates[1].score);
    }

    #[tokio::test]
    async fn test_login_matches_roster() {
        let a = assistant();
        assert_eq!(a.login("10234").await.unwrap().name, "김설계");
        assert!(a.login("99999").await.is_none());
    }
}
