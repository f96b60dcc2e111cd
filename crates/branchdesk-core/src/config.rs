//! Branchdesk configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BranchdeskConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl BranchdeskConfig {
    /// Load config from the default path (~/.branchdesk/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::BranchdeskError::Config(format!("Failed to read config: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::BranchdeskError::Config(format!("Failed to parse config: {e}"))
        })?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::error::BranchdeskError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".branchdesk")
            .join("config.toml")
    }
}

/// Generation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    /// API key; falls back to GEMINI_API_KEY / GOOGLE_API_KEY env vars.
    #[serde(default)]
    pub api_key: String,
    /// Override for the provider base URL.
    #[serde(default)]
    pub endpoint: String,
    /// Model names probed in order until one answers.
    #[serde(default = "default_model_candidates")]
    pub model_candidates: Vec<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_llm_provider() -> String { "gemini".into() }
fn default_model_candidates() -> Vec<String> {
    vec![
        "gemini-1.5-flash",
        "gemini-1.5-flash-latest",
        "gemini-1.5-pro",
        "gemini-1.5-pro-latest",
        "gemini-pro",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_request_timeout() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            endpoint: String::new(),
            model_candidates: default_model_candidates(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Spreadsheet record-source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet document id (the long token in the sheet URL).
    #[serde(default)]
    pub spreadsheet_id: String,
    /// API key; falls back to SHEETS_API_KEY env var.
    #[serde(default)]
    pub api_key: String,
    /// Override for the Sheets API base URL.
    #[serde(default)]
    pub endpoint: String,
    /// Worksheet tab holding question/answer guideline rows.
    #[serde(default = "default_guideline_sheet")]
    pub guideline_sheet: String,
    /// Worksheet tab holding the employee roster.
    #[serde(default = "default_roster_sheet")]
    pub roster_sheet: String,
    #[serde(default = "default_question_column")]
    pub question_column: String,
    #[serde(default = "default_answer_column")]
    pub answer_column: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// How long fetched rows are reused before re-reading the sheet.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_guideline_sheet() -> String { "질의응답시트".into() }
fn default_roster_sheet() -> String { "사원명부".into() }
fn default_question_column() -> String { "질문".into() }
fn default_answer_column() -> String { "답변".into() }
fn default_id_column() -> String { "사번".into() }
fn default_name_column() -> String { "이름".into() }
fn default_cache_ttl() -> u64 { 60 }

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            guideline_sheet: default_guideline_sheet(),
            roster_sheet: default_roster_sheet(),
            question_column: default_question_column(),
            answer_column: default_answer_column(),
            id_column: default_id_column(),
            name_column: default_name_column(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Lexical retrieval thresholds.
///
/// `low_threshold` and `high_threshold` bound the escalation band: a top
/// score below LOW refuses, at or above HIGH answers from the stored record,
/// anything between goes to the generation provider with top-K context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u32,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_low_threshold() -> u32 { 1 }
fn default_high_threshold() -> u32 { 5 }
fn default_top_k() -> usize { 5 }

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            low_threshold: default_low_threshold(),
            high_threshold: default_high_threshold(),
            top_k: default_top_k(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }
fn default_session_ttl() -> u64 { 8 * 60 * 60 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

/// Assistant identity shown to users and embedded in generation prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,
    #[serde(default = "default_persona")]
    pub persona: String,
}

fn default_identity_name() -> String { "충호 Assistant".into() }
fn default_persona() -> String {
    "당신은 KB손해보험 충청호남본부의 '충호 Assistant'입니다. \
     설계사님들에게 친절하고 든든한 파트너가 되어주세요."
        .into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: default_identity_name(),
            persona: default_persona(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BranchdeskConfig::default();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model_candidates[0], "gemini-1.5-flash");
        assert_eq!(config.retrieval.low_threshold, 1);
        assert_eq!(config.retrieval.high_threshold, 5);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.sheets.guideline_sheet, "질의응답시트");
        assert_eq!(config.sheets.roster_sheet, "사원명부");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [llm]
            provider = "gemini"
            model_candidates = ["gemini-1.5-pro"]
            request_timeout_secs = 10

            [retrieval]
            low_threshold = 2
            high_threshold = 7
            top_k = 3

            [identity]
            name = "TestBot"
            persona = "A test assistant"
        "#;

        let config: BranchdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model_candidates, vec!["gemini-1.5-pro"]);
        assert_eq!(config.llm.request_timeout_secs, 10);
        assert_eq!(config.retrieval.low_threshold, 2);
        assert_eq!(config.retrieval.high_threshold, 7);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.identity.name, "TestBot");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let toml_str = "";
        let config: BranchdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.sheets.question_column, "질문");
        assert_eq!(config.llm.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_path() {
        let path = BranchdeskConfig::default_path();
        assert!(path.to_string_lossy().contains("branchdesk"));
    }
}
