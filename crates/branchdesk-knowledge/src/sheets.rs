//! Google Sheets values-API client.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use branchdesk_core::config::SheetsConfig;
use branchdesk_core::error::{BranchdeskError, Result};
use branchdesk_core::traits::KnowledgeSource;
use branchdesk_core::types::{Employee, KnowledgeRecord};
use serde_json::Value;

use crate::records;

type Row = HashMap<String, String>;

struct CachedRows {
    fetched_at: Instant,
    rows: Vec<Row>,
}

/// Read-only client for one spreadsheet document.
pub struct SheetsClient {
    spreadsheet_id: String,
    api_key: String,
    base_url: String,
    config: SheetsConfig,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, CachedRows>>,
    client: reqwest::Client,
}

impl SheetsClient {
    /// Create from configuration.
    ///
    /// Resolution order for the API key: `config.sheets.api_key` >
    /// `SHEETS_API_KEY` > `GOOGLE_API_KEY` > empty.
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        if config.spreadsheet_id.is_empty() {
            return Err(BranchdeskError::Config(
                "sheets.spreadsheet_id is not set".into(),
            ));
        }

        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("SHEETS_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .unwrap_or_default()
        };

        let base_url = if config.endpoint.is_empty() {
            "https://sheets.googleapis.com/v4".to_string()
        } else {
            config.endpoint.trim_end_matches('/').to_string()
        };

        Ok(Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key,
            base_url,
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            config: config.clone(),
            cache: Mutex::new(HashMap::new()),
            client: reqwest::Client::new(),
        })
    }

    fn values_url(&self, sheet_name: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| BranchdeskError::Config(format!("Invalid sheets endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| BranchdeskError::Config("Invalid sheets endpoint".into()))?
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", sheet_name]);
        if !self.api_key.is_empty() {
            url.query_pairs_mut().append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Fetch one worksheet as header-keyed rows, through the TTL cache.
    pub async fn fetch_rows(&self, sheet_name: &str) -> Result<Vec<Row>> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(sheet_name)
                && cached.fetched_at.elapsed() < self.cache_ttl
            {
                return Ok(cached.rows.clone());
            }
        }

        let url = self.values_url(sheet_name)?;
        let resp = self.client.get(url).send().await.map_err(|e| {
            BranchdeskError::Http(format!("sheets connection failed ({sheet_name}): {e}"))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BranchdeskError::Sheet(format!(
                "sheets API error {status} on '{sheet_name}': {text}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| BranchdeskError::Http(e.to_string()))?;
        let rows = parse_rows(&body);

        let mut cache = self.cache.lock().unwrap();
        cache.insert(
            sheet_name.to_string(),
            CachedRows {
                fetched_at: Instant::now(),
                rows: rows.clone(),
            },
        );
        Ok(rows)
    }

    /// Fetch a sheet, degrading to an empty row set on any failure.
    async fn fetch_rows_or_empty(&self, sheet_name: &str) -> Vec<Row> {
        match self.fetch_rows(sheet_name).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("⚠️ Sheet '{}' unavailable: {e}", sheet_name);
                Vec::new()
            }
        }
    }
}

/// Decode a values-API response into header-keyed rows.
///
/// The first row is the header; data rows shorter than the header get empty
/// strings for the missing trailing cells. Non-string cells (the API can
/// hand back bare numbers) are rendered as their plain text.
fn parse_rows(body: &Value) -> Vec<Row> {
    let Some(values) = body["values"].as_array() else {
        return Vec::new();
    };
    let Some((header_row, data_rows)) = values.split_first() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row
        .as_array()
        .map(|cells| cells.iter().map(cell_text).collect())
        .unwrap_or_default();
    if headers.is_empty() {
        return Vec::new();
    }

    data_rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .as_array()
                .map(|c| c.iter().map(cell_text).collect())
                .unwrap_or_default();
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), cells.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl KnowledgeSource for SheetsClient {
    async fn guidelines(&self) -> Vec<KnowledgeRecord> {
        let rows = self.fetch_rows_or_empty(&self.config.guideline_sheet).await;
        records::guideline_records(
            &rows,
            &self.config.question_column,
            &self.config.answer_column,
        )
    }

    async fn roster(&self) -> Vec<Employee> {
        let rows = self.fetch_rows_or_empty(&self.config.roster_sheet).await;
        records::roster_entries(&rows, &self.config.id_column, &self.config.name_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rows_header_keyed() {
        let body = json!({
            "range": "질의응답시트!A1:B3",
            "values": [
                ["질문", "답변"],
                ["사고 접수 방법", "앱에서 접수"],
                ["연차 규정"],
            ]
        });
        let rows = parse_rows(&body);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["질문"], "사고 접수 방법");
        assert_eq!(rows[0]["답변"], "앱에서 접수");
        // Short row: missing trailing cell defaults to empty.
        assert_eq!(rows[1]["답변"], "");
    }

    #[test]
    fn test_parse_rows_numeric_cells() {
        let body = json!({
            "values": [
                ["사번", "이름"],
                [10234, "김설계"],
            ]
        });
        let rows = parse_rows(&body);
        assert_eq!(rows[0]["사번"], "10234");
    }

    #[test]
    fn test_parse_rows_empty_or_malformed() {
        assert!(parse_rows(&json!({})).is_empty());
        assert!(parse_rows(&json!({"values": []})).is_empty());
        assert!(parse_rows(&json!({"values": [["질문", "답변"]]})).is_empty());
    }

    #[test]
    fn test_new_requires_spreadsheet_id() {
        let config = SheetsConfig::default();
        assert!(SheetsClient::new(&config).is_err());
    }

    #[test]
    fn test_values_url_encodes_sheet_name() {
        let config = SheetsConfig {
            spreadsheet_id: "doc123".into(),
            api_key: "k".into(),
            ..SheetsConfig::default()
        };
        let client = SheetsClient::new(&config).unwrap();
        let url = client.values_url("질의응답시트").unwrap();
        let rendered = url.as_str();
        assert!(rendered.starts_with("https://sheets.googleapis.com/v4/spreadsheets/doc123/values/"));
        // Hangul tab names must be percent-encoded in the path.
        assert!(!rendered.contains('질'));
        assert!(rendered.contains("key=k"));
    }
}
