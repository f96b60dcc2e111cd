//! Shared Branchdesk types.

use serde::{Deserialize, Serialize};

/// Rows before the first data row in the guideline sheet: one header row,
/// plus the shift from 0-based indices to the sheet's 1-based row numbers.
/// Citations shown to users reference sheet rows, not record indices.
const SHEET_ROW_OFFSET: usize = 2;

/// A question/answer pair sourced from the guideline sheet.
///
/// Read-only input to retrieval; never mutated or persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub question: String,
    pub answer: String,
}

impl KnowledgeRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// A record takes part in retrieval only when both sides carry text.
    pub fn is_eligible(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// A knowledge record scored against one query, tagged with its original
/// position in the fetched record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate {
    pub score: u32,
    pub index: usize,
    pub question: String,
    pub answer: String,
}

impl ScoredCandidate {
    /// Sheet row number used for citation display.
    pub fn display_row(&self) -> usize {
        self.index + SHEET_ROW_OFFSET
    }
}

/// A roster entry used for login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_eligibility() {
        assert!(KnowledgeRecord::new("사고 접수 방법", "앱에서 접수").is_eligible());
        assert!(!KnowledgeRecord::new("", "답변만 있음").is_eligible());
        assert!(!KnowledgeRecord::new("질문만 있음", "   ").is_eligible());
    }

    #[test]
    fn test_display_row_offset() {
        let candidate = ScoredCandidate {
            score: 3,
            index: 0,
            question: "q".into(),
            answer: "a".into(),
        };
        // First record sits on sheet row 2, right under the header.
        assert_eq!(candidate.display_row(), 2);
    }
}
