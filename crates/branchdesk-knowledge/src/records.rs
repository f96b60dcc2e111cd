//! Row-to-record mapping.
//!
//! Sheet rows arrive as header-keyed string maps; everything past this
//! module is a fixed typed shape. Missing cells default to empty strings,
//! values are trimmed, and roster entries without an id are dropped.

use std::collections::HashMap;

use branchdesk_core::types::{Employee, KnowledgeRecord};

/// Display name used when a roster row has an id but no name cell.
const FALLBACK_DISPLAY_NAME: &str = "사용자";

type Row = HashMap<String, String>;

fn cell(row: &Row, column: &str) -> String {
    row.get(column).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Map guideline rows to knowledge records.
///
/// Blank questions or answers are kept here — eligibility filtering belongs
/// to ranking, and keeping the rows preserves sheet-row numbering for
/// citations.
pub fn guideline_records(rows: &[Row], question_column: &str, answer_column: &str) -> Vec<KnowledgeRecord> {
    rows.iter()
        .map(|row| KnowledgeRecord::new(cell(row, question_column), cell(row, answer_column)))
        .collect()
}

/// Map roster rows to employees, dropping rows without an id.
pub fn roster_entries(rows: &[Row], id_column: &str, name_column: &str) -> Vec<Employee> {
    rows.iter()
        .filter_map(|row| {
            let employee_id = cell(row, id_column);
            if employee_id.is_empty() {
                return None;
            }
            let name = cell(row, name_column);
            Some(Employee {
                employee_id,
                name: if name.is_empty() {
                    FALLBACK_DISPLAY_NAME.to_string()
                } else {
                    name
                },
            })
        })
        .collect()
}
