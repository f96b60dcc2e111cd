//! Roster lookup for login.

use branchdesk_core::types::Employee;

/// Find the roster entry whose id equals the entered one.
///
/// Ids are compared as trimmed strings — the sheet may format them as
/// numbers, the login form always sends text.
pub fn find_employee<'a>(roster: &'a [Employee], employee_id: &str) -> Option<&'a Employee> {
    let wanted = employee_id.trim();
    if wanted.is_empty() {
        return None;
    }
    roster.iter().find(|e| e.employee_id == wanted)
}
