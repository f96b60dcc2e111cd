//! # Branchdesk Knowledge
//!
//! The spreadsheet collaborator: reads guideline Q/A rows and the employee
//! roster from a Google Sheets document over the values REST API.
//!
//! ## Design
//! - **Header-keyed rows** — the first sheet row names the columns; data
//!   rows become typed records at this boundary, never dynamic maps inside
//!   the core
//! - **Empty on failure** — an unreachable or malformed sheet degrades to
//!   "no knowledge", which the response policy answers with its refusal
//!   message instead of an error
//! - **TTL read cache** — repeated chats within the window reuse the last
//!   fetched rows instead of hammering the API

pub mod records;
pub mod roster;
pub mod sheets;

pub use sheets::SheetsClient;
