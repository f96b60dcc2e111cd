//! # Branchdesk Match
//!
//! Deterministic lexical ranking of guideline records against a free-text
//! query — no model calls, no I/O, no state between calls.
//!
//! ## Design
//! - **Token overlap** — distinct shared tokens between query and question
//! - **Containment bonus** — whole-string substring checks on trimmed,
//!   lower-cased text (+3 query-in-question, +2 question-in-query)
//! - **Stable ordering** — score descending, original sheet order on ties
//!
//! The score doubles as the confidence signal for the response policy: a
//! strong match is answered from the stored record, a weak one is refused,
//! and the band in between is escalated to the generation provider with the
//! top-ranked records as grounding context.

pub mod rank;
pub mod text;

pub use rank::{rank, score};
pub use text::{fold, normalize};
