//! # Branchdesk Gateway
//!
//! HTTP API in front of the assistant: employee login against the roster
//! sheet, token-gated chat and citation search, health/info endpoints.
//! Sessions are in-memory tokens with a TTL — chat rendering and transcript
//! state stay on the client.

pub mod routes;
pub mod server;
pub mod session;

pub use server::start;
pub use session::{Session, SessionStore};
