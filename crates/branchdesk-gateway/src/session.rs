//! In-memory login sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use branchdesk_core::types::Employee;
use chrono::{DateTime, Duration, Utc};

/// A logged-in employee.
#[derive(Debug, Clone)]
pub struct Session {
    pub employee_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Token → session map with TTL expiry.
///
/// Expired entries are purged lazily on access; nothing is persisted.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Open a session for an employee, returning the bearer token.
    pub fn create(&self, employee: &Employee) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let session = Session {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().insert(token.clone(), session);
        token
    }

    /// Look up a token, dropping it if the TTL has passed.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.inner.lock().unwrap();
        match sessions.get(token) {
            Some(session) if Utc::now() - session.created_at < self.ttl => Some(session.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Close a session. Returns whether the token was live.
    pub fn remove(&self, token: &str) -> bool {
        self.inner.lock().unwrap().remove(token).is_some()
    }

    /// Number of unexpired sessions.
    pub fn active_count(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.lock().unwrap();
        sessions.retain(|_, s| now - s.created_at < self.ttl);
        sessions.len()
    }
}
