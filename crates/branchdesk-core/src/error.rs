//! Branchdesk error taxonomy.

/// Convenience result alias used across all Branchdesk crates.
pub type Result<T> = std::result::Result<T, BranchdeskError>;

/// All errors produced by Branchdesk components.
#[derive(Debug, thiserror::Error)]
pub enum BranchdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    /// Generic provider-side failure (bad request, server error, decode).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider signaled rate-limiting or quota exhaustion.
    #[error("Provider rate-limited: {0}")]
    RateLimited(String),

    /// No generation-capable model could be resolved.
    #[error("No usable model: {0}")]
    ModelUnavailable(String),

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BranchdeskError {
    /// Whether this failure is a quota/rate-limit condition.
    ///
    /// Matches the dedicated variant plus recognizable markers in wrapped
    /// provider messages ("429", "quota", "RESOURCE_EXHAUSTED"), since some
    /// transports only surface those as text.
    pub fn is_rate_limit(&self) -> bool {
        if matches!(self, BranchdeskError::RateLimited(_)) {
            return true;
        }
        let msg = self.to_string().to_lowercase();
        msg.contains("429") || msg.contains("quota") || msg.contains("resource_exhausted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_variant_is_rate_limit() {
        let err = BranchdeskError::RateLimited("slow down".into());
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_status_code_marker_is_rate_limit() {
        let err = BranchdeskError::Provider("gemini API error 429: too many requests".into());
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_quota_marker_is_rate_limit() {
        let err = BranchdeskError::Provider("RESOURCE_EXHAUSTED: daily quota exceeded".into());
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_plain_provider_error_is_not_rate_limit() {
        let err = BranchdeskError::Provider("gemini API error 500: internal".into());
        assert!(!err.is_rate_limit());
        assert!(!BranchdeskError::Timeout(30).is_rate_limit());
    }
}
