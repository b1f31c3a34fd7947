//! Configuration for the extractor

use std::time::Duration;

/// Default user agent presented on fetches.
///
/// A realistic browser identification string, so pages that serve
/// bot-blocked or degraded content to unknown clients are not
/// misrepresented in the summary.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Default fetch timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for the extractor
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// User agent presented on fetches
    pub user_agent: String,

    /// Fetch timeout in seconds
    pub timeout_secs: u64,

    /// Maximum paragraphs retained in a summary
    pub max_paragraphs: usize,
}

impl ExtractorConfig {
    /// Get the fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_paragraphs == 0 {
            return Err("max_paragraphs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_paragraphs: pagelens_domain::content::MAX_PARAGRAPHS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_paragraphs, 10);
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = ExtractorConfig::default();
        config.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ExtractorConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
