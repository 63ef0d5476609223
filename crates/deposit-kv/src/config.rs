//! # KV Configuration
//!
//! Credentials for the KV REST API. Both values are optional as a pair:
//! if either is missing, caching is disabled.

pub const ENV_KV_REST_API_URL: &str = "KV_REST_API_URL";
pub const ENV_KV_REST_API_TOKEN: &str = "KV_REST_API_TOKEN";

/// KV REST API configuration
#[derive(Clone)]
pub struct KvConfig {
    /// Base URL without trailing slash
    pub rest_url: String,

    /// Bearer token
    pub token: String,
}

impl KvConfig {
    /// Load from `KV_REST_API_URL` / `KV_REST_API_TOKEN`, `None` when either is unset
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Some(Self::new(read(ENV_KV_REST_API_URL)?, read(ENV_KV_REST_API_TOKEN)?))
    }

    pub fn new(rest_url: impl Into<String>, token: impl Into<String>) -> Self {
        let rest_url: String = rest_url.into();
        Self {
            rest_url: rest_url.trim().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `SET` endpoint for a key
    pub fn set_url(&self, key: &str) -> String {
        format!("{}/set/{}", self.rest_url, key)
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for KvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvConfig")
            .field("rest_url", &self.rest_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_and_auth() {
        let config = KvConfig::new("https://kv.example/", "tok");
        assert_eq!(config.set_url("invoice:h1"), "https://kv.example/set/invoice:h1");
        assert_eq!(config.auth_header(), "Bearer tok");
    }

    #[test]
    fn test_partial_config_disables_cache() {
        let only_url = |key: &str| (key == ENV_KV_REST_API_URL).then(|| "https://kv".to_string());
        assert!(KvConfig::from_lookup(only_url).is_none());

        let both = |key: &str| match key {
            ENV_KV_REST_API_URL => Some("https://kv".to_string()),
            ENV_KV_REST_API_TOKEN => Some("tok".to_string()),
            _ => None,
        };
        assert!(KvConfig::from_lookup(both).is_some());
    }
}
