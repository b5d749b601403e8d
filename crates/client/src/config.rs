/// Production backend, used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "https://back-end-vision.onrender.com/api";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the commerce backend, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolve from an explicit value, then `STOREFRONT_API_URL`, then the
    /// production default.
    pub fn from_env_or(base_url: Option<String>) -> Self {
        let url = base_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
        Self::new(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_value_wins_and_is_normalized() {
        let config = ClientConfig::from_env_or(Some("http://localhost:3000/api/".to_owned()));
        assert_eq!(config.base_url, "http://localhost:3000/api");
    }

    #[test]
    fn default_points_at_production() {
        assert_eq!(ClientConfig::default().base_url, DEFAULT_API_BASE);
    }
}
