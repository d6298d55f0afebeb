/// Endpoints and timing constants shared by every surface of the extension
use crate::error::ConfigError;
use url::Url;

pub const DEFAULT_REDIRECT_BASE: &str = "https://app.tawhid.in/go/";
pub const DEFAULT_API_BASE: &str = "https://app.tawhid.in/go/api/";
pub const RECENT_KEY_LIMIT: usize = 6;
pub const SEARCH_DEBOUNCE_MS: u32 = 250;
pub const FORM_CLOSE_DELAY_MS: u32 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct GoConfig {
    /// Prefix that a percent-encoded key is appended to for redirects
    pub redirect_base: String,
    /// Collection endpoint of the link management API
    pub api_base: String,
    pub recent_limit: usize,
    pub search_debounce_ms: u32,
    pub form_close_delay_ms: u32,
}

impl GoConfig {
    /// Build a config pointing at another deployment of the link service.
    ///
    /// Both bases must be absolute http(s) URLs. A trailing slash is added
    /// when missing so keys can be appended directly.
    pub fn with_bases(redirect_base: &str, api_base: &str) -> Result<GoConfig, ConfigError> {
        Ok(GoConfig {
            redirect_base: normalize_base(redirect_base)?,
            api_base: normalize_base(api_base)?,
            ..GoConfig::default()
        })
    }
}

impl Default for GoConfig {
    fn default() -> Self {
        GoConfig {
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            recent_limit: RECENT_KEY_LIMIT,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            form_close_delay_ms: FORM_CLOSE_DELAY_MS,
        }
    }
}

fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    let mut base = parsed.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = GoConfig::default();
        assert_eq!(config.redirect_base, "https://app.tawhid.in/go/");
        assert_eq!(config.api_base, "https://app.tawhid.in/go/api/");
        assert_eq!(config.recent_limit, 6);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.form_close_delay_ms, 400);
    }

    #[test]
    fn test_with_bases_appends_slash() {
        let config = GoConfig::with_bases("https://go.example.com/go", "https://go.example.com/api/")
            .unwrap();
        assert_eq!(config.redirect_base, "https://go.example.com/go/");
        assert_eq!(config.api_base, "https://go.example.com/api/");
    }

    #[test]
    fn test_with_bases_rejects_garbage() {
        assert!(matches!(
            GoConfig::with_bases("not a url", DEFAULT_API_BASE),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            GoConfig::with_bases("ftp://example.com/", DEFAULT_API_BASE),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }
}
