/// Application configuration module
use reqwest::Url;
use std::env;

/// Page-size ceiling of the launch API.
pub const API_MAX_RESULTS: usize = 50;

const DEFAULT_API_URL: &str = "https://lldev.thespacedevs.com/2.2.0/";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: Url,
    pub bind_addr: String,
    pub http: HttpSettings,
}

#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub max_results: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_results: API_MAX_RESULTS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("LAUNCH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = parse_base_url(&api_url)?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let http = HttpSettings {
            timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 30),
            max_results: clamp_max_results(env_u64("SEARCH_MAX_RESULTS", API_MAX_RESULTS as u64)),
        };

        Ok(Self {
            api_url,
            bind_addr,
            http,
        })
    }
}

/// Parse the API base URL, making sure relative joins stay under its path.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| anyhow::anyhow!("invalid LAUNCH_API_URL {:?}: {}", raw, e))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("LAUNCH_API_URL {:?} cannot be used as a base URL", raw);
    }
    Ok(url)
}

fn clamp_max_results(n: u64) -> usize {
    usize::try_from(n)
        .unwrap_or(API_MAX_RESULTS)
        .clamp(1, API_MAX_RESULTS)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://example.test/2.2.0").unwrap();
        assert_eq!(url.as_str(), "https://example.test/2.2.0/");
        assert_eq!(
            url.join("launch/").unwrap().as_str(),
            "https://example.test/2.2.0/launch/"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.test").is_err());
    }

    #[test]
    fn test_max_results_never_exceeds_page_ceiling() {
        assert_eq!(clamp_max_results(500), API_MAX_RESULTS);
        assert_eq!(clamp_max_results(0), 1);
        assert_eq!(clamp_max_results(10), 10);
        assert_eq!(clamp_max_results(u64::MAX), API_MAX_RESULTS);
        assert_eq!(clamp_max_results((1u64 << 32) + 3), API_MAX_RESULTS);
    }
}
