// src/config/mod.rs
//
// Resolver configuration, loaded from the environment (and `.env`).

use std::time::Duration;

use crate::domain::ResolutionConfidence;
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1";
pub const DEFAULT_SEARCH_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str =
    "wiki-resolver/0.1 (catalog enrichment; https://github.com/catalog-enrichment/wiki-resolver)";

/// Settings for the Wikipedia client and resolver.
#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    /// REST API root (summary endpoint lives under `/page/summary/`)
    pub base_url: String,

    /// Action API endpoint (query + opensearch)
    pub search_url: String,

    /// Wikimedia policy requires a descriptive agent on every request
    pub user_agent: String,

    pub request_timeout: Duration,

    /// Minimum spacing between two outbound requests
    pub min_request_interval: Duration,

    /// Extra attempts for the summary call after the first one
    pub max_retries: u32,
    pub retry_base_delay: Duration,

    /// Minimum confidence for an article to be accepted
    pub min_confidence: f64,

    /// Also try Australian/Canadian/animated TV disambiguators
    pub extended_patterns: bool,

    pub log_level: log::LevelFilter,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            min_request_interval: Duration::from_millis(100),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
            min_confidence: ResolutionConfidence::THRESHOLD,
            extended_patterns: false,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl WikipediaConfig {
    /// Load configuration from `WIKI_*` environment variables.
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(v) = env_var("WIKI_BASE_URL") {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = env_var("WIKI_SEARCH_URL") {
            config.search_url = v;
        }
        if let Some(v) = env_var("WIKI_USER_AGENT") {
            config.user_agent = v;
        }
        if let Some(v) = env_var("WIKI_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(v.parse::<u64>()?);
        }
        if let Some(v) = env_var("WIKI_MIN_INTERVAL_MS") {
            config.min_request_interval = Duration::from_millis(v.parse::<u64>()?);
        }
        if let Some(v) = env_var("WIKI_MAX_RETRIES") {
            config.max_retries = v.parse::<u32>()?;
        }
        if let Some(v) = env_var("WIKI_MIN_CONFIDENCE") {
            config.min_confidence = v.parse::<f64>()?;
        }
        if let Some(v) = env_var("WIKI_EXTENDED_PATTERNS") {
            config.extended_patterns = parse_bool(&v)?;
        }
        if let Some(v) = env_var("WIKI_LOG_LEVEL") {
            config.log_level = v
                .parse()
                .map_err(|_| AppError::Config(format!("Unknown log level '{}'", v)))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.user_agent.trim().is_empty() {
            return Err(AppError::Config(
                "User agent must not be empty (Wikimedia API policy)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AppError::Config(format!(
                "Minimum confidence {} is outside [0, 1]",
                self.min_confidence
            )));
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!("Config loaded:");
        log::info!("  WIKI_BASE_URL: {}", self.base_url);
        log::info!("  WIKI_SEARCH_URL: {}", self.search_url);
        log::info!("  WIKI_MIN_INTERVAL_MS: {}", self.min_request_interval.as_millis());
        log::info!("  WIKI_MAX_RETRIES: {}", self.max_retries);
        log::info!("  WIKI_MIN_CONFIDENCE: {:.2}", self.min_confidence);
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("Expected a boolean, got '{}'", other))),
    }
}
