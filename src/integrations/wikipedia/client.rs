// src/integrations/wikipedia/client.rs
//
// Wikipedia API Integration
//
// ARCHITECTURE:
// - REST summary endpoint for the first paragraph + canonical URL
// - Action API (query) for full plain-text content
// - Action API (opensearch) for the search fallback
// - Every request acquires the injected rate limiter first
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE: returns FetchedArticle values, never decides
//   whether an article is the right one
// - 404 on the summary is "no such article" (Ok(None)), not an error
// - Content and search failures are swallowed; only the summary call
//   can surface an error

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::rate_limiter::RateLimiter;
use super::retry::RetryPolicy;
use crate::config::WikipediaConfig;
use crate::domain::FetchedArticle;
use crate::error::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Root used to rebuild an article URL when the summary carries none
pub const WIKI_PAGE_ROOT: &str = "https://en.wikipedia.org/wiki/";

/// Maximum number of titles taken from an opensearch response
pub const SEARCH_LIMIT: usize = 5;

/// The fetch boundary the resolver drives, one candidate at a time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch a candidate article. `Ok(None)` when it does not exist.
    async fn fetch_article(&self, title: &str) -> AppResult<Option<FetchedArticle>>;

    /// Up to five candidate titles for a free-text query; empty on failure.
    async fn search(&self, query: &str) -> Vec<String>;
}

// ============================================================================
// WIRE FORMATS
// ============================================================================

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(rename = "type", default)]
    page_type: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: HashMap<String, QueryPage>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    extract: Option<String>,
    missing: Option<serde_json::Value>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Wikipedia API Client
pub struct WikipediaClient {
    base_url: String,
    search_url: String,
    http_client: Client,
    rate_limiter: Arc<dyn RateLimiter>,
    retry: RetryPolicy,
}

impl WikipediaClient {
    /// Create a client from configuration and a shared rate limiter
    pub fn new(config: &WikipediaConfig, rate_limiter: Arc<dyn RateLimiter>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.clone(),
            http_client,
            rate_limiter,
            retry: RetryPolicy::new(config.max_retries, config.retry_base_delay),
        })
    }

    /// Summary + best-effort full content for one candidate title.
    pub async fn fetch_article(&self, title: &str) -> AppResult<Option<FetchedArticle>> {
        let summary = match self.retry.run(|| self.fetch_summary(title)).await? {
            Some(summary) => summary,
            None => return Ok(None),
        };

        if summary.page_type.as_deref() == Some("disambiguation") {
            log::debug!("Skipping disambiguation page '{}'", summary.title);
            return Ok(None);
        }

        let content = self.fetch_content(&summary.title).await;

        let url = summary
            .content_urls
            .and_then(|urls| urls.desktop)
            .and_then(|desktop| desktop.page)
            .filter(|page| !page.is_empty())
            .unwrap_or_else(|| page_url(title));

        Ok(Some(FetchedArticle::new(
            summary.title,
            summary.extract,
            content,
            url,
        )))
    }

    /// Full plain-text article body, or None on any failure.
    pub async fn fetch_content(&self, title: &str) -> Option<String> {
        match self.query_extract(title).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Content fetch failed for '{}': {}", title, e);
                None
            }
        }
    }

    /// Opensearch titles for a query, or an empty list on any failure.
    pub async fn search(&self, query: &str) -> Vec<String> {
        match self.opensearch(query).await {
            Ok(titles) => titles,
            Err(e) => {
                log::warn!("Wikipedia search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Re-fetch content for an article URL recorded by an earlier resolution.
    pub async fn fetch_content_for_url(&self, stored_url: &str) -> Option<String> {
        let title = match title_from_wiki_url(stored_url) {
            Some(title) => title,
            None => {
                log::warn!("Cannot derive article title from URL '{}'", stored_url);
                return None;
            }
        };
        self.fetch_content(&title).await
    }

    // ========================================================================
    // INTERNAL: Requests
    // ========================================================================

    async fn fetch_summary(&self, title: &str) -> AppResult<Option<SummaryResponse>> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/page/summary/{}", self.base_url, encode_title(title));
        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus { status, url });
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn query_extract(&self, title: &str) -> AppResult<Option<String>> {
        self.rate_limiter.acquire().await;

        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("action", "query"),
                ("titles", title),
                ("prop", "extracts"),
                ("explaintext", "true"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                status,
                url: self.search_url.clone(),
            });
        }

        let body: QueryResponse = serde_json::from_str(&response.text().await?)?;
        let page = body
            .query
            .and_then(|q| q.pages.into_values().next());

        Ok(match page {
            Some(page) if page.missing.is_none() => {
                page.extract.filter(|text| !text.trim().is_empty())
            }
            _ => None,
        })
    }

    async fn opensearch(&self, query: &str) -> AppResult<Vec<String>> {
        self.rate_limiter.acquire().await;

        let limit = SEARCH_LIMIT.to_string();
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                status,
                url: self.search_url.clone(),
            });
        }

        // [query, titles[], descriptions[], urls[]]
        let body: serde_json::Value = serde_json::from_str(&response.text().await?)?;
        let titles = body
            .get(1)
            .and_then(|v| v.as_array())
            .ok_or_else(|| AppError::Other("Malformed opensearch response".to_string()))?;

        Ok(titles
            .iter()
            .filter_map(|t| t.as_str())
            .map(str::to_string)
            .take(SEARCH_LIMIT)
            .collect())
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn fetch_article(&self, title: &str) -> AppResult<Option<FetchedArticle>> {
        WikipediaClient::fetch_article(self, title).await
    }

    async fn search(&self, query: &str) -> Vec<String> {
        WikipediaClient::search(self, query).await
    }
}

/// Re-fetch article content from a stored canonical URL, with a client built
/// from `config` that shares the caller's rate limiter.
pub async fn fetch_wikipedia_content(
    config: &WikipediaConfig,
    stored_url: &str,
    rate_limiter: Arc<dyn RateLimiter>,
) -> Option<String> {
    let client = match WikipediaClient::new(config, rate_limiter) {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Failed to build Wikipedia client: {}", e);
            return None;
        }
    };
    client.fetch_content_for_url(stored_url).await
}

// ============================================================================
// URL HELPERS
// ============================================================================

/// Wikipedia path segment for a title: spaces become underscores, the rest
/// is percent-encoded.
pub fn encode_title(title: &str) -> String {
    urlencoding::encode(&title.trim().replace(' ', "_")).into_owned()
}

/// Canonical desktop URL rebuilt from a title
pub fn page_url(title: &str) -> String {
    format!("{}{}", WIKI_PAGE_ROOT, encode_title(title))
}

/// `https://en.wikipedia.org/wiki/Title_With_Underscores` → "Title With Underscores"
pub fn title_from_wiki_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/wiki/")?;
    let raw = rest.split(['#', '?']).next().unwrap_or_default();
    let decoded = urlencoding::decode(raw).ok()?;
    let title = decoded.replace('_', " ").trim().to_string();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
