pub mod client;
pub mod rate_limiter;
pub mod retry;

pub use client::{
    fetch_wikipedia_content, page_url, title_from_wiki_url, ArticleSource, WikipediaClient,
};
pub use rate_limiter::{IntervalRateLimiter, RateLimiter};
pub use retry::RetryPolicy;
