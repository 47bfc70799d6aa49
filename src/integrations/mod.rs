// src/integrations/mod.rs
//
// External Integrations Module

pub mod wikipedia;

pub use wikipedia::{
    fetch_wikipedia_content, title_from_wiki_url, ArticleSource, IntervalRateLimiter, RateLimiter,
    RetryPolicy, WikipediaClient,
};
