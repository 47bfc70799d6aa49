// src/main.rs
//
// wiki-resolver <title> <year> <movie|tv> [director] [cast...]
// wiki-resolver --content <wikipedia url>

use std::sync::Arc;

use anyhow::{bail, Context};

use wiki_resolver::{
    fetch_wikipedia_content, CastMember, CrossReferenceFacts, IntervalRateLimiter, MediaKind,
    MediaTitle, RateLimiter, ResolutionService, WikipediaClient, WikipediaConfig,
};

const USAGE: &str = "usage: wiki-resolver <title> <year> <movie|tv> [director] [cast...]\n       wiki-resolver --content <wikipedia url>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WikipediaConfig::from_env().context("Invalid WIKI_* configuration")?;

    let mut clog = colog::default_builder();
    clog.filter(None, config.log_level);
    clog.init();

    config.log_summary();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. INFRASTRUCTURE
    let rate_limiter: Arc<dyn RateLimiter> =
        Arc::new(IntervalRateLimiter::new(config.min_request_interval));

    // Refresh mode: re-read the full text behind a stored URL
    if args.first().map(String::as_str) == Some("--content") {
        let Some(url) = args.get(1) else {
            bail!(USAGE);
        };
        match fetch_wikipedia_content(&config, url, rate_limiter).await {
            Some(content) => println!("{}", content),
            None => bail!("No content available for {}", url),
        }
        return Ok(());
    }

    let client = WikipediaClient::new(&config, rate_limiter)?;

    let (media, facts) = parse_request(&args)?;

    // 2. SERVICES
    let service = ResolutionService::from_config(Arc::new(client), &config);

    // 3. RESOLVE
    let report = service.resolve(&media, &facts).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_resolved() {
        log::warn!("No article accepted for '{}' ({})", media.title, media.year);
    }

    Ok(())
}

fn parse_request(args: &[String]) -> anyhow::Result<(MediaTitle, CrossReferenceFacts)> {
    let [title, year, kind, rest @ ..] = args else {
        bail!(USAGE);
    };

    let kind: MediaKind = kind.parse()?;
    let media = MediaTitle::new(title.as_str(), year.as_str(), kind)?;

    let director = rest.first().filter(|d| !d.trim().is_empty()).cloned();
    let cast = rest
        .iter()
        .skip(1)
        .map(|name| CastMember::new(name.as_str()))
        .collect();

    Ok((media, CrossReferenceFacts::new(director, cast)))
}
