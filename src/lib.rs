// src/lib.rs
// wiki-resolver - Wikipedia article resolution for a movie/TV catalog
//
// Architecture:
// - Domain-centric: titles, facts and match results live in `domain`
// - Explicit: a missing article is a None outcome, never an error
// - Sequential: one candidate fetch at a time, under a shared rate limit
// - Integrations behind traits: the resolver only sees `ArticleSource`

pub mod config;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_media_title,
    AttemptOutcome,
    AttemptPhase,
    CandidateAttempt,
    // Media
    CastMember,
    CrossReferenceFacts,
    DomainError,
    // Resolution
    FetchedArticle,
    MediaKind,
    MediaTitle,
    ResolutionConfidence,
    ResolutionReport,
    ResolvedMatch,
    ValidationResult,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::WikipediaConfig;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Title normalization
    generate_title_patterns,
    generate_title_patterns_extended,
    // Quick rejection
    is_obviously_wrong,
    normalize_title,
    // Validation
    validate_article,
    ArticleValidator,
    // Orchestration
    ResolutionService,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    fetch_wikipedia_content, title_from_wiki_url, ArticleSource, IntervalRateLimiter, RateLimiter,
    RetryPolicy, WikipediaClient,
};
