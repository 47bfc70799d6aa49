// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure, immutable data structures describing a Wikipedia resolution.
//
// CRITICAL INVARIANTS:
// - Everything here is created and consumed within a single resolution call
// - No I/O operations
// - ValidationResult::is_valid == (confidence >= minimum used to build it)
// - Confidence is clamped to [0.0, 1.0] and rounded to 2 decimals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// FETCHED ARTICLE
// ============================================================================

/// A Wikipedia article as returned by one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArticle {
    /// Canonical article title reported by Wikipedia
    pub title: String,

    /// First paragraph (summary extract)
    pub extract: String,

    /// Full plain text, or the extract when the full text was unavailable
    pub content: String,

    /// Canonical desktop URL
    pub url: String,
}

impl FetchedArticle {
    pub fn new(title: String, extract: String, content: Option<String>, url: String) -> Self {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| extract.clone());
        Self {
            title,
            extract,
            content,
            url,
        }
    }
}

// ============================================================================
// RESOLUTION CONFIDENCE
// ============================================================================

/// Confidence score for a candidate article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionConfidence {
    /// Score from 0.0 (no confidence) to 1.0, two decimals
    score: f64,
}

impl ResolutionConfidence {
    /// Default minimum confidence for an article to be accepted
    pub const THRESHOLD: f64 = 0.70;

    /// Creates a confidence score, clamped to [0.0, 1.0] and rounded to 2 decimals
    pub fn new(score: f64) -> Self {
        let clamped = score.clamp(0.0, 1.0);
        Self {
            score: (clamped * 100.0).round() / 100.0,
        }
    }

    /// Returns the raw score
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns true if confidence meets the given minimum
    pub fn meets(&self, minimum: f64) -> bool {
        self.score >= minimum
    }
}

impl PartialEq for ResolutionConfidence {
    fn eq(&self, other: &Self) -> bool {
        (self.score - other.score).abs() < 1e-9
    }
}

impl std::fmt::Display for ResolutionConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.score)
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Outcome of scoring one article against the expected facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub confidence: ResolutionConfidence,

    /// One human-readable entry per evaluated signal, pass or fail
    pub reasons: Vec<String>,
}

impl ValidationResult {
    /// Builds a result whose validity is derived from the confidence
    pub fn new(confidence: ResolutionConfidence, minimum: f64, reasons: Vec<String>) -> Self {
        Self {
            is_valid: confidence.meets(minimum),
            confidence,
            reasons,
        }
    }
}

// ============================================================================
// RESOLVED MATCH
// ============================================================================

/// The accepted article for a title. Its absence is a normal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    pub content: String,
    pub url: String,
    pub confidence: ResolutionConfidence,

    /// When this match was accepted
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedMatch {
    pub fn new(article: FetchedArticle, confidence: ResolutionConfidence) -> Self {
        Self {
            content: article.content,
            url: article.url,
            confidence,
            resolved_at: Utc::now(),
        }
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Which phase a candidate was tried in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    /// Generated title pattern
    Direct,

    /// Opensearch result
    Search,
}

impl std::fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptPhase::Direct => write!(f, "direct"),
            AttemptPhase::Search => write!(f, "search"),
        }
    }
}

/// What happened to a single candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Summary endpoint answered 404
    NotFound,

    /// Transport failure after retries; only this candidate is lost
    FetchFailed { error: String },

    /// Quick rejection of an off-domain article
    ObviouslyWrong { article_title: String },

    /// Validator scored below the minimum
    LowConfidence {
        article_title: String,
        confidence: ResolutionConfidence,
        reasons: Vec<String>,
    },

    /// Validator accepted the article; resolution stopped here
    Accepted {
        article_title: String,
        confidence: ResolutionConfidence,
    },
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::NotFound => write!(f, "not_found"),
            AttemptOutcome::FetchFailed { .. } => write!(f, "fetch_failed"),
            AttemptOutcome::ObviouslyWrong { .. } => write!(f, "obviously_wrong"),
            AttemptOutcome::LowConfidence { .. } => write!(f, "low_confidence"),
            AttemptOutcome::Accepted { .. } => write!(f, "accepted"),
        }
    }
}

/// One candidate tried during resolution, in attempt order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAttempt {
    pub candidate: String,
    pub phase: AttemptPhase,
    pub outcome: AttemptOutcome,
}

/// Full trace of a resolution: the match (if any) plus every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub outcome: Option<ResolvedMatch>,
    pub attempts: Vec<CandidateAttempt>,
}

impl ResolutionReport {
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Attempts that produced a rejection reason worth reading
    pub fn rejections(&self) -> impl Iterator<Item = &CandidateAttempt> {
        self.attempts.iter().filter(|a| {
            matches!(
                a.outcome,
                AttemptOutcome::ObviouslyWrong { .. } | AttemptOutcome::LowConfidence { .. }
            )
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
