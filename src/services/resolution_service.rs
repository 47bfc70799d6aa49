// src/services/resolution_service.rs
//
// Resolution Service
//
// Finds the single Wikipedia article for a catalog title, or none.
//
//   Idle → TryDirect(i) → Resolved
//                       ↘ TrySearch(j) → Resolved | Exhausted
//
// CRITICAL RULES:
// - Candidates are tried one at a time, in generated order
// - First valid candidate wins; later candidates are never fetched
// - A failed fetch loses that candidate only, never the resolution
// - "No article" is returned as None, never as an error

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::WikipediaConfig;
use crate::domain::{
    AttemptOutcome, AttemptPhase, CandidateAttempt, CrossReferenceFacts, MediaKind, MediaTitle,
    ResolutionReport, ResolvedMatch,
};
use crate::integrations::ArticleSource;
use crate::services::article_validator::ArticleValidator;
use crate::services::quick_rejector::{is_obviously_wrong, rejection_phrase};
use crate::services::title_normalizer::{
    generate_title_patterns, generate_title_patterns_extended,
};

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    source: Arc<dyn ArticleSource>,
    validator: ArticleValidator,
    extended_patterns: bool,
}

impl ResolutionService {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            source,
            validator: ArticleValidator::default(),
            extended_patterns: false,
        }
    }

    pub fn from_config(source: Arc<dyn ArticleSource>, config: &WikipediaConfig) -> Self {
        Self {
            source,
            validator: ArticleValidator::new(config.min_confidence),
            extended_patterns: config.extended_patterns,
        }
    }

    /// Resolve a title to its accepted article, or None.
    pub async fn fetch_for_title(
        &self,
        title: &str,
        year: &str,
        kind: MediaKind,
        facts: &CrossReferenceFacts,
    ) -> Option<ResolvedMatch> {
        let media = MediaTitle {
            title: title.trim().to_string(),
            year: year.trim().to_string(),
            kind,
        };
        self.resolve(&media, facts).await.outcome
    }

    /// Resolve a title and keep the trace of every candidate tried.
    pub async fn resolve(&self, media: &MediaTitle, facts: &CrossReferenceFacts) -> ResolutionReport {
        let mut attempts = Vec::new();
        let mut attempted: HashSet<String> = HashSet::new();

        // Phase 1: generated patterns
        let candidates = self.candidate_patterns(&media.title, &media.year, media.kind);
        for candidate in &candidates {
            attempted.insert(candidate.to_lowercase());
            if let Some(matched) = self
                .try_candidate(candidate, AttemptPhase::Direct, media, facts, &mut attempts)
                .await
            {
                return Self::resolved(media, matched, attempts);
            }
        }

        // Phase 2: opensearch fallback
        let query = format!("{} {} {}", media.title, media.year, media.kind.search_label());
        let results = self.source.search(&query).await;
        log::debug!(
            "No direct match for '{}' ({}), search '{}' returned {} results",
            media.title,
            media.year,
            query,
            results.len()
        );

        for candidate in results {
            if !attempted.insert(candidate.to_lowercase()) {
                continue;
            }
            if let Some(matched) = self
                .try_candidate(&candidate, AttemptPhase::Search, media, facts, &mut attempts)
                .await
            {
                return Self::resolved(media, matched, attempts);
            }
        }

        log::info!(
            "No Wikipedia article for '{}' ({}, {}) after {} candidates",
            media.title,
            media.year,
            media.kind,
            attempts.len()
        );
        ResolutionReport {
            outcome: None,
            attempts,
        }
    }

    /// Resolve titles one after another
    pub async fn resolve_many(
        &self,
        items: &[(MediaTitle, CrossReferenceFacts)],
    ) -> Vec<(MediaTitle, Option<ResolvedMatch>)> {
        let mut results = Vec::with_capacity(items.len());
        let mut resolved_count = 0;

        for (media, facts) in items {
            let report = self.resolve(media, facts).await;
            if report.is_resolved() {
                resolved_count += 1;
            }
            results.push((media.clone(), report.outcome));
        }

        log::info!(
            "Resolved {}/{} titles to Wikipedia articles",
            resolved_count,
            items.len()
        );
        results
    }

    /// Candidate titles in attempt order
    pub fn candidate_patterns(&self, title: &str, year: &str, kind: MediaKind) -> Vec<String> {
        if self.extended_patterns {
            generate_title_patterns_extended(title, year, kind)
        } else {
            generate_title_patterns(title, year, kind)
        }
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    /// fetch → quick reject → validate, for one candidate
    async fn try_candidate(
        &self,
        candidate: &str,
        phase: AttemptPhase,
        media: &MediaTitle,
        facts: &CrossReferenceFacts,
        attempts: &mut Vec<CandidateAttempt>,
    ) -> Option<ResolvedMatch> {
        let mut record = |outcome: AttemptOutcome| {
            attempts.push(CandidateAttempt {
                candidate: candidate.to_string(),
                phase,
                outcome,
            });
        };

        let article = match self.source.fetch_article(candidate).await {
            Ok(Some(article)) => article,
            Ok(None) => {
                log::debug!("[{}] '{}': no such article", phase, candidate);
                record(AttemptOutcome::NotFound);
                return None;
            }
            Err(e) => {
                log::warn!("[{}] '{}': fetch failed, skipping candidate: {}", phase, candidate, e);
                record(AttemptOutcome::FetchFailed {
                    error: e.to_string(),
                });
                return None;
            }
        };

        if is_obviously_wrong(&article.extract) {
            log::debug!(
                "[{}] '{}': rejected '{}' ({})",
                phase,
                candidate,
                article.title,
                rejection_phrase(&article.extract).unwrap_or("empty extract")
            );
            record(AttemptOutcome::ObviouslyWrong {
                article_title: article.title,
            });
            return None;
        }

        let validation = self
            .validator
            .validate(&article, &media.title, &media.year, media.kind, facts);

        if !validation.is_valid {
            log::debug!(
                "[{}] '{}': confidence {} below {:.2}: {}",
                phase,
                candidate,
                validation.confidence,
                self.validator.min_confidence(),
                validation.reasons.join("; ")
            );
            record(AttemptOutcome::LowConfidence {
                article_title: article.title,
                confidence: validation.confidence,
                reasons: validation.reasons,
            });
            return None;
        }

        record(AttemptOutcome::Accepted {
            article_title: article.title.clone(),
            confidence: validation.confidence,
        });
        Some(ResolvedMatch::new(article, validation.confidence))
    }

    fn resolved(
        media: &MediaTitle,
        matched: ResolvedMatch,
        attempts: Vec<CandidateAttempt>,
    ) -> ResolutionReport {
        log::info!(
            "Resolved '{}' ({}) to {} with confidence {} after {} candidates",
            media.title,
            media.year,
            matched.url,
            matched.confidence,
            attempts.len()
        );
        ResolutionReport {
            outcome: Some(matched),
            attempts,
        }
    }
}
