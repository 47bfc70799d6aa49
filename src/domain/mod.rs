// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod media;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Media Domain
pub use media::{validate_media_title, CastMember, CrossReferenceFacts, MediaKind, MediaTitle};

// Resolution Domain
pub use resolution::{
    AttemptOutcome, AttemptPhase, CandidateAttempt, FetchedArticle, ResolutionConfidence,
    ResolutionReport, ResolvedMatch, ValidationResult,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of input invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
