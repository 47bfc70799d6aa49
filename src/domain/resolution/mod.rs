// src/domain/resolution/mod.rs
//
// Resolution Domain
//
// Value objects describing the outcome of matching a catalog title to a
// Wikipedia article.
//
// CRITICAL RULES:
// - All types are pure value objects (immutable)
// - No I/O, no logging

pub mod value_objects;

pub use value_objects::{
    AttemptOutcome,
    AttemptPhase,
    CandidateAttempt,
    FetchedArticle,
    ResolutionConfidence,
    ResolutionReport,
    ResolvedMatch,
    ValidationResult,
};
