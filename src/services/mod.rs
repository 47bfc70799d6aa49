// src/services/mod.rs
//
// Services Module - Resolution Pipeline
//
//   title_normalizer → candidates
//   quick_rejector   → cheap lexical veto
//   article_validator → weighted confidence
//   resolution_service → orchestration

pub mod article_validator;
pub mod quick_rejector;
pub mod resolution_service;
pub mod title_normalizer;

#[cfg(test)]
mod resolution_service_tests;

pub use article_validator::{
    validate_article, ArticleValidator, SignalWeights, SIGNAL_WEIGHTS, TV_DIRECTOR_CREDIT,
};

pub use quick_rejector::{is_obviously_wrong, rejection_phrase};

pub use resolution_service::ResolutionService;

pub use title_normalizer::{
    generate_title_patterns, generate_title_patterns_extended, normalize_title,
    normalize_title_with, strip_disambiguators, title_similarity, titles_match, NormalizeOptions,
    TITLE_MATCH_THRESHOLD,
};
