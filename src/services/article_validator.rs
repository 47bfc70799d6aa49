// src/services/article_validator.rs
//
// Article Validator
//
// Scores a fetched article against what the catalog already knows about the
// title. Five independent signals each award a fixed weight; the sum is the
// confidence.
//
// CRITICAL RULES:
// - Deterministic: same article + facts → same result
// - Every evaluated signal leaves a reason, pass or fail
// - A missing fact removes its signal; it never fails validation by itself

use crate::domain::{
    CrossReferenceFacts, FetchedArticle, MediaKind, ResolutionConfidence, ValidationResult,
};
use crate::services::title_normalizer::titles_match;

// ============================================================================
// WEIGHT TABLE
// ============================================================================

/// Hand-tuned signal weights; keep in sync with the tests below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    pub title: f64,
    pub media_type: f64,
    pub year: f64,
    pub director: f64,
    pub cast: f64,
}

pub const SIGNAL_WEIGHTS: SignalWeights = SignalWeights {
    title: 0.30,
    media_type: 0.25,
    year: 0.15,
    director: 0.15,
    cast: 0.15,
};

/// Flat director credit for TV, which has no single reliable director
pub const TV_DIRECTOR_CREDIT: f64 = 0.075;

/// Leading slice of the extract searched for media-type terms
pub const MEDIA_TYPE_WINDOW: usize = 500;

const FILM_TERMS: &[&str] = &[
    "film",
    "movie",
    "directed by",
    "starring",
    "screenplay",
    "motion picture",
    "box office",
    "documentary",
];

const TV_TERMS: &[&str] = &[
    "television series",
    "tv series",
    "television show",
    "television program",
    "television programme",
    "sitcom",
    "miniseries",
    "mini-series",
    "created by",
    "drama series",
    "comedy series",
    "anthology series",
    "animated series",
    "web series",
    "soap opera",
    "episodes",
];

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct ArticleValidator {
    weights: SignalWeights,
    min_confidence: f64,
}

impl Default for ArticleValidator {
    fn default() -> Self {
        Self::new(ResolutionConfidence::THRESHOLD)
    }
}

impl ArticleValidator {
    pub fn new(min_confidence: f64) -> Self {
        Self {
            weights: SIGNAL_WEIGHTS,
            min_confidence,
        }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Score `article` as the Wikipedia page for `expected_title`.
    pub fn validate(
        &self,
        article: &FetchedArticle,
        expected_title: &str,
        year: &str,
        kind: MediaKind,
        facts: &CrossReferenceFacts,
    ) -> ValidationResult {
        let content = article.content.to_lowercase();
        let mut score = 0.0;
        let mut reasons = Vec::with_capacity(5);

        // 1. Title
        if titles_match(&article.title, expected_title) {
            score += self.weights.title;
            reasons.push(format!(
                "Title match: '{}' ~ '{}'",
                article.title, expected_title
            ));
        } else {
            reasons.push(format!(
                "Title mismatch: '{}' vs '{}'",
                article.title, expected_title
            ));
        }

        // 2. Media type
        match find_media_term(&article.extract, kind) {
            Some(term) => {
                score += self.weights.media_type;
                reasons.push(format!("Media type: extract mentions '{}'", term));
            }
            None => reasons.push(format!("Media type: no {} terms in extract", kind)),
        }

        // 3. Year
        match find_year(&content, year) {
            Some(found) => {
                score += self.weights.year;
                reasons.push(format!("Year: content mentions {}", found));
            }
            None => reasons.push(format!("Year: {} (±1) not mentioned", year)),
        }

        // 4. Director
        match kind {
            MediaKind::Tv => {
                score += TV_DIRECTOR_CREDIT;
                reasons.push("Director: flat partial credit for TV".to_string());
            }
            MediaKind::Movie => match facts.director() {
                Some(director) => {
                    if director_mentioned(&content, director) {
                        score += self.weights.director;
                        reasons.push(format!("Director: '{}' mentioned", director));
                    } else {
                        reasons.push(format!("Director: '{}' not mentioned", director));
                    }
                }
                None => reasons.push("Director: no director supplied".to_string()),
            },
        }

        // 5. Cast (skipped entirely without cast data)
        let cast: Vec<&str> = facts.scored_cast().collect();
        if cast.is_empty() {
            reasons.push("Cast: no cast supplied, signal skipped".to_string());
        } else {
            let hits = cast
                .iter()
                .filter(|name| content.contains(&name.to_lowercase()))
                .count();
            match hits {
                0 => reasons.push(format!("Cast: none of {} names mentioned", cast.len())),
                1 => {
                    score += self.weights.cast / 2.0;
                    reasons.push(format!("Cast: 1 of {} names mentioned", cast.len()));
                }
                n => {
                    score += self.weights.cast;
                    reasons.push(format!("Cast: {} of {} names mentioned", n, cast.len()));
                }
            }
        }

        ValidationResult::new(ResolutionConfidence::new(score), self.min_confidence, reasons)
    }
}

/// Score with the default weights and threshold
pub fn validate_article(
    article: &FetchedArticle,
    expected_title: &str,
    year: &str,
    kind: MediaKind,
    facts: &CrossReferenceFacts,
) -> ValidationResult {
    ArticleValidator::default().validate(article, expected_title, year, kind, facts)
}

fn find_media_term(extract: &str, kind: MediaKind) -> Option<&'static str> {
    let opening = extract
        .chars()
        .take(MEDIA_TYPE_WINDOW)
        .collect::<String>()
        .to_lowercase();
    let terms = match kind {
        MediaKind::Movie => FILM_TERMS,
        MediaKind::Tv => TV_TERMS,
    };
    terms.iter().find(|term| opening.contains(*term)).copied()
}

/// The year itself, or its neighbours to absorb regional release skew
fn find_year(content: &str, year: &str) -> Option<String> {
    let year = year.trim();
    if year.is_empty() {
        return None;
    }
    if content.contains(year) {
        return Some(year.to_string());
    }
    let n: i32 = year.parse().ok()?;
    [n.checked_sub(1), n.checked_add(1)]
        .into_iter()
        .flatten()
        .map(|y| y.to_string())
        .find(|y| content.contains(y.as_str()))
}

fn director_mentioned(content: &str, director: &str) -> bool {
    let director = director.to_lowercase();
    if content.contains(&director) {
        return true;
    }
    director
        .split_whitespace()
        .last()
        .filter(|last| last.chars().count() > 3)
        .is_some_and(|last| content.contains(last))
}

// ============================================================================
// TESTS
// ============================================================================
