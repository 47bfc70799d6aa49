use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A catalog record to be resolved against Wikipedia.
/// Built once by the caller and never mutated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTitle {
    /// Display title as stored in the catalog
    pub title: String,

    /// Release year (YYYY)
    pub year: String,

    /// Movie or TV
    pub kind: MediaKind,
}

/// Kind of catalog work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Label used in search queries ("film" / "TV series")
    pub fn search_label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "film",
            MediaKind::Tv => "TV series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" => Ok(MediaKind::Movie),
            "tv" | "series" => Ok(MediaKind::Tv),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown media kind '{}' (expected 'movie' or 'tv')",
                other
            ))),
        }
    }
}

impl MediaTitle {
    /// Create a validated media title
    pub fn new(title: impl Into<String>, year: impl Into<String>, kind: MediaKind) -> DomainResult<Self> {
        let media = Self {
            title: title.into().trim().to_string(),
            year: year.into().trim().to_string(),
            kind,
        };
        super::invariants::validate_media_title(&media)?;
        Ok(media)
    }
}

/// A billed cast member from the catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

impl CastMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Facts used to corroborate (never to search for) a candidate article.
///
/// Missing fields simply remove the corresponding scoring signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceFacts {
    pub director: Option<String>,

    /// Billing order; only the first `SCORED_CAST_LIMIT` entries count
    pub cast: Vec<CastMember>,
}

impl CrossReferenceFacts {
    pub const SCORED_CAST_LIMIT: usize = 5;

    pub fn new(director: Option<String>, cast: Vec<CastMember>) -> Self {
        Self { director, cast }
    }

    /// Director, if present and not blank
    pub fn director(&self) -> Option<&str> {
        self.director
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Top-billed cast names used for scoring
    pub fn scored_cast(&self) -> impl Iterator<Item = &str> {
        self.cast
            .iter()
            .take(Self::SCORED_CAST_LIMIT)
            .map(|c| c.name.trim())
            .filter(|n| !n.is_empty())
    }
}
