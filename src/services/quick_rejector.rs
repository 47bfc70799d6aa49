// src/services/quick_rejector.rs
//
// Cheap lexical filter run on every fetched article before scoring.

use regex::Regex;
use std::sync::LazyLock;

/// Only the opening of the extract is inspected
pub const REJECTION_WINDOW: usize = 300;

/// "is a <thing that is not a film or TV show>" phrases
const NON_MEDIA_PHRASES: &[&str] = &[
    // Geography
    "is a city",
    "is a town",
    "is a village",
    "is a municipality",
    "is a commune",
    "is a county",
    "is a country",
    "is a province",
    "is a region",
    "is a river",
    "is a lake",
    "is a mountain",
    "is an island",
    "is a neighbourhood",
    "is a neighborhood",
    "is the capital",
    // Biology
    "is a species",
    "is a genus",
    "is a family of",
    "is a plant",
    "is a flowering plant",
    "is a bird",
    "is a mammal",
    "is an insect",
    // People
    "is a politician",
    "is a footballer",
    "is a singer",
    "is a rapper",
    "is a musician",
    "is a businessman",
    "is a novelist",
    "is a poet",
    "is a painter",
    "is an athlete",
    // Organizations
    "is a company",
    "is a corporation",
    "is an organization",
    "is a political party",
    "is a university",
    // Music
    "is a song",
    "is a single by",
    "is an album",
    "is a studio album",
    "is a band",
    "is a rock band",
    // Books and games
    "is a novel",
    "is a book",
    "is a video game",
    "is a board game",
    // Vehicles
    "is an automobile",
    "is a ship",
    "is an aircraft",
    // Food
    "is a dish",
    "is a beverage",
    "is a cocktail",
    // Military
    "is a battle",
    "is a military unit",
    "is a military operation",
    "is a regiment",
];

/// Plain substring alternation: "is a novel" also catches "is a novella"
static NON_MEDIA_RE: LazyLock<Regex> = LazyLock::new(|| {
    let phrases: Vec<String> = NON_MEDIA_PHRASES.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!("(?:{})", phrases.join("|"))).unwrap()
});

/// True when the extract is empty or plainly describes something other than
/// a film or TV show.
pub fn is_obviously_wrong(extract: &str) -> bool {
    if extract.trim().is_empty() {
        return true;
    }
    let opening: String = extract
        .chars()
        .take(REJECTION_WINDOW)
        .collect::<String>()
        .to_lowercase();
    NON_MEDIA_RE.is_match(&opening)
}

/// The phrase that triggered a rejection, for diagnostics
pub fn rejection_phrase(extract: &str) -> Option<&'static str> {
    let opening = extract
        .chars()
        .take(REJECTION_WINDOW)
        .collect::<String>()
        .to_lowercase();
    let found = NON_MEDIA_RE.find(&opening)?;
    NON_MEDIA_PHRASES
        .iter()
        .find(|p| **p == found.as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_is_rejected() {
        assert!(is_obviously_wrong("Paris is a city in France."));
        assert_eq!(rejection_phrase("Paris is a city in France."), Some("is a city"));
    }

    #[test]
    fn test_empty_extract_is_rejected() {
        assert!(is_obviously_wrong(""));
        assert!(is_obviously_wrong("   "));
    }

    #[test]
    fn test_off_domain_articles_are_rejected() {
        assert!(is_obviously_wrong("Heat is a band from Sweden formed in 1998."));
        assert!(is_obviously_wrong("Dallas is a city in the U.S. state of Texas."));
        assert!(is_obviously_wrong("Crash is a song by the Primitives."));
        assert!(is_obviously_wrong("The Lion is a species of big cat."));
    }

    #[test]
    fn test_media_articles_pass() {
        assert!(!is_obviously_wrong(
            "Heat is a 1995 American crime film written and directed by Michael Mann."
        ));
        assert!(!is_obviously_wrong(
            "Dallas is an American prime time television soap opera that aired on CBS."
        ));
        assert!(!is_obviously_wrong("Cars is a 2006 American computer-animated sports comedy film."));
        assert!(!is_obviously_wrong(
            "Community is a single-camera sitcom television series created by Dan Harmon."
        ));
        assert!(!is_obviously_wrong("Band of Brothers is a 2001 war drama miniseries."));
    }

    #[test]
    fn test_phrase_matches_as_substring() {
        assert!(is_obviously_wrong("Heat is a novella by Arthur Smith."));
        assert_eq!(
            rejection_phrase("Heat is a novella by Arthur Smith."),
            Some("is a novel")
        );
        assert!(is_obviously_wrong("Pride is a citywide festival held every June."));
        assert!(is_obviously_wrong("Count Basie is a bandleader from New Jersey."));
    }

    #[test]
    fn test_only_opening_is_inspected() {
        let mut extract = "Fargo is a 1996 crime film. ".to_string();
        extract.push_str(&"x".repeat(REJECTION_WINDOW));
        extract.push_str(" Fargo is a city in North Dakota.");
        assert!(!is_obviously_wrong(&extract));
    }
}
