// src/services/title_normalizer.rs
//
// Title Normalizer
//
// Canonicalizes titles for comparison and generates the ordered list of
// Wikipedia candidate titles for a catalog record.
//
// CRITICAL RULES:
// - Pure functions, no I/O
// - normalize_title is idempotent
// - generate_title_patterns order IS the attempt priority; the resolver
//   stops at the first accepted candidate

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::domain::MediaKind;

// ============================================================================
// FIXED TABLES
// ============================================================================

/// Abbreviations expanded before comparison (matched with a trailing dot)
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("vol", "volume"),
    ("pt", "part"),
    ("dr", "doctor"),
    ("st", "saint"),
    ("bros", "brothers"),
    ("mr", "mister"),
    ("mrs", "missus"),
    ("jr", "junior"),
    ("sr", "senior"),
    ("vs", "versus"),
    ("mt", "mount"),
    ("ft", "fort"),
    ("no", "number"),
    ("ep", "episode"),
];

/// I–XX, longest first
const ROMAN_NUMERALS: &[(&str, u32)] = &[
    ("xviii", 18),
    ("xvii", 17),
    ("xiii", 13),
    ("viii", 8),
    ("xvi", 16),
    ("xiv", 14),
    ("xix", 19),
    ("xii", 12),
    ("vii", 7),
    ("iii", 3),
    ("xx", 20),
    ("xv", 15),
    ("xi", 11),
    ("ix", 9),
    ("vi", 6),
    ("iv", 4),
    ("ii", 2),
    ("x", 10),
    ("v", 5),
    ("i", 1),
];

const CARDINALS: &[(&str, &str)] = &[
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
    ("thirteen", "13"),
    ("fourteen", "14"),
    ("fifteen", "15"),
    ("sixteen", "16"),
    ("seventeen", "17"),
    ("eighteen", "18"),
    ("nineteen", "19"),
    ("twenty", "20"),
];

const ORDINALS: &[(&str, &str)] = &[
    ("first", "1st"),
    ("second", "2nd"),
    ("third", "3rd"),
    ("fourth", "4th"),
    ("fifth", "5th"),
    ("sixth", "6th"),
    ("seventh", "7th"),
    ("eighth", "8th"),
    ("ninth", "9th"),
    ("tenth", "10th"),
    ("eleventh", "11th"),
    ("twelfth", "12th"),
    ("thirteenth", "13th"),
    ("fourteenth", "14th"),
    ("fifteenth", "15th"),
    ("sixteenth", "16th"),
    ("seventeenth", "17th"),
    ("eighteenth", "18th"),
    ("nineteenth", "19th"),
    ("twentieth", "20th"),
];

/// Parenthetical suffixes Wikipedia uses to tell same-titled articles apart
const DISAMBIGUATORS: &[&str] = &[
    "film",
    "movie",
    "tv series",
    "television series",
    "tv program",
    "tv programme",
    "tv film",
    "television film",
    "tv movie",
    "miniseries",
    "tv miniseries",
    "animated series",
    "web series",
    "series",
    "documentary",
];

/// Tried for TV titles, in priority order, after the year-specific form
const TV_DISAMBIGUATORS: &[&str] = &[
    "TV series",
    "miniseries",
    "American TV series",
    "British TV series",
];

const TV_DISAMBIGUATORS_EXTENDED: &[&str] = &[
    "Australian TV series",
    "Canadian TV series",
    "animated series",
    "American animated series",
];

/// Characters kept by the candidate cleaner besides letters, digits and spaces
const PATTERN_PUNCTUATION: &[char] = &[':', '\'', ',', '!', '?', '&', '.', '-'];

// ============================================================================
// COMPILED PATTERNS
// ============================================================================

static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<&str> = ABBREVIATIONS.iter().map(|(abbr, _)| *abbr).collect();
    Regex::new(&format!(r"(?i)\b({})\.", alternatives.join("|"))).unwrap()
});

static ROMAN_LOWER_RE: LazyLock<Regex> = LazyLock::new(|| roman_regex(false));

static ROMAN_UPPER_RE: LazyLock<Regex> = LazyLock::new(|| roman_regex(true));

static NUMBER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = ORDINALS
        .iter()
        .chain(CARDINALS.iter())
        .map(|(word, _)| *word)
        .collect();
    Regex::new(&format!(r"\b({})\b", words.join("|"))).unwrap()
});

static DISAMBIGUATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let kinds: Vec<String> = DISAMBIGUATORS.iter().map(|d| regex::escape(d)).collect();
    Regex::new(&format!(
        r"(?i)\s*\((?:\d{{4}}\s+)?(?:(?:american|british|australian|canadian|japanese)\s+)?(?:{})\)\s*$|\s*\(\d{{4}}\)\s*$",
        kinds.join("|")
    ))
    .unwrap()
});

static LEADING_ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:the|a|an)\s+").unwrap());

static TRAILING_ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(?:the|a|an)$").unwrap());

fn roman_regex(uppercase: bool) -> Regex {
    let numerals: Vec<String> = ROMAN_NUMERALS
        .iter()
        .map(|(n, _)| if uppercase { n.to_uppercase() } else { n.to_string() })
        .collect();
    // The follower is captured because the regex crate has no lookahead
    Regex::new(&format!(r"\b({})(\s|$|:|-|\))", numerals.join("|"))).unwrap()
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Toggles for the optional normalization steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub remove_article: bool,
    pub convert_roman: bool,
    pub convert_numbers: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_article: true,
            convert_roman: true,
            convert_numbers: true,
        }
    }
}

/// Canonical comparison form of a title, with all options enabled
pub fn normalize_title(title: &str) -> String {
    normalize_title_with(title, NormalizeOptions::default())
}

/// Canonical comparison form of a title.
///
/// Runs the fixed pipeline until the output stops changing, so a later step
/// exposing input for an earlier one (e.g. a numeral left bare by a stripped
/// suffix) still ends in a fixed point.
pub fn normalize_title_with(title: &str, options: NormalizeOptions) -> String {
    // Every step only shortens the text or rewrites a token into a form no
    // step matches again, so this terminates.
    let mut current = normalize_pass(title, options);
    loop {
        let next = normalize_pass(&current, options);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(title: &str, options: NormalizeOptions) -> String {
    let mut text = fold_characters(&title.trim().to_lowercase());
    text = text.replace('&', " and ");
    text = expand_abbreviations(&text, false);
    if options.convert_roman {
        text = convert_roman_numerals(&text, false);
    }
    if options.convert_numbers {
        text = convert_number_words(&text);
    }
    text = collapse_whitespace(&text);
    text = strip_suffixes(&text, options.remove_article);
    collapse_whitespace(&text)
}

/// Alternates disambiguator and article stripping until neither applies,
/// so "heat (film), the (film)" peels completely in one pass.
fn strip_suffixes(text: &str, remove_article: bool) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = strip_disambiguators(&current);
        if remove_article {
            next = strip_articles(&next);
        }
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Smart punctuation and Latin diacritics to ASCII (expects lowercase input)
fn fold_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' | '`' | '\u{00B4}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => {
                out.push('-')
            }
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'æ' => out.push_str("ae"),
            'ç' | 'ć' | 'č' => out.push('c'),
            'ď' | 'đ' => out.push('d'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'ğ' => out.push('g'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => out.push('i'),
            'ł' => out.push('l'),
            'ñ' | 'ń' | 'ň' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => out.push('o'),
            'œ' => out.push_str("oe"),
            'ř' => out.push('r'),
            'ś' | 'š' | 'ş' => out.push('s'),
            'ß' => out.push_str("ss"),
            'ť' | 'ţ' => out.push('t'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ź' | 'ż' | 'ž' => out.push('z'),
            other => out.push(other),
        }
    }
    out
}

/// `vol.` → `volume` etc. With `preserve_case`, a capitalized abbreviation
/// yields a capitalized expansion.
fn expand_abbreviations(text: &str, preserve_case: bool) -> String {
    ABBREVIATION_RE
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[1];
            let expansion = ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| abbr.eq_ignore_ascii_case(matched))
                .map(|(_, exp)| *exp)
                .unwrap_or(matched);

            let mut replacement = if preserve_case && starts_uppercase(matched) {
                capitalize(expansion)
            } else {
                expansion.to_string()
            };

            let end = caps.get(0).map(|m| m.end()).unwrap_or(text.len());
            if text[end..].chars().next().is_some_and(char::is_alphanumeric) {
                replacement.push(' ');
            }
            replacement
        })
        .into_owned()
}

/// Roman numerals I–XX at a token boundary followed by whitespace, end,
/// colon, hyphen or close-paren. `uppercase` selects display-form numerals.
fn convert_roman_numerals(text: &str, uppercase: bool) -> String {
    let re = if uppercase {
        &*ROMAN_UPPER_RE
    } else {
        &*ROMAN_LOWER_RE
    };
    re.replace_all(text, |caps: &Captures| {
        let numeral = caps[1].to_lowercase();
        let value = ROMAN_NUMERALS
            .iter()
            .find(|(n, _)| *n == numeral)
            .map(|(_, v)| v.to_string())
            .unwrap_or(numeral);
        format!("{}{}", value, &caps[2])
    })
    .into_owned()
}

fn convert_number_words(text: &str) -> String {
    NUMBER_WORD_RE
        .replace_all(text, |caps: &Captures| {
            let word = &caps[1];
            ORDINALS
                .iter()
                .chain(CARDINALS.iter())
                .find(|(w, _)| *w == word)
                .map(|(_, digits)| digits.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .into_owned()
}

/// Removes trailing disambiguators, e.g. "heat (1995 film)" → "heat"
pub fn strip_disambiguators(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = DISAMBIGUATOR_RE.replace(&current, "").trim().to_string();
        if next == current || next.is_empty() {
            return current;
        }
        current = next;
    }
}

fn strip_articles(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = LEADING_ARTICLE_RE.replace(&current, "");
        let next = TRAILING_ARTICLE_RE.replace(&next, "").into_owned();
        if next == current || next.trim().is_empty() {
            return current;
        }
        current = next;
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

/// Minimum similarity for two titles to count as the same work
pub const TITLE_MATCH_THRESHOLD: f64 = 0.85;

/// Coarse similarity in [0, 1].
///
/// Exact normalized match is 1.0 and containment either way is 0.9.
/// Otherwise: the number of the shorter string's characters that occur
/// anywhere in the longer one, divided by the longer length. This is an
/// asymmetric placeholder heuristic, not an edit distance.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_title(a);
    let b = normalize_title(b);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.9;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (&a, &b)
    } else {
        (&b, &a)
    };
    let found = shorter.chars().filter(|c| longer.contains(*c)).count();
    found as f64 / longer.chars().count() as f64
}

/// Same work, as far as the title can tell
pub fn titles_match(a: &str, b: &str) -> bool {
    normalize_title(a) == normalize_title(b) || title_similarity(a, b) >= TITLE_MATCH_THRESHOLD
}

// ============================================================================
// CANDIDATE PATTERNS
// ============================================================================

/// Ordered, case-insensitively deduplicated Wikipedia candidate titles.
///
/// Priority: the year-specific disambiguated title, then the title variants
/// (cleaned, abbreviations expanded, Roman numerals converted, both,
/// colon-stripped, ampersand swapped), then bare disambiguators, then
/// `"{title} ({year})"`.
pub fn generate_title_patterns(title: &str, year: &str, kind: MediaKind) -> Vec<String> {
    build_patterns(title, year, kind, false)
}

/// Like [`generate_title_patterns`], with extra regional and animated TV
/// disambiguators.
pub fn generate_title_patterns_extended(title: &str, year: &str, kind: MediaKind) -> Vec<String> {
    build_patterns(title, year, kind, true)
}

fn build_patterns(title: &str, year: &str, kind: MediaKind, extended: bool) -> Vec<String> {
    let cleaned = clean_for_pattern(title);
    if cleaned.is_empty() {
        return Vec::new();
    }
    let year = year.trim();

    let mut patterns = Vec::new();

    if !year.is_empty() {
        match kind {
            MediaKind::Movie => patterns.push(format!("{} ({} film)", cleaned, year)),
            MediaKind::Tv => patterns.push(format!("{} ({} TV series)", cleaned, year)),
        }
    }

    patterns.extend(title_variants(&cleaned));

    match kind {
        MediaKind::Movie => patterns.push(format!("{} (film)", cleaned)),
        MediaKind::Tv => {
            patterns.extend(TV_DISAMBIGUATORS.iter().map(|d| format!("{} ({})", cleaned, d)));
            if extended {
                patterns.extend(
                    TV_DISAMBIGUATORS_EXTENDED
                        .iter()
                        .map(|d| format!("{} ({})", cleaned, d)),
                );
            }
        }
    }

    if !year.is_empty() {
        patterns.push(format!("{} ({})", cleaned, year));
    }

    dedupe_case_insensitive(patterns)
}

/// Spelling variants of an already-cleaned title, original first
fn title_variants(cleaned: &str) -> Vec<String> {
    let expanded = collapse_whitespace(&expand_abbreviations(cleaned, true));
    let roman = convert_roman_numerals(cleaned, true);
    let both = convert_roman_numerals(&expanded, true);

    let mut variants = vec![cleaned.to_string(), expanded, roman, both];

    if cleaned.contains(':') {
        variants.push(collapse_whitespace(&cleaned.replace(':', "")));
    }

    if cleaned.contains('&') {
        variants.push(collapse_whitespace(&cleaned.replace('&', " and ")));
    } else if cleaned.to_lowercase().contains(" and ") {
        variants.push(replace_word_and(cleaned));
    }

    variants
}

/// Keeps letters, digits, whitespace and `:',!?&.-`
fn clean_for_pattern(title: &str) -> String {
    let kept: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || PATTERN_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&kept)
}

/// " and " / " And " → " & "
fn replace_word_and(text: &str) -> String {
    text.split(' ')
        .map(|word| if word.eq_ignore_ascii_case("and") { "&" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dedupe_case_insensitive(patterns: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    patterns
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .filter(|p| seen.insert(p.to_lowercase()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
