//! Query intent classification.
//!
//! [`classify`] is a total, deterministic function of the input string. The
//! rules are evaluated in order and the first one that fires wins:
//!
//! 1. blank input takes the default recommendations path
//! 2. quoting, URLs, requests for official references and version-qualified
//!    names are [`DiscoveryMode::Specific`]; a number only reads as a version
//!    when the query has no count word and no exploratory phrase
//! 3. short queries with an exploratory phrase are
//!    [`DiscoveryMode::Exploratory`], unless they also name a topical concept
//! 4. one or two words that resolve to no concept or category are
//!    [`DiscoveryMode::Exploratory`]
//! 5. everything else is [`DiscoveryMode::Vague`]

use super::keywords;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Queries longer than this never count as exploratory requests.
const MAX_EXPLORATORY_WORDS: usize = 5;

/// Queries up to this long with no recognizable topic are exploratory.
const MAX_UNRESOLVED_WORDS: usize = 2;

const QUOTE_CHARS: &[char] = &['"', '\u{201c}', '\u{201d}', '`'];

const REFERENCE_PHRASES: &[&str] = &[
    "docs for",
    "documentation for",
    "reference for",
    "official",
    "javadoc",
    "api reference",
    "specification",
];

const EXPLORATORY_PHRASES: &[&str] = &[
    "learn",
    "learning",
    "beginner",
    "beginners",
    "getting started",
    "get started",
    "recommend",
    "recommendation",
    "recommendations",
    "suggest",
    "help me",
    "where to start",
    "where do i start",
    "new to",
    "start with",
    "introduction to",
    "what should i",
];

/// Words that turn a following number into a count ("top 10") rather than a
/// version.
const COUNT_WORDS: &[&str] = &["top", "best", "first", "last", "most"];

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*$").expect("version pattern is valid"));

/// Which ranking recipe a query is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryMode {
    Specific,
    Vague,
    Exploratory,
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Specific => "SPECIFIC",
            Self::Vague => "VAGUE",
            Self::Exploratory => "EXPLORATORY",
        })
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Blank input: general recommendations over the whole corpus.
    Default,
    Mode(DiscoveryMode),
}

impl Classification {
    /// The mode a result for this classification reports.
    pub const fn mode(self) -> DiscoveryMode {
        match self {
            Self::Default => DiscoveryMode::Exploratory,
            Self::Mode(mode) => mode,
        }
    }
}

/// Classify a raw query.
pub fn classify(query: &str) -> Classification {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Classification::Default;
    }

    if is_specific(&normalized) {
        return Classification::Mode(DiscoveryMode::Specific);
    }

    let word_count = normalized.split_whitespace().count();

    if word_count <= MAX_EXPLORATORY_WORDS
        && has_exploratory_phrase(&normalized)
        && !names_topical_concept(&normalized)
    {
        return Classification::Mode(DiscoveryMode::Exploratory);
    }

    if word_count <= MAX_UNRESOLVED_WORDS
        && !normalized
            .split_whitespace()
            .any(|word| keywords::resolves(trim_punctuation(word)))
    {
        return Classification::Mode(DiscoveryMode::Exploratory);
    }

    Classification::Mode(DiscoveryMode::Vague)
}

/// Remove the characters that force specific mode so the remaining text can
/// be matched against titles.
pub fn strip_quotes(query: &str) -> String {
    query.replace(QUOTE_CHARS, "").trim().to_string()
}

fn is_specific(query: &str) -> bool {
    query.contains(QUOTE_CHARS)
        || query.contains("http")
        || REFERENCE_PHRASES
            .iter()
            .any(|phrase| keywords::contains_phrase(query, phrase))
        || (has_version_qualified_name(query) && !has_exploratory_phrase(query))
}

/// A numeric token such as `5`, `17` or `3.2` directly after a word that is
/// not itself numeric ("junit 5", "java 17"). Queries containing a count word
/// never qualify.
fn has_version_qualified_name(query: &str) -> bool {
    let words: Vec<&str> = query.split_whitespace().map(trim_punctuation).collect();
    if words.iter().any(|word| COUNT_WORDS.contains(word)) {
        return false;
    }
    words.windows(2).any(|pair| {
        pair[0].chars().any(char::is_alphabetic) && VERSION_TOKEN.is_match(pair[1])
    })
}

fn has_exploratory_phrase(query: &str) -> bool {
    EXPLORATORY_PHRASES
        .iter()
        .any(|phrase| keywords::contains_phrase(query, phrase))
}

fn names_topical_concept(query: &str) -> bool {
    keywords::concepts_in(query)
        .into_iter()
        .any(crate::resource::ConceptArea::is_topical)
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.')
        .trim_end_matches('.')
}
