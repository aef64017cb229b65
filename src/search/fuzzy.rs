//! Approximate text-matching primitives shared by every scorer.
//!
//! All functions are case-insensitive and total: blank inputs simply do not
//! match (or count zero).

use serde::Deserialize;

/// Thresholds for the prefix and substring matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzyConfig {
    /// A query word must be at least this long to take part in prefix matching.
    pub min_prefix_query_length: usize,
    /// Number of leading characters compared by the prefix matcher.
    pub prefix_length: usize,
    /// A query word must be at least this long to take part in substring matching.
    pub min_substring_length: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            min_prefix_query_length: 4,
            prefix_length: 3,
            min_substring_length: 3,
        }
    }
}

/// Exact substring containment.
pub fn contains(text: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() || text.trim().is_empty() {
        return false;
    }
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// True when the first `prefix_length` characters of `query_word` equal the
/// first `prefix_length` characters of any whitespace-delimited word of
/// `target`. Query words shorter than `min_prefix_query_length` never match.
pub fn prefix_match(query_word: &str, target: &str, config: &FuzzyConfig) -> bool {
    let query_word = query_word.trim().to_lowercase();
    if query_word.chars().count() < config.min_prefix_query_length.max(1) {
        return false;
    }

    let prefix_length = config.prefix_length.max(1);
    let prefix: String = query_word.chars().take(prefix_length).collect();

    target
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() >= prefix_length)
        .any(|word| word.starts_with(&prefix))
}

/// True when some whitespace-delimited word of `target` contains `query_word`.
/// Query words shorter than `min_substring_length` never match.
pub fn substring_match(query_word: &str, target: &str, config: &FuzzyConfig) -> bool {
    let query_word = query_word.trim().to_lowercase();
    if query_word.chars().count() < config.min_substring_length.max(1) {
        return false;
    }

    target
        .to_lowercase()
        .split_whitespace()
        .any(|word| word.contains(&query_word))
}

/// Number of non-overlapping occurrences of `term` in `text`.
pub fn term_frequency(text: &str, term: &str) -> usize {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return 0;
    }

    let text = text.to_lowercase();
    let mut count = 0;
    let mut from = 0;
    while let Some(found) = text[from..].find(&term) {
        count += 1;
        from += found + term.len();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Java Concurrency in Practice", "concurrency", true)]
    #[case("Java Concurrency in Practice", "CONCURRENCY IN", true)]
    #[case("Java Concurrency in Practice", "threads", false)]
    #[case("", "java", false)]
    #[case("java", "", false)]
    #[case("java", "   ", false)]
    fn test_contains(#[case] text: &str, #[case] needle: &str, #[case] expected: bool) {
        check!(contains(text, needle) == expected);
    }

    #[rstest]
    #[case("concurrent", "Java Concurrency in Practice", true)]
    #[case("testing", "JUnit 5 Test Guide", true)]
    #[case("con", "Java Concurrency", false)] // shorter than 4 chars
    #[case("streams", "Java Concurrency", false)]
    #[case("spring", "", false)]
    fn test_prefix_match(#[case] word: &str, #[case] target: &str, #[case] expected: bool) {
        check!(prefix_match(word, target, &FuzzyConfig::default()) == expected);
    }

    #[test]
    fn test_prefix_match_respects_config() {
        let config = FuzzyConfig {
            min_prefix_query_length: 6,
            prefix_length: 5,
            ..FuzzyConfig::default()
        };
        check!(!prefix_match("concur", "Conclusions", &config));
        check!(prefix_match("concur", "Concurrent", &config));
        check!(!prefix_match("conc", "Concurrent", &config));
    }

    #[rstest]
    #[case("boot", "SpringBoot reference", true)]
    #[case("thread", "Multithreading basics", true)]
    #[case("ab", "about", false)] // shorter than 3 chars
    #[case("gradle", "maven guide", false)]
    fn test_substring_match(#[case] word: &str, #[case] target: &str, #[case] expected: bool) {
        check!(substring_match(word, target, &FuzzyConfig::default()) == expected);
    }

    #[rstest]
    #[case("java java JAVA", "java", 3)]
    #[case("aaaa", "aa", 2)] // non-overlapping
    #[case("streams and lambdas", "stream", 1)]
    #[case("nothing here", "java", 0)]
    #[case("", "java", 0)]
    #[case("java", "", 0)]
    fn test_term_frequency(#[case] text: &str, #[case] term: &str, #[case] expected: usize) {
        check!(term_frequency(text, term) == expected);
    }
}
