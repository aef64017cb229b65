//! Static keyword → concept / category / difficulty tables.
//!
//! The tables are read-only for the lifetime of the process. Several phrases
//! may fold onto the same tag. Table order matters only as the last
//! tie-break of [`first_category_in`] and [`first_difficulty_in`].

use crate::resource::{ConceptArea, Difficulty, ResourceCategory};
use ahash::AHashMap;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Keywords at least this long also match as plain substrings
/// ("multithreaded" contains "thread"); shorter ones need word boundaries.
const SUBSTRING_MIN_LENGTH: usize = 5;

pub const CONCEPT_KEYWORDS: &[(&str, ConceptArea)] = &[
    ("getting started", ConceptArea::GettingStarted),
    ("get started", ConceptArea::GettingStarted),
    ("first steps", ConceptArea::GettingStarted),
    ("hello world", ConceptArea::GettingStarted),
    ("introduction", ConceptArea::GettingStarted),
    ("fundamentals", ConceptArea::GettingStarted),
    ("basics", ConceptArea::GettingStarted),
    ("syntax", ConceptArea::LanguageBasics),
    ("variables", ConceptArea::LanguageBasics),
    ("control flow", ConceptArea::LanguageBasics),
    ("data types", ConceptArea::LanguageBasics),
    ("primitives", ConceptArea::LanguageBasics),
    ("oop", ConceptArea::ObjectOriented),
    ("object oriented", ConceptArea::ObjectOriented),
    ("object-oriented", ConceptArea::ObjectOriented),
    ("inheritance", ConceptArea::ObjectOriented),
    ("polymorphism", ConceptArea::ObjectOriented),
    ("interfaces", ConceptArea::ObjectOriented),
    ("encapsulation", ConceptArea::ObjectOriented),
    ("collections", ConceptArea::Collections),
    ("collection", ConceptArea::Collections),
    ("hashmap", ConceptArea::Collections),
    ("arraylist", ConceptArea::Collections),
    ("data structures", ConceptArea::Collections),
    ("generics", ConceptArea::Generics),
    ("generic types", ConceptArea::Generics),
    ("type parameters", ConceptArea::Generics),
    ("wildcards", ConceptArea::Generics),
    ("streams", ConceptArea::Streams),
    ("stream api", ConceptArea::Streams),
    ("lambda", ConceptArea::Streams),
    ("lambdas", ConceptArea::Streams),
    ("functional programming", ConceptArea::Streams),
    ("functional", ConceptArea::Streams),
    ("concurrency", ConceptArea::Concurrency),
    ("concurrent", ConceptArea::Concurrency),
    ("multithreading", ConceptArea::Concurrency),
    ("multi-threading", ConceptArea::Concurrency),
    ("threads", ConceptArea::Concurrency),
    ("thread", ConceptArea::Concurrency),
    ("threading", ConceptArea::Concurrency),
    ("parallelism", ConceptArea::Concurrency),
    ("parallel", ConceptArea::Concurrency),
    ("virtual threads", ConceptArea::Concurrency),
    ("executor", ConceptArea::Concurrency),
    ("completablefuture", ConceptArea::Concurrency),
    ("synchronization", ConceptArea::Concurrency),
    ("async", ConceptArea::Concurrency),
    ("exceptions", ConceptArea::ErrorHandling),
    ("exception", ConceptArea::ErrorHandling),
    ("error handling", ConceptArea::ErrorHandling),
    ("try catch", ConceptArea::ErrorHandling),
    ("io", ConceptArea::Io),
    ("nio", ConceptArea::Io),
    ("file io", ConceptArea::Io),
    ("files", ConceptArea::Io),
    ("serialization", ConceptArea::Io),
    ("testing", ConceptArea::Testing),
    ("tests", ConceptArea::Testing),
    ("unit test", ConceptArea::Testing),
    ("unit testing", ConceptArea::Testing),
    ("integration testing", ConceptArea::Testing),
    ("tdd", ConceptArea::Testing),
    ("junit", ConceptArea::Testing),
    ("mockito", ConceptArea::Testing),
    ("mocking", ConceptArea::Testing),
    ("design patterns", ConceptArea::DesignPatterns),
    ("design pattern", ConceptArea::DesignPatterns),
    ("patterns", ConceptArea::DesignPatterns),
    ("gang of four", ConceptArea::DesignPatterns),
    ("gof", ConceptArea::DesignPatterns),
    ("singleton", ConceptArea::DesignPatterns),
    ("clean code", ConceptArea::DesignPatterns),
    ("refactoring", ConceptArea::DesignPatterns),
    ("performance", ConceptArea::Performance),
    ("optimization", ConceptArea::Performance),
    ("profiling", ConceptArea::Performance),
    ("benchmarking", ConceptArea::Performance),
    ("jmh", ConceptArea::Performance),
    ("tuning", ConceptArea::Performance),
    ("garbage collection", ConceptArea::JvmInternals),
    ("garbage collector", ConceptArea::JvmInternals),
    ("bytecode", ConceptArea::JvmInternals),
    ("class loading", ConceptArea::JvmInternals),
    ("memory model", ConceptArea::JvmInternals),
    ("jit", ConceptArea::JvmInternals),
    ("security", ConceptArea::Security),
    ("authentication", ConceptArea::Security),
    ("authorization", ConceptArea::Security),
    ("oauth", ConceptArea::Security),
    ("cryptography", ConceptArea::Security),
    ("owasp", ConceptArea::Security),
    ("persistence", ConceptArea::Persistence),
    ("database", ConceptArea::Persistence),
    ("databases", ConceptArea::Persistence),
    ("jdbc", ConceptArea::Persistence),
    ("jpa", ConceptArea::Persistence),
    ("hibernate", ConceptArea::Persistence),
    ("sql", ConceptArea::Persistence),
    ("orm", ConceptArea::Persistence),
    ("rest", ConceptArea::WebServices),
    ("rest api", ConceptArea::WebServices),
    ("restful", ConceptArea::WebServices),
    ("web services", ConceptArea::WebServices),
    ("http client", ConceptArea::WebServices),
    ("graphql", ConceptArea::WebServices),
    ("microservices", ConceptArea::Microservices),
    ("microservice", ConceptArea::Microservices),
    ("service mesh", ConceptArea::Microservices),
    ("distributed systems", ConceptArea::Microservices),
    ("maven", ConceptArea::BuildTools),
    ("gradle", ConceptArea::BuildTools),
    ("build tools", ConceptArea::BuildTools),
    ("dependency management", ConceptArea::BuildTools),
    ("records", ConceptArea::ModernJava),
    ("sealed classes", ConceptArea::ModernJava),
    ("pattern matching", ConceptArea::ModernJava),
    ("modern java", ConceptArea::ModernJava),
    ("new features", ConceptArea::ModernJava),
    ("text blocks", ConceptArea::ModernJava),
];

pub const CATEGORY_KEYWORDS: &[(&str, ResourceCategory)] = &[
    ("java", ResourceCategory::Java),
    ("core java", ResourceCategory::Java),
    ("jdk", ResourceCategory::Java),
    ("openjdk", ResourceCategory::Java),
    ("java se", ResourceCategory::Java),
    ("spring", ResourceCategory::Spring),
    ("spring boot", ResourceCategory::Spring),
    ("springboot", ResourceCategory::Spring),
    ("spring framework", ResourceCategory::Spring),
    ("spring cloud", ResourceCategory::Spring),
    ("jakarta", ResourceCategory::Jakarta),
    ("jakarta ee", ResourceCategory::Jakarta),
    ("java ee", ResourceCategory::Jakarta),
    ("j2ee", ResourceCategory::Jakarta),
    ("servlet", ResourceCategory::Jakarta),
    ("servlets", ResourceCategory::Jakarta),
    ("testing", ResourceCategory::Testing),
    ("junit", ResourceCategory::Testing),
    ("mockito", ResourceCategory::Testing),
    ("testcontainers", ResourceCategory::Testing),
    ("assertj", ResourceCategory::Testing),
    ("build", ResourceCategory::Build),
    ("maven", ResourceCategory::Build),
    ("gradle", ResourceCategory::Build),
    ("tooling", ResourceCategory::Build),
    ("ide", ResourceCategory::Build),
    ("intellij", ResourceCategory::Build),
    ("jvm", ResourceCategory::Jvm),
    ("garbage collection", ResourceCategory::Jvm),
    ("gc", ResourceCategory::Jvm),
    ("hotspot", ResourceCategory::Jvm),
    ("graalvm", ResourceCategory::Jvm),
    ("architecture", ResourceCategory::Architecture),
    ("software architecture", ResourceCategory::Architecture),
    ("microservices", ResourceCategory::Architecture),
    ("ddd", ResourceCategory::Architecture),
    ("domain driven design", ResourceCategory::Architecture),
    ("system design", ResourceCategory::Architecture),
    ("data", ResourceCategory::Data),
    ("database", ResourceCategory::Data),
    ("databases", ResourceCategory::Data),
    ("jdbc", ResourceCategory::Data),
    ("jpa", ResourceCategory::Data),
    ("hibernate", ResourceCategory::Data),
    ("kafka", ResourceCategory::Data),
    ("cloud", ResourceCategory::Cloud),
    ("devops", ResourceCategory::Cloud),
    ("docker", ResourceCategory::Cloud),
    ("kubernetes", ResourceCategory::Cloud),
    ("k8s", ResourceCategory::Cloud),
    ("aws", ResourceCategory::Cloud),
    ("deployment", ResourceCategory::Cloud),
    ("community", ResourceCategory::Community),
    ("podcast", ResourceCategory::Community),
    ("podcasts", ResourceCategory::Community),
    ("newsletter", ResourceCategory::Community),
    ("conference", ResourceCategory::Community),
    ("conferences", ResourceCategory::Community),
    ("blogs", ResourceCategory::Community),
];

pub const DIFFICULTY_KEYWORDS: &[(&str, Difficulty)] = &[
    ("beginner", Difficulty::Beginner),
    ("beginners", Difficulty::Beginner),
    ("newbie", Difficulty::Beginner),
    ("novice", Difficulty::Beginner),
    ("new to", Difficulty::Beginner),
    ("introductory", Difficulty::Beginner),
    ("starter", Difficulty::Beginner),
    ("first steps", Difficulty::Beginner),
    ("from scratch", Difficulty::Beginner),
    ("intermediate", Difficulty::Intermediate),
    ("some experience", Difficulty::Intermediate),
    ("next level", Difficulty::Intermediate),
    ("advanced", Difficulty::Advanced),
    ("deep dive", Difficulty::Advanced),
    ("in depth", Difficulty::Advanced),
    ("in-depth", Difficulty::Advanced),
    ("internals", Difficulty::Advanced),
    ("expert", Difficulty::Expert),
    ("experts", Difficulty::Expert),
    ("mastery", Difficulty::Expert),
    ("mastering", Difficulty::Expert),
];

static CONCEPT_INDEX: LazyLock<AHashMap<&'static str, ConceptArea>> =
    LazyLock::new(|| build_index(CONCEPT_KEYWORDS));
static CATEGORY_INDEX: LazyLock<AHashMap<&'static str, ResourceCategory>> =
    LazyLock::new(|| build_index(CATEGORY_KEYWORDS));
static DIFFICULTY_INDEX: LazyLock<AHashMap<&'static str, Difficulty>> =
    LazyLock::new(|| build_index(DIFFICULTY_KEYWORDS));

fn build_index<T: Copy>(table: &[(&'static str, T)]) -> AHashMap<&'static str, T> {
    let mut index = AHashMap::with_capacity(table.len());
    for (keyword, value) in table {
        // First entry wins, mirroring table order priority.
        index.entry(*keyword).or_insert(*value);
    }
    index
}

/// Look up a single keyword or phrase.
pub fn concept_for(keyword: &str) -> Option<ConceptArea> {
    CONCEPT_INDEX.get(normalize(keyword).as_str()).copied()
}

pub fn category_for(keyword: &str) -> Option<ResourceCategory> {
    CATEGORY_INDEX.get(normalize(keyword).as_str()).copied()
}

pub fn difficulty_for(keyword: &str) -> Option<Difficulty> {
    DIFFICULTY_INDEX.get(normalize(keyword).as_str()).copied()
}

/// Whether `word` names a concept or a category on its own.
pub fn resolves(word: &str) -> bool {
    concept_for(word).is_some() || category_for(word).is_some()
}

/// Every concept the query mentions.
pub fn concepts_in(query: &str) -> BTreeSet<ConceptArea> {
    collect_all(query, CONCEPT_KEYWORDS, &CONCEPT_INDEX)
}

/// Every category the query mentions.
pub fn categories_in(query: &str) -> BTreeSet<ResourceCategory> {
    collect_all(query, CATEGORY_KEYWORDS, &CATEGORY_INDEX)
}

/// The single category a query is about.
///
/// When several match, the keyword that starts earliest in the query wins,
/// then the longer keyword, then table order.
pub fn first_category_in(query: &str) -> Option<ResourceCategory> {
    first_match(query, CATEGORY_KEYWORDS)
}

/// The single difficulty a query asks for, with the same priority rule as
/// [`first_category_in`].
pub fn first_difficulty_in(query: &str) -> Option<Difficulty> {
    first_match(query, DIFFICULTY_KEYWORDS)
}

/// Whether `phrase` occurs in `text` on word boundaries, ignoring case.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    find_bounded(&normalize(text), &normalize(phrase)).is_some()
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Two scans, accumulated into one set so a concept matched by both counts once:
/// individual words against the index, then every phrase against the whole query.
fn collect_all<T: Copy + Ord>(
    query: &str,
    table: &[(&'static str, T)],
    index: &AHashMap<&'static str, T>,
) -> BTreeSet<T> {
    let query = normalize(query);
    let mut found = BTreeSet::new();

    for word in words(&query) {
        if let Some(value) = index.get(word) {
            found.insert(*value);
        }
    }

    for (keyword, value) in table {
        let matched = if keyword.len() >= SUBSTRING_MIN_LENGTH {
            query.contains(keyword)
        } else {
            find_bounded(&query, keyword).is_some()
        };
        if matched {
            found.insert(*value);
        }
    }

    found
}

fn first_match<T: Copy>(query: &str, table: &[(&'static str, T)]) -> Option<T> {
    let query = normalize(query);
    table
        .iter()
        .enumerate()
        .filter_map(|(order, (keyword, value))| {
            find_bounded(&query, keyword).map(|position| (position, keyword.len(), order, *value))
        })
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)))
        .map(|(_, _, _, value)| value)
}

fn words(query: &str) -> impl Iterator<Item = &str> {
    query
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '?' | '!' | ';' | ':'))
        .filter(|word| !word.is_empty())
}

/// Byte position of the first occurrence of `keyword` in `text` that starts
/// and ends on a word boundary.
fn find_bounded(text: &str, keyword: &str) -> Option<usize> {
    if keyword.is_empty() {
        return None;
    }
    let is_boundary = |c: Option<char>| c.is_none_or(|c| !c.is_alphanumeric());

    text.match_indices(keyword).map(|(start, _)| start).find(|&start| {
        let end = start + keyword.len();
        is_boundary(text[..start].chars().next_back()) && is_boundary(text[end..].chars().next())
    })
}
