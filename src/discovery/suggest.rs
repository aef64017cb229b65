//! Follow-up suggestions attached to discovery results.

use crate::resource::{ConceptArea, Difficulty, Resource, ResourceCategory};
use crate::search::ScoredItem;
use rapidfuzz::distance::jaro_winkler;
use std::cmp::Ordering;
use std::sync::Arc;

/// Upper bound on "did you mean" and related-topic suggestions.
pub const MAX_SUGGESTIONS: usize = 3;

/// Shortest query word that takes part in name overlap.
const MIN_OVERLAP_WORD_LENGTH: usize = 3;

/// A concept or category whose name overlaps the query.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSuggestion {
    pub name: &'static str,
    pub slug: &'static str,
    pub kind: &'static str,
    pub score: f64,
}

/// Concepts and categories whose display name or slug overlaps `query`,
/// most similar first.
pub fn did_you_mean(query: &str) -> Vec<TopicSuggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![];
    }
    let words: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_OVERLAP_WORD_LENGTH)
        .collect();

    let concepts = ConceptArea::ALL
        .iter()
        .map(|c| (c.display_name(), c.slug(), "concept"));
    let categories = ResourceCategory::ALL
        .iter()
        .map(|c| (c.display_name(), c.slug(), "category"));

    let mut suggestions: Vec<TopicSuggestion> = concepts
        .chain(categories)
        .filter(|(name, slug, _)| {
            let name = name.to_lowercase();
            overlaps(&query, &words, &name) || overlaps(&query, &words, slug)
        })
        .map(|(name, slug, kind)| TopicSuggestion {
            name,
            slug,
            kind,
            score: jaro_winkler::similarity(query.chars(), name.to_lowercase().chars()),
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(b.name))
    });
    // Concept and category may share a display name ("Testing").
    suggestions.dedup_by(|a, b| a.name == b.name);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn overlaps(query: &str, words: &[&str], name: &str) -> bool {
    (name.chars().count() >= MIN_OVERLAP_WORD_LENGTH && query.contains(name))
        || words.iter().any(|word| name.contains(word))
}

/// Suggestions for a specific or vague query that matched nothing.
pub fn no_match(query: &str) -> Vec<String> {
    let topics = did_you_mean(query);
    if !topics.is_empty() {
        return topics
            .iter()
            .map(|topic| format!("Did you mean the {} \"{}\"?", topic.kind, topic.name))
            .collect();
    }

    let categories: Vec<&str> = ResourceCategory::ALL.iter().map(|c| c.slug()).collect();
    vec![
        "Try broader terms, such as a topic like \"concurrency\" or \"testing\"".to_string(),
        "Ask for recommendations, for example \"learn java\" or \"beginner spring\"".to_string(),
        format!("Browse a category: {}", categories.join(", ")),
    ]
}

/// Concepts covered by the top results that the query did not ask about.
pub fn related_topics(
    items: &[ScoredItem<Arc<Resource>>],
    exclude: &[ConceptArea],
) -> Vec<String> {
    let mut seen: Vec<ConceptArea> = vec![];
    for item in items {
        for concept in &item.item.concepts {
            if !exclude.contains(concept) && !seen.contains(concept) {
                seen.push(*concept);
            }
        }
        if seen.len() >= MAX_SUGGESTIONS {
            break;
        }
    }

    seen.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|concept| format!("Related topic: {} (concept: {})", concept, concept.slug()))
        .collect()
}

/// Pointer to the next difficulty tier, if there is one.
pub fn next_step(difficulty: Difficulty, category: Option<ResourceCategory>) -> Option<String> {
    let next = difficulty.next()?;
    Some(match category {
        Some(category) => format!(
            "Next step: explore {} {} resources once you are comfortable",
            next,
            category.display_name()
        ),
        None => format!("Next step: explore {next} resources once you are comfortable"),
    })
}
