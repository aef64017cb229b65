//! Pluggable relevance functions.
//!
//! Every scorer implements [`ScoringStrategy`]: a pure function from an item
//! and a [`SearchContext`] to a non-negative integer. Scorers hold no mutable
//! state (BM25 swaps an immutable snapshot), so they can be shared across
//! threads and called concurrently.

use super::context::{ScoreBreakdown, SearchContext};
use super::fuzzy::{self, FuzzyConfig};
use super::tokenize::Tokenizer;
use crate::error::{DiscoveryError, Result};
use ahash::AHashSet;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// The text fields a scorer can look at.
pub trait Searchable {
    /// Stable identifier, used as the final ranking tie-break.
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn body(&self) -> &str;
    fn tags(&self) -> &[String];
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn body(&self) -> &str {
        (**self).body()
    }

    fn tags(&self) -> &[String] {
        (**self).tags()
    }
}

/// A relevance function.
pub trait ScoringStrategy<T>: Send + Sync {
    /// Component name used in score breakdowns.
    fn name(&self) -> &'static str;

    fn score(&self, item: &T, context: &SearchContext) -> u32;

    /// Per-component view of [`ScoringStrategy::score`]. The total always
    /// equals `score`.
    fn breakdown(&self, item: &T, context: &SearchContext) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::new();
        breakdown.add(self.name(), self.score(item, context));
        breakdown
    }
}

impl<T, S: ScoringStrategy<T> + ?Sized> ScoringStrategy<T> for Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn score(&self, item: &T, context: &SearchContext) -> u32 {
        (**self).score(item, context)
    }

    fn breakdown(&self, item: &T, context: &SearchContext) -> ScoreBreakdown {
        (**self).breakdown(item, context)
    }
}

/// Point values for the tiers of [`TextFieldScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightProfile {
    /// The whole query equals the title.
    pub exact_title: u32,
    /// The title contains the whole query.
    pub partial_title: u32,
    /// The body contains the whole query.
    pub body: u32,
    /// Per query word found in the title.
    pub title_word: u32,
    /// Per query word found in a tag.
    pub tag_word: u32,
    /// Per query word that missed the title but prefix-matches a title word.
    pub fuzzy_prefix: u32,
}

impl WeightProfile {
    pub const BALANCED: Self = Self {
        exact_title: 100,
        partial_title: 50,
        body: 20,
        title_word: 10,
        tag_word: 8,
        fuzzy_prefix: 4,
    };

    pub const TITLE_HEAVY: Self = Self {
        exact_title: 150,
        partial_title: 80,
        body: 10,
        title_word: 15,
        tag_word: 5,
        fuzzy_prefix: 3,
    };

    pub const FULL_TEXT: Self = Self {
        exact_title: 80,
        partial_title: 40,
        body: 40,
        title_word: 8,
        tag_word: 8,
        fuzzy_prefix: 6,
    };
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::BALANCED
    }
}

/// Named [`WeightProfile`] presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPreset {
    #[default]
    Balanced,
    TitleHeavy,
    FullText,
}

impl WeightPreset {
    pub const fn profile(self) -> WeightProfile {
        match self {
            Self::Balanced => WeightProfile::BALANCED,
            Self::TitleHeavy => WeightProfile::TITLE_HEAVY,
            Self::FullText => WeightProfile::FULL_TEXT,
        }
    }
}

/// Query words in order of first appearance, duplicates removed.
fn unique_terms(tokenizer: &Tokenizer, query: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    tokenizer
        .terms(query)
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Tiered title/body/tag matcher.
///
/// Whole-query tiers: exact title, else partial title; body containment is
/// checked independently. Per-word tiers: a title hit (or, failing that, a
/// fuzzy prefix hit) and a tag hit are evaluated separately for every query
/// word. Tiers stack.
#[derive(Debug, Clone)]
pub struct TextFieldScorer {
    weights: WeightProfile,
    fuzzy: FuzzyConfig,
    tokenizer: Arc<Tokenizer>,
}

impl TextFieldScorer {
    pub fn new(weights: WeightProfile) -> Self {
        Self::with_tokenizer(weights, Arc::new(Tokenizer::default()))
    }

    pub fn with_tokenizer(weights: WeightProfile, tokenizer: Arc<Tokenizer>) -> Self {
        Self {
            weights,
            fuzzy: FuzzyConfig::default(),
            tokenizer,
        }
    }

    #[must_use]
    pub const fn with_fuzzy(mut self, fuzzy: FuzzyConfig) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub const fn weights(&self) -> &WeightProfile {
        &self.weights
    }

    /// Score the given title/body/tags against a raw query.
    pub fn breakdown_fields(
        &self,
        query: &str,
        title: &str,
        body: &str,
        tags: &[String],
    ) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::new();
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return breakdown;
        }

        let title = title.to_lowercase();
        if title == query {
            breakdown.add("exact_title", self.weights.exact_title);
        } else if title.contains(&query) {
            breakdown.add("partial_title", self.weights.partial_title);
        }

        if fuzzy::contains(body, &query) {
            breakdown.add("body", self.weights.body);
        }

        for word in unique_terms(&self.tokenizer, &query) {
            if title.contains(&word) {
                breakdown.add("title_word", self.weights.title_word);
            } else if fuzzy::prefix_match(&word, &title, &self.fuzzy) {
                breakdown.add("fuzzy_prefix", self.weights.fuzzy_prefix);
            }

            if tags.iter().any(|tag| fuzzy::contains(tag, &word)) {
                breakdown.add("tag_word", self.weights.tag_word);
            }
        }

        breakdown
    }
}

impl<T: Searchable> ScoringStrategy<T> for TextFieldScorer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn score(&self, item: &T, context: &SearchContext) -> u32 {
        self.breakdown(item, context).total()
    }

    fn breakdown(&self, item: &T, context: &SearchContext) -> ScoreBreakdown {
        self.breakdown_fields(context.query(), item.title(), item.body(), item.tags())
    }
}

/// Point values for [`TagScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagWeights {
    /// Per query word contained in at least one tag.
    pub hit: u32,
    /// Extra points when a tag equals the word exactly.
    pub exact_bonus: u32,
}

impl Default for TagWeights {
    fn default() -> Self {
        Self {
            hit: 10,
            exact_bonus: 5,
        }
    }
}

/// Matches query words of three or more characters against item tags.
/// Each word counts once no matter how many tags it hits.
#[derive(Debug, Clone)]
pub struct TagScorer {
    weights: TagWeights,
    tokenizer: Arc<Tokenizer>,
}

impl TagScorer {
    const MIN_WORD_LENGTH: usize = 3;

    pub fn new(weights: TagWeights) -> Self {
        Self::with_tokenizer(weights, Arc::new(Tokenizer::default()))
    }

    pub const fn with_tokenizer(weights: TagWeights, tokenizer: Arc<Tokenizer>) -> Self {
        Self { weights, tokenizer }
    }

    pub fn score_tags(&self, query: &str, tags: &[String]) -> u32 {
        let tags: Vec<String> = tags.iter().map(|tag| tag.to_lowercase()).collect();
        let substring = FuzzyConfig {
            min_substring_length: Self::MIN_WORD_LENGTH,
            ..FuzzyConfig::default()
        };

        unique_terms(&self.tokenizer, query)
            .into_iter()
            .map(|word| {
                if !tags.iter().any(|tag| fuzzy::substring_match(&word, tag, &substring)) {
                    return 0;
                }
                let exact = tags.iter().any(|tag| *tag == word);
                self.weights.hit + if exact { self.weights.exact_bonus } else { 0 }
            })
            .sum()
    }
}

impl<T: Searchable> ScoringStrategy<T> for TagScorer {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn score(&self, item: &T, context: &SearchContext) -> u32 {
        self.score_tags(context.query(), item.tags())
    }
}

/// Weighted linear combination of child strategies.
///
/// `total = trunc(Σ weight_i · child_i)`. An empty composite always scores 0.
pub struct CompositeScorer<T> {
    children: Vec<(Box<dyn ScoringStrategy<T>>, f64)>,
}

impl<T> fmt::Debug for CompositeScorer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.children
                    .iter()
                    .map(|(child, weight)| (child.name(), weight)),
            )
            .finish()
    }
}

impl<T> Default for CompositeScorer<T> {
    fn default() -> Self {
        Self { children: vec![] }
    }
}

impl<T> CompositeScorer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child with a strictly positive weight.
    pub fn push(&mut self, child: Box<dyn ScoringStrategy<T>>, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(DiscoveryError::invalid(
                "weight",
                format!("must be strictly positive, got {weight}"),
            ));
        }
        self.children.push((child, weight));
        Ok(())
    }

    /// Builder form of [`CompositeScorer::push`].
    pub fn with(
        mut self,
        child: impl ScoringStrategy<T> + 'static,
        weight: f64,
    ) -> Result<Self> {
        self.push(Box::new(child), weight)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T> ScoringStrategy<T> for CompositeScorer<T> {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn score(&self, item: &T, context: &SearchContext) -> u32 {
        let total: f64 = self
            .children
            .iter()
            .map(|(child, weight)| match child.score(item, context) {
                0 => 0.0,
                raw => weight * f64::from(raw),
            })
            .sum();
        total as u32
    }

    fn breakdown(&self, item: &T, context: &SearchContext) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::new();
        let mut running = 0.0;
        let mut recorded = 0u32;

        // Truncate the running sum so component points always add up to `score`.
        for (child, weight) in &self.children {
            let raw = child.score(item, context);
            if raw == 0 {
                continue;
            }
            running += weight * f64::from(raw);
            let cumulative = running as u32;
            breakdown.add(child.name(), cumulative - recorded);
            recorded = cumulative;
        }
        breakdown
    }
}
