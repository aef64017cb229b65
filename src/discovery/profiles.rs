//! Per-intent relevance recipes.
//!
//! Each recipe turns one resource into a [`ScoreBreakdown`]. Component names
//! are stable and show up in diagnostic output, so tests assert on them.

use crate::error::{DiscoveryError, Result};
use crate::resource::{ConceptArea, Difficulty, Resource, ResourceCategory};
use crate::search::{
    fuzzy, Bm25Scorer, CompositeScorer, ScoreBreakdown, ScoringStrategy, SearchContext, TextFieldScorer,
    Tokenizer,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Point values of the specific-lookup recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecificWeights {
    /// The query names the resource id or its URL.
    pub identifier: u32,
    pub authority: u32,
}

impl Default for SpecificWeights {
    fn default() -> Self {
        Self {
            identifier: 40,
            authority: 15,
        }
    }
}

/// Point values of the topic-search recipe.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VagueWeights {
    /// Per query term found anywhere in the resource text.
    pub word_overlap: u32,
    /// Per inferred concept the resource covers.
    pub concept: u32,
    /// Per inferred category the resource belongs to.
    pub category: u32,
    /// The resource matches the difficulty the query asks for.
    pub difficulty_hint: u32,
    /// Multiplier on the BM25 score. Zero disables BM25.
    pub bm25: f64,
    pub authority: u32,
    pub freshness: u32,
}

impl Default for VagueWeights {
    fn default() -> Self {
        Self {
            word_overlap: 5,
            concept: 15,
            category: 10,
            difficulty_hint: 5,
            bm25: 1.0,
            authority: 5,
            freshness: 3,
        }
    }
}

/// Point values of the concept-targeted recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConceptWeights {
    pub concept: u32,
    pub authority: u32,
    pub freshness: u32,
    /// The resource difficulty lies inside the requested range.
    pub difficulty_fit: u32,
}

impl Default for ConceptWeights {
    fn default() -> Self {
        Self {
            concept: 50,
            authority: 10,
            freshness: 5,
            difficulty_fit: 10,
        }
    }
}

/// Point values of the recommendation recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExploratoryWeights {
    pub exact_difficulty: u32,
    /// The resource is one tier away from the target difficulty.
    pub adjacent_difficulty: u32,
    pub getting_started: u32,
    /// Counted twice for official resources.
    pub authority: u32,
    pub freshness: u32,
    pub free: u32,
}

impl Default for ExploratoryWeights {
    fn default() -> Self {
        Self {
            exact_difficulty: 20,
            adjacent_difficulty: 10,
            getting_started: 15,
            authority: 10,
            freshness: 5,
            free: 3,
        }
    }
}

/// All recipe weights, deserialized from the `[profiles.*]` config tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileWeights {
    pub specific: SpecificWeights,
    pub vague: VagueWeights,
    pub concept: ConceptWeights,
    pub exploratory: ExploratoryWeights,
}

impl ProfileWeights {
    pub fn validate(&self) -> Result<()> {
        let bm25 = self.vague.bm25;
        if !bm25.is_finite() || bm25 < 0.0 {
            return Err(DiscoveryError::invalid(
                "profiles.vague.bm25",
                format!("must be zero or positive, got {bm25}"),
            ));
        }
        Ok(())
    }
}

/// Inclusive difficulty bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyRange {
    min: Option<Difficulty>,
    max: Option<Difficulty>,
}

impl DifficultyRange {
    /// Every difficulty.
    pub const OPEN: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: Option<Difficulty>, max: Option<Difficulty>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(DiscoveryError::invalid(
                "difficulty",
                format!("minimum {min} is harder than maximum {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> Option<Difficulty> {
        self.min
    }

    pub const fn max(&self) -> Option<Difficulty> {
        self.max
    }

    pub fn contains(&self, difficulty: Difficulty) -> bool {
        self.min.is_none_or(|min| difficulty >= min) && self.max.is_none_or(|max| difficulty <= max)
    }
}

/// Structured hints inferred from a free-text topic query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicIntent {
    pub concepts: BTreeSet<ConceptArea>,
    pub categories: BTreeSet<ResourceCategory>,
    pub difficulty: Option<Difficulty>,
}

/// Scores query terms found anywhere in a resource's text.
struct WordOverlapScorer {
    points: u32,
    tokenizer: Arc<Tokenizer>,
}

impl ScoringStrategy<Resource> for WordOverlapScorer {
    fn name(&self) -> &'static str {
        "word_overlap"
    }

    fn score(&self, resource: &Resource, context: &SearchContext) -> u32 {
        let text = resource.full_text();
        let terms: BTreeSet<String> = self.tokenizer.terms(context.query()).collect();
        let hits = terms
            .iter()
            .filter(|term| fuzzy::term_frequency(&text, term) > 0)
            .count();
        self.points * hits as u32
    }
}

/// The four relevance recipes with their shared scorers.
pub struct RelevanceProfiles {
    weights: ProfileWeights,
    text: TextFieldScorer,
    bm25: Arc<Bm25Scorer>,
    topic_relevance: CompositeScorer<Resource>,
}

impl std::fmt::Debug for RelevanceProfiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceProfiles")
            .field("weights", &self.weights)
            .field("text", &self.text)
            .field("topic_relevance", &self.topic_relevance)
            .finish_non_exhaustive()
    }
}

impl RelevanceProfiles {
    pub fn new(
        weights: ProfileWeights,
        text: TextFieldScorer,
        bm25: Arc<Bm25Scorer>,
        tokenizer: Arc<Tokenizer>,
    ) -> Result<Self> {
        weights.validate()?;

        let mut topic_relevance = CompositeScorer::new();
        if weights.vague.word_overlap > 0 {
            topic_relevance.push(
                Box::new(WordOverlapScorer {
                    points: weights.vague.word_overlap,
                    tokenizer,
                }),
                1.0,
            )?;
        }
        if weights.vague.bm25 > 0.0 {
            topic_relevance.push(Box::new(Arc::clone(&bm25)), weights.vague.bm25)?;
        }

        Ok(Self {
            weights,
            text,
            bm25,
            topic_relevance,
        })
    }

    pub const fn weights(&self) -> &ProfileWeights {
        &self.weights
    }

    pub fn bm25(&self) -> &Bm25Scorer {
        &self.bm25
    }

    /// Lookup of one particular resource by title, id or URL.
    pub fn specific(&self, resource: &Resource, query: &str) -> ScoreBreakdown {
        let weights = &self.weights.specific;
        let mut breakdown = self.text.breakdown_fields(
            query,
            &resource.title,
            &resource.description,
            &resource.tags,
        );

        if names_identifier(resource, query) {
            breakdown.add("identifier", weights.identifier);
        }

        if !breakdown.is_empty() && resource.official {
            breakdown.add("authority", weights.authority);
        }
        breakdown
    }

    /// Topic search guided by inferred concepts, categories and difficulty.
    pub fn vague(&self, resource: &Resource, query: &str, intent: &TopicIntent) -> ScoreBreakdown {
        let weights = &self.weights.vague;
        let context = SearchContext::new(query);
        let mut breakdown = self.topic_relevance.breakdown(resource, &context);

        let covered = intent
            .concepts
            .iter()
            .filter(|concept| resource.covers(**concept))
            .count() as u32;
        breakdown.add("concept", weights.concept * covered);

        let matched = intent
            .categories
            .iter()
            .filter(|category| resource.belongs_to(**category))
            .count() as u32;
        breakdown.add("category", weights.category * matched);

        if breakdown.is_empty() {
            return breakdown;
        }

        if intent.difficulty == Some(resource.difficulty) {
            breakdown.add("difficulty", weights.difficulty_hint);
        }
        if resource.official {
            breakdown.add("authority", weights.authority);
        }
        if resource.maintained {
            breakdown.add("freshness", weights.freshness);
        }
        breakdown
    }

    /// Ranking of resources that cover `concept`.
    pub fn concept(
        &self,
        resource: &Resource,
        concept: ConceptArea,
        range: DifficultyRange,
    ) -> ScoreBreakdown {
        let weights = &self.weights.concept;
        let mut breakdown = ScoreBreakdown::new();

        if resource.covers(concept) {
            breakdown.add("concept", weights.concept);
        }
        if resource.official {
            breakdown.add("authority", weights.authority);
        }
        if resource.maintained {
            breakdown.add("freshness", weights.freshness);
        }
        if range.contains(resource.difficulty) {
            breakdown.add("difficulty_fit", weights.difficulty_fit);
        }
        breakdown
    }

    /// Recommendation ranking around a target difficulty.
    pub fn exploratory(&self, resource: &Resource, target: Difficulty) -> ScoreBreakdown {
        let weights = &self.weights.exploratory;
        let mut breakdown = ScoreBreakdown::new();

        match resource.difficulty.distance(target) {
            0 => breakdown.add("difficulty", weights.exact_difficulty),
            1 => breakdown.add("difficulty", weights.adjacent_difficulty),
            _ => {}
        }
        if resource.covers(ConceptArea::GettingStarted) {
            breakdown.add("getting_started", weights.getting_started);
        }
        if resource.official {
            breakdown.add("authority", weights.authority);
            breakdown.add("authority", weights.authority);
        }
        if resource.maintained {
            breakdown.add("freshness", weights.freshness);
        }
        if resource.free {
            breakdown.add("free", weights.free);
        }
        breakdown
    }
}

/// The query names the resource id ("junit-5-user-guide"), contains it, or
/// is a URL pointing at the resource.
fn names_identifier(resource: &Resource, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return false;
    }

    let id = resource.id.to_lowercase();
    let hyphenated = query.split_whitespace().collect::<Vec<_>>().join("-");
    if id.contains(&hyphenated) || query.contains(&id) {
        return true;
    }

    let url = resource.url.trim_end_matches('/').to_lowercase();
    query.starts_with("http") && !url.is_empty() && {
        let query_url = query.trim_end_matches('/');
        query_url.contains(&url) || url.contains(query_url)
    }
}
