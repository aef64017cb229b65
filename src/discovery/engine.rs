//! The discovery orchestrator: classify, score, rank, explain.

use super::classify::{self, Classification, DiscoveryMode};
use super::keywords;
use super::profiles::{DifficultyRange, RelevanceProfiles, TopicIntent};
use super::suggest;
use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::resource::{ConceptArea, Difficulty, Resource, ResourceCategory};
use crate::search::{
    Bm25Scorer, CorpusStatistics, ScoreBreakdown, ScoredItem, StatisticsState, TextFieldScorer,
    Tokenizer,
};
use crate::store::{ResourceFilter, ResourceStore};
use std::sync::Arc;
use std::time::Instant;

/// An immutable ranked answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryResult {
    pub mode: DiscoveryMode,
    /// Highest score first; ties ordered by resource id.
    pub items: Vec<ScoredItem<Arc<Resource>>>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

impl DiscoveryResult {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.items.iter().map(|scored| &scored.item)
    }
}

/// Ranks the resources of a [`ResourceStore`] against free-text queries.
#[derive(Debug)]
pub struct DiscoveryEngine {
    store: Arc<ResourceStore>,
    profiles: RelevanceProfiles,
    max_results: usize,
}

impl DiscoveryEngine {
    pub fn new(store: Arc<ResourceStore>, config: &DiscoveryConfig) -> Result<Self> {
        let tokenizer = Arc::new(Tokenizer::new(&config.tokenizer));
        let text = TextFieldScorer::with_tokenizer(
            config.text_weights.preset.profile(),
            Arc::clone(&tokenizer),
        )
        .with_fuzzy(config.fuzzy);
        let bm25 = Arc::new(Bm25Scorer::with_tokenizer(config.bm25, Arc::clone(&tokenizer)));
        let profiles = RelevanceProfiles::new(config.profiles, text, bm25, tokenizer)?;

        Ok(Self {
            store,
            profiles,
            max_results: config.discovery.max_results.max(1),
        })
    }

    /// Engine with default configuration.
    pub fn with_defaults(store: Arc<ResourceStore>) -> Result<Self> {
        Self::new(store, &DiscoveryConfig::default())
    }

    pub const fn store(&self) -> &Arc<ResourceStore> {
        &self.store
    }

    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Recompute BM25 statistics over the current corpus. Call after the
    /// store has been populated or changed.
    pub fn refresh_statistics(&self) -> Arc<CorpusStatistics> {
        let resources = self.store.all();
        self.profiles.bm25().compute_statistics(&resources)
    }

    pub fn statistics_state(&self) -> StatisticsState {
        self.profiles.bm25().state()
    }

    pub fn classify(&self, query: &str) -> Classification {
        classify::classify(query)
    }

    /// Classify `query` and answer it with the matching recipe.
    pub fn discover(&self, query: &str) -> DiscoveryResult {
        self.discover_with_mode(query, None, 0)
    }

    /// Like [`DiscoveryEngine::discover`], optionally skipping classification.
    /// A `limit` of 0 uses the configured ceiling. Blank queries always take
    /// the general-recommendations path.
    pub fn discover_with_mode(
        &self,
        query: &str,
        mode: Option<DiscoveryMode>,
        limit: usize,
    ) -> DiscoveryResult {
        let start = Instant::now();
        let limit = self.effective_limit(limit);

        let classification = match mode {
            _ if query.trim().is_empty() => Classification::Default,
            Some(mode) => Classification::Mode(mode),
            None => classify::classify(query),
        };
        tracing::debug!("Classified '{}' as {:?}", query, classification);

        let result = match classification {
            Classification::Default => self.general_recommendations(limit),
            Classification::Mode(DiscoveryMode::Specific) => self.specific(query, limit),
            Classification::Mode(DiscoveryMode::Vague) => self.vague(query, limit),
            Classification::Mode(DiscoveryMode::Exploratory) => self.exploratory(query, limit),
        };

        tracing::debug!(
            "Discovery for '{}' returned {} result(s) in {:?}",
            query,
            result.len(),
            start.elapsed()
        );
        result
    }

    /// Rank the resources covering `concept`, favoring those inside `range`.
    pub fn discover_by_concept(
        &self,
        concept: ConceptArea,
        range: DifficultyRange,
        limit: usize,
    ) -> DiscoveryResult {
        let limit = self.effective_limit(limit);
        let candidates: Vec<Arc<Resource>> = self
            .store
            .all()
            .into_iter()
            .filter(|resource| resource.covers(concept))
            .collect();

        let items = rank(
            candidates
                .into_iter()
                .map(|resource| {
                    let breakdown = self.profiles.concept(&resource, concept, range);
                    (resource, breakdown)
                }),
            false,
            limit,
        );

        let label = concept.display_name();
        let (summary, suggestions) = if items.is_empty() {
            (
                format!("No resources found for \"{label}\""),
                suggest::no_match(label),
            )
        } else {
            (
                format!("Found {} resource(s) related to {label}", items.len()),
                suggest::related_topics(&items, &[concept]),
            )
        };

        DiscoveryResult {
            mode: DiscoveryMode::Vague,
            items,
            suggestions,
            summary,
        }
    }

    /// Beginner-first recommendations inside `category`.
    pub fn discover_by_category(&self, category: ResourceCategory, limit: usize) -> DiscoveryResult {
        let limit = self.effective_limit(limit);
        let candidates = self.store.filter(&ResourceFilter::new().category(category));
        self.recommend(&candidates, Difficulty::Beginner, Some(category), limit)
    }

    const fn effective_limit(&self, limit: usize) -> usize {
        if limit == 0 { self.max_results } else { limit }
    }

    fn general_recommendations(&self, limit: usize) -> DiscoveryResult {
        let candidates = self.store.all();
        let items = rank(
            candidates.into_iter().map(|resource| {
                let breakdown = self.profiles.exploratory(&resource, Difficulty::Beginner);
                (resource, breakdown)
            }),
            false,
            limit,
        );

        DiscoveryResult {
            mode: DiscoveryMode::Exploratory,
            summary: format!(
                "General recommendations: {} resource(s) to get started with",
                items.len()
            ),
            items,
            suggestions: vec![],
        }
    }

    fn specific(&self, query: &str, limit: usize) -> DiscoveryResult {
        let cleaned = classify::strip_quotes(query);
        let items = rank(
            self.store.all().into_iter().map(|resource| {
                let breakdown = self.profiles.specific(&resource, &cleaned);
                (resource, breakdown)
            }),
            true,
            limit,
        );

        self.matched(DiscoveryMode::Specific, query, items, |count| {
            format!("Found {count} resource(s) matching \"{cleaned}\"")
        })
    }

    fn vague(&self, query: &str, limit: usize) -> DiscoveryResult {
        let intent = TopicIntent {
            concepts: keywords::concepts_in(query),
            categories: keywords::categories_in(query),
            difficulty: keywords::first_difficulty_in(query),
        };
        tracing::debug!(
            "Inferred concepts {:?}, categories {:?}, difficulty {:?}",
            intent.concepts,
            intent.categories,
            intent.difficulty
        );

        let items = rank(
            self.store.all().into_iter().map(|resource| {
                let breakdown = self.profiles.vague(&resource, query, &intent);
                (resource, breakdown)
            }),
            true,
            limit,
        );

        let topic = topic_label(&intent, query);
        self.matched(DiscoveryMode::Vague, query, items, |count| {
            format!("Found {count} resource(s) related to {topic}")
        })
    }

    fn exploratory(&self, query: &str, limit: usize) -> DiscoveryResult {
        let target = keywords::first_difficulty_in(query).unwrap_or(Difficulty::Beginner);
        let category = keywords::first_category_in(query);

        let restricted = category
            .map(|category| self.store.filter(&ResourceFilter::new().category(category)))
            .filter(|resources| !resources.is_empty());

        match restricted {
            Some(candidates) => self.recommend(&candidates, target, category, limit),
            None => {
                if let Some(category) = category {
                    tracing::debug!("No resources in {}, recommending from the whole corpus", category);
                }
                self.recommend(&self.store.all(), target, None, limit)
            }
        }
    }

    fn recommend(
        &self,
        candidates: &[Arc<Resource>],
        target: Difficulty,
        category: Option<ResourceCategory>,
        limit: usize,
    ) -> DiscoveryResult {
        let items = rank(
            candidates.iter().map(|resource| {
                let breakdown = self.profiles.exploratory(resource, target);
                (Arc::clone(resource), breakdown)
            }),
            false,
            limit,
        );

        let scope = category.map_or_else(String::new, |c| format!(" in {}", c.display_name()));
        let summary = if items.is_empty() {
            format!("No resources found for \"{target}{scope}\"")
        } else {
            format!("Recommended {} {target} resource(s){scope}", items.len())
        };

        DiscoveryResult {
            mode: DiscoveryMode::Exploratory,
            items,
            suggestions: suggest::next_step(target, category).into_iter().collect(),
            summary,
        }
    }

    /// Summary and suggestions for specific and vague results.
    fn matched(
        &self,
        mode: DiscoveryMode,
        query: &str,
        items: Vec<ScoredItem<Arc<Resource>>>,
        found: impl FnOnce(usize) -> String,
    ) -> DiscoveryResult {
        if items.is_empty() {
            tracing::debug!("No matches for '{}' among {} resources", query, self.store.len());
            return DiscoveryResult {
                mode,
                items,
                suggestions: suggest::no_match(query),
                summary: format!("No resources found for \"{}\"", query.trim()),
            };
        }

        let asked: Vec<ConceptArea> = keywords::concepts_in(query).into_iter().collect();
        DiscoveryResult {
            mode,
            summary: found(items.len()),
            suggestions: suggest::related_topics(&items, &asked),
            items,
        }
    }
}

/// Sort by score descending then id ascending, and cap at `limit`.
/// With `drop_zero`, resources that scored nothing are discarded first.
fn rank(
    scored: impl Iterator<Item = (Arc<Resource>, ScoreBreakdown)>,
    drop_zero: bool,
    limit: usize,
) -> Vec<ScoredItem<Arc<Resource>>> {
    let mut items: Vec<ScoredItem<Arc<Resource>>> = scored
        .map(|(resource, breakdown)| ScoredItem::from_breakdown(resource, breakdown))
        .filter(|item| !drop_zero || item.score > 0)
        .collect();

    items.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.item.id.cmp(&b.item.id)));
    items.truncate(limit);
    items
}

/// Human-readable name for what a topic query was about.
fn topic_label(intent: &TopicIntent, query: &str) -> String {
    let names: Vec<&str> = intent
        .concepts
        .iter()
        .map(|c| c.display_name())
        .chain(intent.categories.iter().map(|c| c.display_name()))
        .collect();

    if names.is_empty() {
        format!("\"{}\"", query.trim())
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn engine(resources: Vec<Resource>) -> DiscoveryEngine {
        let store = Arc::new(ResourceStore::new());
        for resource in resources {
            let_assert!(Ok(_) = store.insert(resource));
        }
        let_assert!(Ok(engine) = DiscoveryEngine::with_defaults(store));
        engine.refresh_statistics();
        engine
    }

    #[test]
    fn test_rank_breaks_ties_by_id() {
        let items = rank(
            ["b", "a", "c"].into_iter().map(|id| {
                let mut breakdown = ScoreBreakdown::new();
                breakdown.add("x", 5);
                (Arc::new(Resource::new(id, "Same")), breakdown)
            }),
            true,
            2,
        );
        let ids: Vec<&str> = items.iter().map(|i| i.item.id.as_str()).collect();
        check!(ids == ["a", "b"]);
    }

    #[test]
    fn test_rank_drop_zero() {
        let items = rank(
            std::iter::once((Arc::new(Resource::new("a", "A")), ScoreBreakdown::new())),
            true,
            10,
        );
        check!(items.is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let engine = engine(vec![]);
        let result = engine.discover("");
        check!(result.is_empty());
        check!(result.mode == DiscoveryMode::Exploratory);

        let result = engine.discover("java concurrency");
        check!(result.is_empty());
        check!(result.summary == "No resources found for \"java concurrency\"");
        check!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_forced_mode_skips_classification() {
        let engine = engine(vec![Resource::new("jcip", "Java Concurrency in Practice")]);
        let result = engine.discover_with_mode("concurrency", Some(DiscoveryMode::Specific), 0);
        check!(result.mode == DiscoveryMode::Specific);
        check!(result.len() == 1);
    }

    #[test]
    fn test_limit_caps_results() {
        let engine = engine(
            (0..30)
                .map(|i| Resource::new(format!("r{i:02}"), format!("Resource {i}")))
                .collect(),
        );
        check!(engine.discover("").len() == 15);
        check!(engine.discover_with_mode("", None, 4).len() == 4);
    }

    #[test]
    fn test_topic_label() {
        let intent = TopicIntent {
            concepts: [ConceptArea::Concurrency].into(),
            categories: [ResourceCategory::Java].into(),
            difficulty: None,
        };
        check!(topic_label(&intent, "x") == "Concurrency, Java");
        check!(topic_label(&TopicIntent::default(), " kotlin ") == "\"kotlin\"");
    }
}
