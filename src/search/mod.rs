//! Domain-agnostic ranking infrastructure.
//!
//! This module provides tokenization, fuzzy matching primitives, pluggable
//! scoring strategies (text fields, tags, BM25, weighted composites) and the
//! generic request/response contract used by [`SearchProvider`].

pub mod bm25;
pub mod context;
pub mod fuzzy;
pub mod scoring;
pub mod tokenize;

pub use bm25::{Bm25Params, Bm25Scorer, CorpusStatistics, StatisticsState};
pub use context::{
    DEFAULT_MAX_RESULTS, FilterValue, FromFilterValue, ScoreBreakdown, ScoredItem, SearchContext,
    SearchMode, SearchProvider, SearchResult,
};
pub use fuzzy::FuzzyConfig;
pub use scoring::{
    CompositeScorer, ScoringStrategy, Searchable, TagScorer, TagWeights, TextFieldScorer,
    WeightPreset, WeightProfile,
};
pub use tokenize::{Tokenizer, TokenizerConfig};
