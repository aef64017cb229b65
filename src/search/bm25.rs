//! Okapi BM25 scoring over an in-memory corpus.
//!
//! `score = Σ_t IDF(t) · tf·(k1+1) / (tf + k1·(1 - b + b·|D|/avgdl))`
//! with `IDF(t) = ln((N - df + 0.5)/(df + 0.5) + 1)`.
//!
//! Corpus statistics are computed in one pass and published as an immutable
//! snapshot through an [`ArcSwapOption`], so readers always see either no
//! statistics or one complete set.

use super::context::SearchContext;
use super::scoring::{ScoringStrategy, Searchable};
use super::tokenize::Tokenizer;
use crate::error::{DiscoveryError, Result};
use ahash::{AHashMap, AHashSet};
use arc_swap::ArcSwapOption;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Length normalization: 0 disables it, 1 normalizes fully.
    pub b: f64,
    /// Multiplier applied before truncating to an integer score.
    pub scale: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            scale: 10.0,
        }
    }
}

impl Bm25Params {
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 <= 0.0 {
            return Err(DiscoveryError::invalid("k1", format!("must be positive, got {}", self.k1)));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(DiscoveryError::invalid("b", format!("must be within [0, 1], got {}", self.b)));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DiscoveryError::invalid(
                "scale",
                format!("must be positive, got {}", self.scale),
            ));
        }
        Ok(())
    }
}

/// Contribution of a single term to a document's BM25 score.
pub fn term_score(tf: f64, idf: f64, doc_length: f64, avg_doc_length: f64, params: &Bm25Params) -> f64 {
    if tf <= 0.0 {
        return 0.0;
    }
    let relative_length = if avg_doc_length > 0.0 {
        doc_length / avg_doc_length
    } else {
        1.0
    };
    let length_norm = 1.0 - params.b + params.b * relative_length;
    idf * (tf * (params.k1 + 1.0)) / (tf + params.k1 * length_norm)
}

/// BM25 IDF with +1 smoothing so it is always positive.
pub fn idf(doc_freq: usize, total_docs: usize) -> f64 {
    let n = total_docs as f64;
    let df = doc_freq as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Snapshot of per-term document frequencies and document lengths.
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    document_frequency: AHashMap<String, usize>,
    document_count: usize,
    average_length: f64,
}

impl CorpusStatistics {
    /// Tokenize every document once and collect the statistics.
    pub fn compute<'a, T, I>(tokenizer: &Tokenizer, documents: I) -> Self
    where
        T: Searchable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut document_count = 0usize;
        let mut total_length = 0usize;

        for document in documents {
            let terms = document_terms(tokenizer, document);
            total_length += terms.len();
            document_count += 1;

            let unique: AHashSet<&String> = terms.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let average_length = if document_count == 0 {
            0.0
        } else {
            total_length as f64 / document_count as f64
        };

        Self {
            document_frequency,
            document_count,
            average_length,
        }
    }

    pub const fn document_count(&self) -> usize {
        self.document_count
    }

    pub const fn average_length(&self) -> f64 {
        self.average_length
    }

    pub fn term_count(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn idf(&self, term: &str) -> f64 {
        idf(self.document_frequency(term), self.document_count)
    }
}

/// Whether BM25 statistics are available.
#[derive(Debug, Clone)]
pub enum StatisticsState {
    NotReady,
    Ready(Arc<CorpusStatistics>),
}

impl StatisticsState {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// BM25 scorer with an atomically replaceable statistics snapshot.
#[derive(Debug)]
pub struct Bm25Scorer {
    params: Bm25Params,
    tokenizer: Arc<Tokenizer>,
    statistics: ArcSwapOption<CorpusStatistics>,
}

impl Bm25Scorer {
    pub fn new(params: Bm25Params) -> Self {
        Self::with_tokenizer(params, Arc::new(Tokenizer::default()))
    }

    pub fn with_tokenizer(params: Bm25Params, tokenizer: Arc<Tokenizer>) -> Self {
        Self {
            params,
            tokenizer,
            statistics: ArcSwapOption::empty(),
        }
    }

    pub const fn params(&self) -> &Bm25Params {
        &self.params
    }

    /// Recompute statistics over `documents` and publish them.
    pub fn compute_statistics<'a, T, I>(&self, documents: I) -> Arc<CorpusStatistics>
    where
        T: Searchable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let start = Instant::now();
        let statistics = Arc::new(CorpusStatistics::compute(&self.tokenizer, documents));
        self.statistics.store(Some(Arc::clone(&statistics)));

        tracing::info!(
            "Computed BM25 statistics: {} documents, {} unique terms, avg length {:.1} in {:?}",
            statistics.document_count(),
            statistics.term_count(),
            statistics.average_length(),
            start.elapsed()
        );
        statistics
    }

    /// Drop the current statistics. Scoring reports not-ready until the next
    /// [`Bm25Scorer::compute_statistics`].
    pub fn invalidate(&self) {
        self.statistics.store(None);
    }

    pub fn state(&self) -> StatisticsState {
        match self.statistics.load_full() {
            Some(statistics) => StatisticsState::Ready(statistics),
            None => StatisticsState::NotReady,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.statistics.load().is_some()
    }

    /// Unscaled BM25 value of `item` for `query`.
    pub fn raw_score<T: Searchable>(&self, item: &T, query: &str) -> Result<f64> {
        let statistics = self
            .statistics
            .load_full()
            .ok_or(DiscoveryError::StatisticsNotReady)?;

        let query_terms: BTreeSet<String> = self.tokenizer.terms(query).collect();
        if query_terms.is_empty() {
            return Ok(0.0);
        }

        let terms = document_terms(&self.tokenizer, item);
        let doc_length = terms.len() as f64;
        let mut frequencies: AHashMap<&str, usize> = AHashMap::with_capacity(terms.len());
        for term in &terms {
            *frequencies.entry(term.as_str()).or_insert(0) += 1;
        }

        Ok(query_terms
            .iter()
            .map(|term| {
                let tf = frequencies.get(term.as_str()).copied().unwrap_or(0) as f64;
                term_score(
                    tf,
                    statistics.idf(term),
                    doc_length,
                    statistics.average_length(),
                    &self.params,
                )
            })
            .sum())
    }

    /// Scaled and truncated BM25 score; fails when statistics are missing.
    pub fn try_score<T: Searchable>(&self, item: &T, query: &str) -> Result<u32> {
        let raw = self.raw_score(item, query)?;
        Ok((raw * self.params.scale).max(0.0) as u32)
    }
}

impl<T: Searchable> ScoringStrategy<T> for Bm25Scorer {
    fn name(&self) -> &'static str {
        "bm25"
    }

    /// Scores 0 while statistics are missing; use [`Bm25Scorer::try_score`]
    /// or [`Bm25Scorer::state`] to tell that apart from a genuine miss.
    fn score(&self, item: &T, context: &SearchContext) -> u32 {
        match self.try_score(item, context.query()) {
            Ok(score) => score,
            Err(e) => {
                tracing::trace!("BM25 score for '{}' unavailable: {}", item.id(), e);
                0
            }
        }
    }
}

/// Terms of title, body and tags, in that order.
fn document_terms<T: Searchable + ?Sized>(tokenizer: &Tokenizer, document: &T) -> Vec<String> {
    let mut terms = tokenizer.tokenize(document.title());
    terms.extend(tokenizer.terms(document.body()));
    for tag in document.tags() {
        terms.extend(tokenizer.terms(tag));
    }
    terms
}
