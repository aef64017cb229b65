//! Domain-agnostic request and response values for ranked search.

use crate::error::{DiscoveryError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Result-count ceiling applied when a caller does not supply one.
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// The classified shape of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// The user is looking for one particular thing.
    Specific,
    /// The user describes a topic in loose terms.
    Vague,
    /// The user wants recommendations rather than matches.
    Exploratory,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Specific => "specific",
            Self::Vague => "vague",
            Self::Exploratory => "exploratory",
        })
    }
}

/// A typed filter parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Flag(bool),
    List(Vec<String>),
}

impl FilterValue {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Flag(_) => "flag",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Extraction of a concrete Rust type from a [`FilterValue`].
pub trait FromFilterValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_filter_value(value: &FilterValue) -> Option<Self>;
}

impl FromFilterValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_filter_value(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromFilterValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_filter_value(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromFilterValue for bool {
    const TYPE_NAME: &'static str = "flag";

    fn from_filter_value(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl FromFilterValue for Vec<String> {
    const TYPE_NAME: &'static str = "list";

    fn from_filter_value(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// An immutable search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    query: String,
    forced_mode: Option<SearchMode>,
    filters: BTreeMap<String, FilterValue>,
    max_results: Option<usize>,
}

impl SearchContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            forced_mode: None,
            filters: BTreeMap::new(),
            max_results: None,
        }
    }

    /// Skip classification and run `mode` directly.
    #[must_use]
    pub const fn with_mode(mut self, mode: SearchMode) -> Self {
        self.forced_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Set the result-count ceiling. Zero restores the default.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = if max_results == 0 {
            None
        } else {
            Some(max_results)
        };
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn forced_mode(&self) -> Option<SearchMode> {
        self.forced_mode
    }

    /// The caller's result ceiling; `None` leaves it to the provider.
    pub const fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Look up a filter by the type the caller expects.
    ///
    /// Absent filters yield `Ok(None)`; a filter stored with a different type
    /// is an error rather than a silent miss.
    pub fn filter<T: FromFilterValue>(&self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.filters.get(name) else {
            return Ok(None);
        };

        T::from_filter_value(value)
            .map(Some)
            .ok_or_else(|| DiscoveryError::FilterType {
                name: name.to_string(),
                expected: T::TYPE_NAME,
                actual: value.type_name(),
            })
    }
}

/// Diagnostic record of how a score was assembled, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    components: Vec<(&'static str, u32)>,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `points` under `component`. Zero-point components are skipped;
    /// repeated components accumulate into their first position.
    pub fn add(&mut self, component: &'static str, points: u32) {
        if points == 0 {
            return;
        }
        match self.components.iter_mut().find(|(name, _)| *name == component) {
            Some((_, existing)) => *existing = existing.saturating_add(points),
            None => self.components.push((component, points)),
        }
    }

    pub fn get(&self, component: &str) -> u32 {
        self.components
            .iter()
            .find(|(name, _)| *name == component)
            .map_or(0, |(_, points)| *points)
    }

    pub fn total(&self) -> u32 {
        self.components
            .iter()
            .fold(0u32, |sum, (_, points)| sum.saturating_add(*points))
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.components.iter().copied()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .components
            .iter()
            .map(|(name, points)| format!("{name}={points}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// An item paired with its non-negative relevance score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem<T> {
    pub item: T,
    pub score: u32,
    pub breakdown: Option<ScoreBreakdown>,
}

impl<T> ScoredItem<T> {
    pub const fn new(item: T, score: u32) -> Self {
        Self {
            item,
            score,
            breakdown: None,
        }
    }

    /// Build from a signed raw score, clamping negatives to zero.
    pub fn clamped(item: T, raw_score: i64) -> Self {
        Self::new(item, raw_score.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Build from a breakdown; the score is the breakdown total.
    pub fn from_breakdown(item: T, breakdown: ScoreBreakdown) -> Self {
        Self {
            item,
            score: breakdown.total(),
            breakdown: Some(breakdown),
        }
    }

    /// Drop the breakdown and convert the item.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScoredItem<U> {
        ScoredItem::new(f(self.item), self.score)
    }
}

/// An immutable search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<T> {
    pub mode: SearchMode,
    pub items: Vec<ScoredItem<T>>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

impl<T> SearchResult<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A ranked-search service over items of type `T`.
pub trait SearchProvider<T> {
    fn search(&self, context: &SearchContext) -> Result<SearchResult<T>>;

    /// Search with a raw query and default settings.
    fn search_query(&self, query: &str) -> Result<SearchResult<T>> {
        self.search(&SearchContext::new(query))
    }
}
