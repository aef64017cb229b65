//! [`SearchProvider`] implementation on top of [`DiscoveryEngine`].
//!
//! Recognized filters, all text slugs:
//! - `concept`, with optional `min_difficulty` / `max_difficulty`, routes to
//!   [`DiscoveryEngine::discover_by_concept`]
//! - `category` routes to [`DiscoveryEngine::discover_by_category`]
//!
//! Anything else goes through classification (or the forced mode).

use super::classify::DiscoveryMode;
use super::engine::{DiscoveryEngine, DiscoveryResult};
use super::profiles::DifficultyRange;
use crate::error::Result;
use crate::resource::{ConceptArea, Difficulty, Resource, ResourceCategory};
use crate::search::{ScoredItem, SearchContext, SearchMode, SearchProvider, SearchResult};
use std::sync::Arc;

impl From<SearchMode> for DiscoveryMode {
    fn from(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Specific => Self::Specific,
            SearchMode::Vague => Self::Vague,
            SearchMode::Exploratory => Self::Exploratory,
        }
    }
}

impl From<DiscoveryMode> for SearchMode {
    fn from(mode: DiscoveryMode) -> Self {
        match mode {
            DiscoveryMode::Specific => Self::Specific,
            DiscoveryMode::Vague => Self::Vague,
            DiscoveryMode::Exploratory => Self::Exploratory,
        }
    }
}

impl From<DiscoveryResult> for SearchResult<Arc<Resource>> {
    fn from(result: DiscoveryResult) -> Self {
        Self {
            mode: result.mode.into(),
            items: result
                .items
                .into_iter()
                .map(|scored| ScoredItem::new(scored.item, scored.score))
                .collect(),
            suggestions: result.suggestions,
            summary: result.summary,
        }
    }
}

/// Exposes a [`DiscoveryEngine`] through the generic search contract.
#[derive(Debug, Clone)]
pub struct DiscoveryProvider {
    engine: Arc<DiscoveryEngine>,
}

impl DiscoveryProvider {
    pub const fn new(engine: Arc<DiscoveryEngine>) -> Self {
        Self { engine }
    }

    pub const fn engine(&self) -> &Arc<DiscoveryEngine> {
        &self.engine
    }
}

impl SearchProvider<Arc<Resource>> for DiscoveryProvider {
    fn search(&self, context: &SearchContext) -> Result<SearchResult<Arc<Resource>>> {
        let limit = context
            .max_results()
            .unwrap_or_else(|| self.engine.max_results());

        if let Some(concept) = context.filter::<String>("concept")? {
            let concept: ConceptArea = concept.parse()?;
            let min = parse_optional::<Difficulty>(context, "min_difficulty")?;
            let max = parse_optional::<Difficulty>(context, "max_difficulty")?;
            let range = DifficultyRange::new(min, max)?;
            return Ok(self.engine.discover_by_concept(concept, range, limit).into());
        }

        if let Some(category) = context.filter::<String>("category")? {
            let category: ResourceCategory = category.parse()?;
            return Ok(self.engine.discover_by_category(category, limit).into());
        }

        let mode = context.forced_mode().map(DiscoveryMode::from);
        Ok(self
            .engine
            .discover_with_mode(context.query(), mode, limit)
            .into())
    }
}

fn parse_optional<T>(context: &SearchContext, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = crate::error::DiscoveryError>,
{
    context
        .filter::<String>(name)?
        .map(|value| value.parse())
        .transpose()
}
