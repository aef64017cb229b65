//! Ranked discovery tools.

use crate::discovery::DiscoveryProvider;
use crate::format::format_search_result;
use crate::search::{SearchContext, SearchMode, SearchProvider};
use anyhow::Context as _;
use rmcp::schemars;
use serde::Deserialize;

/// Intent override for the discover tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModeParam {
    /// Look up one particular resource by title, id or URL
    Specific,
    /// Topic search guided by inferred concepts and categories
    Vague,
    /// Recommendations around a difficulty level
    Exploratory,
}

impl From<ModeParam> for SearchMode {
    fn from(mode: ModeParam) -> Self {
        match mode {
            ModeParam::Specific => Self::Specific,
            ModeParam::Vague => Self::Vague,
            ModeParam::Exploratory => Self::Exploratory,
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DiscoverRequest {
    /// Free-text query. Leave empty for general recommendations.
    #[serde(default)]
    pub query: String,
    /// Skip intent classification and use this mode
    pub mode: Option<ModeParam>,
    /// Maximum number of results (default: 15)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DiscoverByConceptRequest {
    /// Concept slug, e.g. "concurrency", "design-patterns", "testing"
    pub concept: String,
    /// Easiest difficulty that fits: beginner, intermediate, advanced or expert
    pub min_difficulty: Option<String>,
    /// Hardest difficulty that fits
    pub max_difficulty: Option<String>,
    /// Maximum number of results (default: 15)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DiscoverByCategoryRequest {
    /// Category slug, e.g. "java", "spring", "testing", "cloud"
    pub category: String,
    /// Maximum number of results (default: 15)
    pub limit: Option<usize>,
}

/// Classify and answer a free-text query.
pub fn handle_discover(
    provider: &DiscoveryProvider,
    request: DiscoverRequest,
) -> anyhow::Result<String> {
    let mut context = SearchContext::new(request.query.as_str())
        .with_max_results(request.limit.unwrap_or_default());
    if let Some(mode) = request.mode {
        context = context.with_mode(mode.into());
    }

    let result = provider
        .search(&context)
        .with_context(|| format!("discovery failed for '{}'", request.query))?;
    Ok(format_search_result(&result))
}

/// Rank the resources teaching one concept.
pub fn handle_discover_by_concept(
    provider: &DiscoveryProvider,
    request: DiscoverByConceptRequest,
) -> anyhow::Result<String> {
    let mut context = SearchContext::new("")
        .with_filter("concept", request.concept.as_str())
        .with_max_results(request.limit.unwrap_or_default());
    if let Some(min) = request.min_difficulty {
        context = context.with_filter("min_difficulty", min);
    }
    if let Some(max) = request.max_difficulty {
        context = context.with_filter("max_difficulty", max);
    }

    let result = provider
        .search(&context)
        .with_context(|| format!("cannot rank resources for concept '{}'", request.concept))?;
    Ok(format_search_result(&result))
}

/// Beginner-first recommendations inside one category.
pub fn handle_discover_by_category(
    provider: &DiscoveryProvider,
    request: DiscoverByCategoryRequest,
) -> anyhow::Result<String> {
    let context = SearchContext::new("")
        .with_filter("category", request.category.as_str())
        .with_max_results(request.limit.unwrap_or_default());

    let result = provider
        .search(&context)
        .with_context(|| format!("cannot explore category '{}'", request.category))?;
    Ok(format_search_result(&result))
}
