//! Unranked catalog filtering.

use crate::format::format_resource_list;
use crate::resource::{Difficulty, ResourceCategory, ResourceType};
use crate::store::{ResourceFilter, ResourceStore};
use anyhow::Context as _;
use rmcp::schemars;
use serde::Deserialize;

/// Listing cap when the request does not set one.
const DEFAULT_FIND_LIMIT: usize = 25;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindResourcesRequest {
    /// Case-insensitive text contained in title, description, tags or author
    pub text: Option<String>,
    /// Content format, e.g. "book", "tutorial", "documentation"
    pub resource_type: Option<String>,
    /// Category slug, e.g. "spring"
    pub category: Option<String>,
    /// Exact difficulty: beginner, intermediate, advanced or expert
    pub difficulty: Option<String>,
    /// Resources must carry every one of these tags
    pub tags: Option<Vec<String>>,
    /// Only resources that are free to access
    #[serde(default)]
    pub free_only: bool,
    /// Maximum number of results (default: 25)
    pub limit: Option<usize>,
}

impl FindResourcesRequest {
    /// Translate the request into a store filter, validating every slug.
    pub fn to_filter(&self) -> anyhow::Result<ResourceFilter> {
        let mut filter = ResourceFilter::new()
            .free_only(self.free_only)
            .limit(self.limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_FIND_LIMIT));

        if let Some(text) = &self.text {
            filter = filter.text(text.as_str());
        }
        if let Some(resource_type) = &self.resource_type {
            let resource_type: ResourceType =
                resource_type.parse().context("invalid resource_type filter")?;
            filter = filter.resource_type(resource_type);
        }
        if let Some(category) = &self.category {
            let category: ResourceCategory = category.parse().context("invalid category filter")?;
            filter = filter.category(category);
        }
        if let Some(difficulty) = &self.difficulty {
            let difficulty: Difficulty = difficulty.parse().context("invalid difficulty filter")?;
            filter = filter.difficulty(difficulty);
        }
        if let Some(tags) = &self.tags {
            filter = filter.tags(tags);
        }
        Ok(filter)
    }
}

/// List catalog entries matching every given filter, ordered by title.
pub fn handle_find_resources(
    store: &ResourceStore,
    request: &FindResourcesRequest,
) -> anyhow::Result<String> {
    let filter = request.to_filter()?;
    let resources = store.filter(&filter);
    tracing::debug!("find_resources matched {} resource(s)", resources.len());
    Ok(format_resource_list(&resources, store.len()))
}
