//! Concurrent in-memory resource store.

use crate::error::{DiscoveryError, Result};
use crate::resource::{Difficulty, Resource, ResourceCategory, ResourceType};
use dashmap::DashMap;
use std::cmp::Ordering;
use std::sync::Arc;

/// Thread-safe resource store keyed by resource id.
///
/// Reads and writes may interleave freely; each insert or remove is atomic
/// per key. Listing operations return a deterministic order.
#[derive(Debug, Default)]
pub struct ResourceStore {
    resources: DashMap<String, Arc<Resource>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a resource, returning the one it replaced.
    pub fn insert(&self, resource: impl Into<Arc<Resource>>) -> Result<Option<Arc<Resource>>> {
        let resource = resource.into();
        if resource.id.trim().is_empty() {
            return Err(DiscoveryError::invalid("id", "must not be empty"));
        }
        if resource.title.trim().is_empty() {
            return Err(DiscoveryError::invalid("title", "must not be empty"));
        }
        Ok(self.resources.insert(resource.id.clone(), resource))
    }

    pub fn get(&self, id: &str) -> Option<Arc<Resource>> {
        self.resources.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Resource>> {
        self.resources.remove(id).map(|(_, resource)| resource)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Every resource, in listing order.
    pub fn all(&self) -> Vec<Arc<Resource>> {
        self.filter(&ResourceFilter::default())
    }

    /// Resources matching every criterion of `filter`, in listing order,
    /// capped at the filter limit.
    pub fn filter(&self, filter: &ResourceFilter) -> Vec<Arc<Resource>> {
        let mut matches: Vec<Arc<Resource>> = self
            .resources
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        matches.sort_by(|a, b| listing_order(a, b));
        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }
        matches
    }
}

/// Title ignoring case, then id.
fn listing_order(a: &Resource, b: &Resource) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

/// Composite store filter. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    text: Option<String>,
    resource_type: Option<ResourceType>,
    category: Option<ResourceCategory>,
    difficulty: Option<Difficulty>,
    tags: Vec<String>,
    free_only: bool,
    limit: Option<usize>,
}

impl ResourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive containment in title, description, tags or author.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_lowercase();
        self.text = (!text.is_empty()).then_some(text);
        self
    }

    #[must_use]
    pub const fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: ResourceCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Require every one of `tags`, ignoring case.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub const fn free_only(mut self, free_only: bool) -> Self {
        self.free_only = free_only;
        self
    }

    /// Cap the number of results. Applied after ordering.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        if self.free_only && !resource.free {
            return false;
        }
        if self.resource_type.is_some_and(|t| t != resource.resource_type) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != resource.difficulty) {
            return false;
        }
        if self.category.is_some_and(|c| !resource.belongs_to(c)) {
            return false;
        }
        if !self.tags.is_empty() {
            let tags: Vec<String> = resource.tags.iter().map(|t| t.to_lowercase()).collect();
            if !self.tags.iter().all(|wanted| tags.contains(wanted)) {
                return false;
            }
        }
        match &self.text {
            Some(text) => resource.full_text().contains(text.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn resource(id: &str, title: &str) -> Resource {
        Resource::new(id, title)
    }

    #[test]
    fn test_insert_replace_and_remove() {
        let store = ResourceStore::new();
        let_assert!(Ok(None) = store.insert(resource("a", "First")));
        let_assert!(Ok(Some(previous)) = store.insert(resource("a", "Second")));
        check!(previous.title == "First");
        check!(store.len() == 1);
        check!(store.get("a").map(|r| r.title.clone()).as_deref() == Some("Second"));

        check!(store.remove("a").is_some());
        check!(store.remove("a").is_none());
        check!(store.is_empty());
    }

    #[test]
    fn test_insert_rejects_missing_fields() {
        let store = ResourceStore::new();
        check!(store.insert(resource("", "Title")).is_err());
        check!(store.insert(resource("id", "  ")).is_err());
        check!(store.is_empty());
    }

    #[test]
    fn test_listing_order_ignores_case() {
        let store = ResourceStore::new();
        for (id, title) in [("3", "spring in action"), ("1", "Effective Java"), ("2", "Baeldung")] {
            let_assert!(Ok(_) = store.insert(resource(id, title)));
        }
        let titles: Vec<String> = store.all().iter().map(|r| r.title.clone()).collect();
        check!(titles == ["Baeldung", "Effective Java", "spring in action"]);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let store = ResourceStore::new();
        let_assert!(
            Ok(_) = store.insert(
                resource("mockito", "Mockito Docs")
                    .with_tags(["Mocking", "testing"])
                    .with_categories([ResourceCategory::Testing])
                    .with_type(ResourceType::Documentation)
                    .free(true)
            )
        );
        let_assert!(
            Ok(_) = store.insert(
                resource("tdd-book", "Test Driven Development")
                    .with_tags(["testing", "tdd"])
                    .with_author("Kent Beck")
                    .with_categories([ResourceCategory::Testing])
                    .with_type(ResourceType::Book)
            )
        );

        let ids = |filter: ResourceFilter| -> Vec<String> {
            store.filter(&filter).iter().map(|r| r.id.clone()).collect()
        };

        check!(ids(ResourceFilter::new().category(ResourceCategory::Testing)).len() == 2);
        check!(ids(ResourceFilter::new().free_only(true)) == ["mockito"]);
        check!(ids(ResourceFilter::new().resource_type(ResourceType::Book)) == ["tdd-book"]);
        check!(ids(ResourceFilter::new().tags(["TESTING", "mocking"])) == ["mockito"]);
        check!(ids(ResourceFilter::new().text("kent beck")) == ["tdd-book"]);
        check!(ids(ResourceFilter::new().difficulty(Difficulty::Expert)).is_empty());
        check!(ids(ResourceFilter::new().limit(1)) == ["mockito"]);
    }
}
