mod common;

use assert2::{check, let_assert};
use common::sample_store;
use resource_discovery::resource::{Difficulty, Resource, ResourceCategory, ResourceType};
use resource_discovery::{DiscoveryError, ResourceFilter, ResourceStore};
use rstest::rstest;
use std::sync::Arc;

fn ids(resources: &[Arc<Resource>]) -> Vec<&str> {
    resources.iter().map(|r| r.id.as_str()).collect()
}

/// Identical titles keep a stable order by id.
#[rstest]
fn identical_titles_ordered_by_id(sample_store: Arc<ResourceStore>) {
    let spring = sample_store.filter(&ResourceFilter::new().category(ResourceCategory::Spring));
    check!(ids(&spring) == ["spring-guides", "spring-reference-a", "spring-reference-b"]);
}

#[rstest]
fn filters_combine(sample_store: Arc<ResourceStore>) {
    let filter = ResourceFilter::new()
        .category(ResourceCategory::Java)
        .difficulty(Difficulty::Beginner)
        .free_only(true);
    check!(ids(&sample_store.filter(&filter)) == ["java-concurrency-basics", "dev-java-learn"]);

    let books = sample_store.filter(&ResourceFilter::new().resource_type(ResourceType::Book));
    check!(ids(&books) == ["jcip"]);
}

#[rstest]
fn text_filter_searches_author_and_tags(sample_store: Arc<ResourceStore>) {
    check!(ids(&sample_store.filter(&ResourceFilter::new().text("goetz"))) == ["jcip"]);
    check!(
        ids(&sample_store.filter(&ResourceFilter::new().text("QUICKSTART"))) == ["spring-guides"]
    );
}

#[rstest]
fn tag_filter_requires_every_tag(sample_store: Arc<ResourceStore>) {
    let both = ResourceFilter::new().tags(["junit", "testing"]);
    check!(sample_store.filter(&both).len() == 2);

    let none = ResourceFilter::new().tags(["junit", "threads"]);
    check!(sample_store.filter(&none).is_empty());
}

#[rstest]
fn limit_applies_after_sorting(sample_store: Arc<ResourceStore>) {
    let first = sample_store.filter(&ResourceFilter::new().limit(1));
    check!(ids(&first) == ["java-concurrency-basics"]);
}

#[test]
fn invalid_resources_are_rejected() {
    let store = ResourceStore::new();
    check!(matches!(
        store.insert(Resource::new("", "Untitled id")),
        Err(DiscoveryError::InvalidArgument { .. })
    ));
    check!(matches!(
        store.insert(Resource::new("no-title", "  ")),
        Err(DiscoveryError::InvalidArgument { .. })
    ));
    check!(store.is_empty());
}

#[test]
fn concurrent_inserts_and_reads() {
    let store = Arc::new(ResourceStore::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let id = format!("w{worker}-r{i:02}");
                    let_assert!(Ok(None) = store.insert(Resource::new(id.as_str(), "Shared title")));
                    check!(store.contains(&id));
                    let _ = store.all();
                }
            })
        })
        .collect();

    for handle in handles {
        let_assert!(Ok(()) = handle.join());
    }

    check!(store.len() == 400);
    let all = store.all();
    check!(all.windows(2).all(|pair| pair[0].id < pair[1].id));
}
