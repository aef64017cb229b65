mod common;

use assert2::{check, let_assert};
use common::sample_engine;
use resource_discovery::DiscoveryEngine;
use resource_discovery::DiscoveryProvider;
use resource_discovery::tools::{
    DiscoverByCategoryRequest, DiscoverByConceptRequest, DiscoverRequest, FindResourcesRequest,
    ModeParam, handle_discover, handle_discover_by_category, handle_discover_by_concept,
    handle_find_resources,
};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn provider(sample_engine: Arc<DiscoveryEngine>) -> DiscoveryProvider {
    DiscoveryProvider::new(sample_engine)
}

// --- discover ---

#[rstest]
fn discover_renders_ranked_list(provider: DiscoveryProvider) {
    let request = DiscoverRequest {
        query: "JUnit 5 User Guide".to_string(),
        ..Default::default()
    };
    let_assert!(Ok(output) = handle_discover(&provider, request));
    check!(output.contains("[specific]"), "mode tag missing: {}", output);
    check!(output.contains("1. **JUnit 5 User Guide** (documentation, beginner, official)"));
    check!(output.contains("https://junit.org/junit5/docs/current/user-guide/"));
    check!(!output.contains("score: "), "breakdowns are not rendered: {}", output);
}

#[rstest]
fn discover_empty_query(provider: DiscoveryProvider) {
    let_assert!(Ok(output) = handle_discover(&provider, DiscoverRequest::default()));
    check!(output.starts_with("General recommendations"));
    check!(!output.contains("Suggestions:"));
}

#[rstest]
fn discover_forced_mode_and_limit(provider: DiscoveryProvider) {
    let request = DiscoverRequest {
        query: "spring".to_string(),
        mode: Some(ModeParam::Exploratory),
        limit: Some(1),
    };
    let_assert!(Ok(output) = handle_discover(&provider, request));
    check!(output.starts_with("Recommended 1 beginner resource(s) in Spring [exploratory]"));
    check!(output.contains("1. **Spring Guides**"));
    check!(!output.contains("2. "));
}

#[rstest]
fn discover_paid_badge(provider: DiscoveryProvider) {
    let request = DiscoverRequest {
        query: "\"Java Concurrency in Practice\"".to_string(),
        ..Default::default()
    };
    let_assert!(Ok(output) = handle_discover(&provider, request));
    check!(output.contains("**Java Concurrency in Practice** (book, advanced, paid)"));
    check!(output.contains("by Brian Goetz"));
}

// --- discover_by_concept ---

#[rstest]
fn concept_tool_ranks_by_fit(provider: DiscoveryProvider) {
    let request = DiscoverByConceptRequest {
        concept: "concurrency".to_string(),
        min_difficulty: Some("beginner".to_string()),
        max_difficulty: Some("intermediate".to_string()),
        limit: None,
    };
    let_assert!(Ok(output) = handle_discover_by_concept(&provider, request));
    check!(output.starts_with("Found 2 resource(s) related to Concurrency [vague]"));
    let basics = output.find("Java Concurrency Basics");
    let jcip = output.find("Java Concurrency in Practice");
    check!(basics < jcip);
}

#[rstest]
fn concept_tool_rejects_unknown_slug(provider: DiscoveryProvider) {
    let request = DiscoverByConceptRequest {
        concept: "quantum".to_string(),
        min_difficulty: None,
        max_difficulty: None,
        limit: None,
    };
    let_assert!(Err(error) = handle_discover_by_concept(&provider, request));
    let message = format!("{error:#}");
    check!(message.contains("cannot rank resources for concept 'quantum'"));
    check!(message.contains("concurrency"), "expected values listed: {}", message);
}

#[rstest]
fn concept_tool_rejects_inverted_range(provider: DiscoveryProvider) {
    let request = DiscoverByConceptRequest {
        concept: "testing".to_string(),
        min_difficulty: Some("expert".to_string()),
        max_difficulty: Some("beginner".to_string()),
        limit: None,
    };
    check!(handle_discover_by_concept(&provider, request).is_err());
}

// --- discover_by_category ---

#[rstest]
fn category_tool(provider: DiscoveryProvider) {
    let request = DiscoverByCategoryRequest {
        category: "Spring".to_string(),
        limit: None,
    };
    let_assert!(Ok(output) = handle_discover_by_category(&provider, request));
    check!(output.starts_with("Recommended 3 beginner resource(s) in Spring"));
    check!(output.contains("• Next step: explore intermediate Spring resources"));
}

#[rstest]
fn category_tool_rejects_unknown_slug(provider: DiscoveryProvider) {
    let request = DiscoverByCategoryRequest {
        category: "kotlin".to_string(),
        limit: None,
    };
    let_assert!(Err(error) = handle_discover_by_category(&provider, request));
    check!(format!("{error:#}").contains("cannot explore category 'kotlin'"));
}

// --- find_resources ---

#[rstest]
fn find_lists_in_title_order(provider: DiscoveryProvider) {
    let request = FindResourcesRequest {
        category: Some("spring".to_string()),
        ..Default::default()
    };
    let_assert!(Ok(output) = handle_find_resources(provider.engine().store(), &request));
    check!(output.starts_with("Showing 3 of 8 resource(s) in the catalog:"));
    let_assert!(Some(a) = output.find("`spring-reference-a`"));
    let_assert!(Some(b) = output.find("`spring-reference-b`"));
    check!(a < b);
}

#[rstest]
fn find_with_no_matches(provider: DiscoveryProvider) {
    let request = FindResourcesRequest {
        text: Some("kotlin".to_string()),
        ..Default::default()
    };
    let_assert!(Ok(output) = handle_find_resources(provider.engine().store(), &request));
    check!(output.starts_with("No resources match these filters."));
}

#[rstest]
fn find_rejects_bad_slugs(provider: DiscoveryProvider) {
    let request = FindResourcesRequest {
        difficulty: Some("wizard".to_string()),
        ..Default::default()
    };
    let_assert!(Err(error) = handle_find_resources(provider.engine().store(), &request));
    check!(format!("{error:#}").contains("invalid difficulty filter"));
}
