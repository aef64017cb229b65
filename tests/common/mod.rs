//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_store`: a small hand-built corpus with known scores
//! - `sample_engine`: a [`DiscoveryEngine`] over `sample_store` with BM25
//!   statistics computed
//! - `catalog_engine`: an engine over the bundled `data/catalog.json`
//!
//! [`TempDir`]-backed helpers write config and catalog files for loader tests.

#![allow(dead_code)] // Each integration test crate uses a different subset

use resource_discovery::resource::{
    ConceptArea, Difficulty, Resource, ResourceCategory, ResourceType,
};
use resource_discovery::{DiscoveryEngine, ResourceStore, catalog};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The catalog shipped with the crate.
pub fn bundled_catalog() -> PathBuf {
    project_root().join("data").join("catalog.json")
}

/// Resources with predictable relevance for each discovery mode.
pub fn sample_resources() -> Vec<Resource> {
    vec![
        Resource::new("junit-5-user-guide", "JUnit 5 User Guide")
            .with_description("The official guide to writing tests with JUnit Jupiter.")
            .with_url("https://junit.org/junit5/docs/current/user-guide/")
            .with_tags(["junit", "testing"])
            .with_concepts([ConceptArea::Testing])
            .with_categories([ResourceCategory::Testing])
            .with_type(ResourceType::Documentation)
            .with_difficulty(Difficulty::Beginner)
            .official(true)
            .maintained(true)
            .free(true),
        Resource::new("junit-4-faq", "JUnit 4 FAQ")
            .with_description("Frequently asked questions about the legacy JUnit 4 runner.")
            .with_tags(["junit", "testing"])
            .with_concepts([ConceptArea::Testing])
            .with_categories([ResourceCategory::Testing])
            .with_type(ResourceType::Article)
            .with_difficulty(Difficulty::Intermediate)
            .free(true),
        Resource::new("jcip", "Java Concurrency in Practice")
            .with_description("Threads, locks and the java memory model.")
            .with_author("Brian Goetz")
            .with_tags(["concurrency", "threads"])
            .with_concepts([ConceptArea::Concurrency])
            .with_categories([ResourceCategory::Java])
            .with_type(ResourceType::Book)
            .with_difficulty(Difficulty::Advanced),
        Resource::new("java-concurrency-basics", "Java Concurrency Basics")
            .with_description("A gentle introduction to executors and synchronization.")
            .with_tags(["concurrency", "executor"])
            .with_concepts([ConceptArea::Concurrency, ConceptArea::GettingStarted])
            .with_categories([ResourceCategory::Java])
            .with_type(ResourceType::Tutorial)
            .with_difficulty(Difficulty::Beginner)
            .maintained(true)
            .free(true),
        Resource::new("dev-java-learn", "Learn Java on Dev.java")
            .with_description("Official tutorials from the first program to records.")
            .with_tags(["tutorial", "basics"])
            .with_concepts([ConceptArea::GettingStarted, ConceptArea::LanguageBasics])
            .with_categories([ResourceCategory::Java])
            .with_type(ResourceType::Tutorial)
            .with_difficulty(Difficulty::Beginner)
            .official(true)
            .maintained(true)
            .free(true),
        Resource::new("spring-guides", "Spring Guides")
            .with_description("Build a working application in minutes.")
            .with_tags(["spring", "quickstart"])
            .with_concepts([ConceptArea::GettingStarted, ConceptArea::WebServices])
            .with_categories([ResourceCategory::Spring])
            .with_type(ResourceType::Tutorial)
            .with_difficulty(Difficulty::Beginner)
            .official(true)
            .maintained(true)
            .free(true),
        Resource::new("spring-reference-b", "Spring Reference")
            .with_description("Second edition of the reference.")
            .with_categories([ResourceCategory::Spring])
            .with_type(ResourceType::Documentation),
        Resource::new("spring-reference-a", "Spring Reference")
            .with_description("First edition of the reference.")
            .with_categories([ResourceCategory::Spring])
            .with_type(ResourceType::Documentation),
    ]
}

#[fixture]
pub fn sample_store() -> Arc<ResourceStore> {
    let store = Arc::new(ResourceStore::new());
    for resource in sample_resources() {
        store
            .insert(resource)
            .expect("sample resources are valid");
    }
    store
}

#[fixture]
pub fn sample_engine(sample_store: Arc<ResourceStore>) -> Arc<DiscoveryEngine> {
    let engine =
        DiscoveryEngine::with_defaults(sample_store).expect("default configuration is valid");
    engine.refresh_statistics();
    Arc::new(engine)
}

#[fixture]
pub fn catalog_engine() -> Arc<DiscoveryEngine> {
    let store = Arc::new(ResourceStore::new());
    catalog::load_into(&store, &bundled_catalog()).expect("bundled catalog loads");
    let engine = DiscoveryEngine::with_defaults(store).expect("default configuration is valid");
    engine.refresh_statistics();
    Arc::new(engine)
}

/// A temporary directory for config and catalog files.
pub struct TempFiles {
    _temp: TempDir,
    root: PathBuf,
}

impl TempFiles {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TempFiles {
    fn default() -> Self {
        Self::new()
    }
}
