mod common;

use assert2::{check, let_assert};
use common::{TempFiles, bundled_catalog};
use resource_discovery::config::DiscoveryConfig;
use resource_discovery::resource::ResourceType;
use resource_discovery::{DiscoveryEngine, DiscoveryError, ResourceStore, catalog};
use std::collections::HashSet;
use std::sync::Arc;

const SMALL_CATALOG: &str = r#"[
    {"id": "spring-guides", "title": "Spring Guides", "type": "tutorial",
     "difficulty": "beginner", "categories": ["spring"], "free": true},
    {"id": "gradle-user-manual", "title": "Gradle User Manual",
     "categories": ["build"], "concepts": ["build-tools"]},
    {"id": "maven-getting-started", "title": "Maven in 5 Minutes", "type": "tutorial",
     "difficulty": "beginner", "categories": ["build"], "concepts": ["build-tools", "getting-started"]}
]"#;

// --- Catalog ---

#[test]
fn bundled_catalog_is_valid() {
    let_assert!(Ok(resources) = catalog::load(&bundled_catalog()));
    check!(resources.len() >= 20);

    let ids: HashSet<&str> = resources.iter().map(|r| r.id.as_str()).collect();
    check!(ids.len() == resources.len(), "catalog ids must be unique");
    check!(resources.iter().any(|r| r.id == "junit-5-user-guide" && r.official));
}

#[test]
fn catalog_file_populates_store() {
    let files = TempFiles::new();
    let path = files.write("catalog.json", SMALL_CATALOG);

    let store = ResourceStore::new();
    let_assert!(Ok(3) = catalog::load_into(&store, &path));
    let_assert!(Some(guides) = store.get("spring-guides"));
    check!(guides.resource_type == ResourceType::Tutorial);
    check!(guides.free);
}

#[test]
fn missing_catalog_is_io_error() {
    let files = TempFiles::new();
    let_assert!(
        Err(DiscoveryError::Io { path, .. }) = catalog::load(&files.path().join("absent.json"))
    );
    check!(path.ends_with("absent.json"));
}

#[test]
fn invalid_entry_reports_index() {
    let files = TempFiles::new();
    let path = files.write("bad.json", r#"[{"id": "ok", "title": "Fine"}, {"id": "", "title": "Nameless"}]"#);
    let_assert!(Err(error) = catalog::load(&path));
    check!(error.to_string() == "invalid catalog entry #1: missing id");
}

// --- Configuration ---

#[test]
fn config_resolves_relative_catalog() {
    let files = TempFiles::new();
    files.write("data/catalog.json", SMALL_CATALOG);
    let config_path = files.write(
        "config.toml",
        "[discovery]\nmax_results = 2\ncatalog = \"data/catalog.json\"\n",
    );

    let_assert!(Ok(config) = DiscoveryConfig::load(&config_path));
    check!(config.discovery.max_results == 2);
    check!(config.discovery.catalog == Some(files.path().join("data/catalog.json")));

    let_assert!(Ok(reloaded) = DiscoveryConfig::load_or_default(Some(&config_path)));
    check!(reloaded == config);
}

#[test]
fn config_absolute_catalog_is_kept() {
    let files = TempFiles::new();
    let catalog_path = files.write("elsewhere/catalog.json", SMALL_CATALOG);
    let config_path = files.write(
        "conf/config.toml",
        &format!("[discovery]\ncatalog = {:?}\n", catalog_path.display().to_string()),
    );

    let_assert!(Ok(config) = DiscoveryConfig::load(&config_path));
    check!(config.discovery.catalog == Some(catalog_path));
}

#[test]
fn missing_config_file_is_an_error() {
    let files = TempFiles::new();
    let missing = files.path().join("nope.toml");
    check!(matches!(
        DiscoveryConfig::load_or_default(Some(&missing)),
        Err(DiscoveryError::Io { .. })
    ));
}

#[test]
fn malformed_config_is_rejected() {
    let files = TempFiles::new();
    let path = files.write("config.toml", "[discovery\nmax_results = ");
    check!(matches!(DiscoveryConfig::load(&path), Err(DiscoveryError::Config(_))));
}

#[test]
fn engine_follows_configuration() {
    let files = TempFiles::new();
    let catalog_path = files.write("catalog.json", SMALL_CATALOG);
    let config_path = files.write(
        "config.toml",
        "[discovery]\nmax_results = 1\ncatalog = \"catalog.json\"\n\n[profiles.exploratory]\ngetting_started = 100\n",
    );
    let_assert!(Ok(config) = DiscoveryConfig::load(&config_path));
    check!(config.discovery.catalog.as_deref() == Some(catalog_path.as_path()));

    let store = Arc::new(ResourceStore::new());
    let_assert!(Ok(_) = catalog::load_into(&store, &catalog_path));
    let_assert!(Ok(engine) = DiscoveryEngine::new(store, &config));
    engine.refresh_statistics();

    let result = engine.discover("");
    check!(result.len() == 1);
    let_assert!(Some(first) = result.resources().next());
    check!(first.id == "maven-getting-started");
}
