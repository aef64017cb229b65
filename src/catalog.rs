//! JSON resource catalogs.
//!
//! A catalog is a JSON array of resources:
//!
//! ```json
//! [
//!   {
//!     "id": "jcip",
//!     "title": "Java Concurrency in Practice",
//!     "type": "book",
//!     "difficulty": "advanced",
//!     "concepts": ["concurrency"],
//!     "categories": ["java"]
//!   }
//! ]
//! ```

use crate::error::{DiscoveryError, Result};
use crate::resource::Resource;
use crate::store::ResourceStore;
use std::path::Path;

/// Parse and validate a catalog document.
pub fn parse(source: &str) -> Result<Vec<Resource>> {
    let resources: Vec<Resource> = serde_json::from_str(source)?;
    for (index, resource) in resources.iter().enumerate() {
        validate(index, resource)?;
    }
    Ok(resources)
}

/// Read, parse and validate a catalog file.
pub fn load(path: &Path) -> Result<Vec<Resource>> {
    let source = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

/// Insert `resources` into `store`, returning how many were inserted.
/// A duplicate id replaces the earlier entry.
pub fn populate(store: &ResourceStore, resources: Vec<Resource>) -> Result<usize> {
    let mut inserted = 0;
    for resource in resources {
        let id = resource.id.clone();
        if store.insert(resource)?.is_some() {
            tracing::warn!("Duplicate resource id '{}', keeping the later entry", id);
        }
        inserted += 1;
    }
    Ok(inserted)
}

/// Load the catalog at `path` into `store`.
pub fn load_into(store: &ResourceStore, path: &Path) -> Result<usize> {
    let resources = load(path)?;
    let count = populate(store, resources)?;
    tracing::info!(
        "Loaded {} catalog entries from {} ({} unique)",
        count,
        path.display(),
        store.len()
    );
    Ok(count)
}

fn validate(index: usize, resource: &Resource) -> Result<()> {
    if resource.id.trim().is_empty() {
        return Err(DiscoveryError::Catalog {
            index,
            reason: "missing id".to_string(),
        });
    }
    if resource.title.trim().is_empty() {
        return Err(DiscoveryError::Catalog {
            index,
            reason: format!("resource '{}' has an empty title", resource.id),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ConceptArea, Difficulty, ResourceType};
    use assert2::{check, let_assert};

    #[test]
    fn test_parse_applies_defaults() {
        let source = r#"[
            {"id": "jcip", "title": "Java Concurrency in Practice", "type": "book",
             "difficulty": "advanced", "concepts": ["concurrency"], "official": false},
            {"id": "dev-java", "title": "Dev.java"}
        ]"#;
        let_assert!(Ok(resources) = parse(source));
        check!(resources.len() == 2);
        check!(resources[0].resource_type == ResourceType::Book);
        check!(resources[0].difficulty == Difficulty::Advanced);
        check!(resources[0].concepts == [ConceptArea::Concurrency]);
        check!(resources[1].difficulty == Difficulty::Intermediate);
        check!(resources[1].tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_title() {
        let_assert!(
            Err(DiscoveryError::Catalog { index, .. }) =
                parse(r#"[{"id": "a", "title": "A"}, {"id": "b", "title": " "}]"#)
        );
        check!(index == 1);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        check!(matches!(parse("{"), Err(DiscoveryError::CatalogFormat(_))));
        check!(matches!(
            parse(r#"[{"id": "a", "title": "A", "difficulty": "wizard"}]"#),
            Err(DiscoveryError::CatalogFormat(_))
        ));
    }

    #[test]
    fn test_populate_replaces_duplicates() {
        let store = ResourceStore::new();
        let_assert!(
            Ok(resources) =
                parse(r#"[{"id": "a", "title": "First"}, {"id": "a", "title": "Second"}]"#)
        );
        let_assert!(Ok(2) = populate(&store, resources));
        check!(store.len() == 1);
        check!(store.get("a").map(|r| r.title.clone()).as_deref() == Some("Second"));
    }
}
