//! Learning-resource domain model.
//!
//! A [`Resource`] is the item the discovery engine ranks. The classification
//! enums are closed sets with stable slugs, used both in catalog JSON and in
//! tool parameters.

use crate::error::{DiscoveryError, Result};
use crate::search::Searchable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A curated learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<ConceptArea>,
    #[serde(default)]
    pub categories: Vec<ResourceCategory>,
    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Published by the project or vendor that owns the subject.
    #[serde(default)]
    pub official: bool,
    /// Still updated for current releases.
    #[serde(default)]
    pub maintained: bool,
    /// Accessible without payment or registration.
    #[serde(default)]
    pub free: bool,
}

impl Resource {
    /// Create a resource with the required fields; everything else defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: String::new(),
            author: None,
            tags: vec![],
            concepts: vec![],
            categories: vec![],
            resource_type: ResourceType::default(),
            difficulty: Difficulty::default(),
            official: false,
            maintained: false,
            free: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concepts(mut self, concepts: impl IntoIterator<Item = ConceptArea>) -> Self {
        self.concepts = concepts.into_iter().collect();
        self
    }

    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = ResourceCategory>,
    ) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub const fn with_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub const fn official(mut self, official: bool) -> Self {
        self.official = official;
        self
    }

    pub const fn maintained(mut self, maintained: bool) -> Self {
        self.maintained = maintained;
        self
    }

    pub const fn free(mut self, free: bool) -> Self {
        self.free = free;
        self
    }

    pub fn covers(&self, concept: ConceptArea) -> bool {
        self.concepts.contains(&concept)
    }

    pub fn belongs_to(&self, category: ResourceCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Lowercased concatenation of every free-text field, used for
    /// whole-document containment checks.
    pub fn full_text(&self) -> String {
        let mut text = format!("{} {}", self.title, self.description);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        if let Some(author) = &self.author {
            text.push(' ');
            text.push_str(author);
        }
        text.to_lowercase()
    }
}

impl Searchable for Resource {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Parse `value` against the slugs of `all`, ignoring case and treating `_`
/// and spaces like `-`.
fn parse_slug<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    slug: impl Fn(T) -> &'static str,
) -> Result<T> {
    let wanted = value.trim().to_lowercase().replace(['_', ' '], "-");
    all.iter()
        .copied()
        .find(|candidate| slug(*candidate) == wanted)
        .ok_or_else(|| DiscoveryError::UnknownSlug {
            kind,
            value: value.to_string(),
            expected: all
                .iter()
                .map(|candidate| slug(*candidate))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Subject areas a resource can teach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConceptArea {
    GettingStarted,
    LanguageBasics,
    #[serde(rename = "oop")]
    ObjectOriented,
    Collections,
    Generics,
    Streams,
    Concurrency,
    ErrorHandling,
    Io,
    Testing,
    DesignPatterns,
    Performance,
    JvmInternals,
    Security,
    Persistence,
    WebServices,
    Microservices,
    BuildTools,
    ModernJava,
}

impl ConceptArea {
    pub const ALL: &'static [Self] = &[
        Self::GettingStarted,
        Self::LanguageBasics,
        Self::ObjectOriented,
        Self::Collections,
        Self::Generics,
        Self::Streams,
        Self::Concurrency,
        Self::ErrorHandling,
        Self::Io,
        Self::Testing,
        Self::DesignPatterns,
        Self::Performance,
        Self::JvmInternals,
        Self::Security,
        Self::Persistence,
        Self::WebServices,
        Self::Microservices,
        Self::BuildTools,
        Self::ModernJava,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::GettingStarted => "getting-started",
            Self::LanguageBasics => "language-basics",
            Self::ObjectOriented => "oop",
            Self::Collections => "collections",
            Self::Generics => "generics",
            Self::Streams => "streams",
            Self::Concurrency => "concurrency",
            Self::ErrorHandling => "error-handling",
            Self::Io => "io",
            Self::Testing => "testing",
            Self::DesignPatterns => "design-patterns",
            Self::Performance => "performance",
            Self::JvmInternals => "jvm-internals",
            Self::Security => "security",
            Self::Persistence => "persistence",
            Self::WebServices => "web-services",
            Self::Microservices => "microservices",
            Self::BuildTools => "build-tools",
            Self::ModernJava => "modern-java",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GettingStarted => "Getting Started",
            Self::LanguageBasics => "Language Basics",
            Self::ObjectOriented => "Object-Oriented Programming",
            Self::Collections => "Collections",
            Self::Generics => "Generics",
            Self::Streams => "Streams & Lambdas",
            Self::Concurrency => "Concurrency",
            Self::ErrorHandling => "Exception Handling",
            Self::Io => "I/O & NIO",
            Self::Testing => "Testing",
            Self::DesignPatterns => "Design Patterns",
            Self::Performance => "Performance Tuning",
            Self::JvmInternals => "JVM Internals",
            Self::Security => "Security",
            Self::Persistence => "Persistence & Databases",
            Self::WebServices => "Web Services & REST",
            Self::Microservices => "Microservices",
            Self::BuildTools => "Build Tools",
            Self::ModernJava => "Modern Java Features",
        }
    }

    /// Whether the concept names a subject, as opposed to a learning stage.
    pub const fn is_topical(self) -> bool {
        !matches!(self, Self::GettingStarted)
    }
}

impl fmt::Display for ConceptArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ConceptArea {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_slug("concept", s, Self::ALL, Self::slug)
    }
}

/// Broad technology categories a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    Java,
    Spring,
    Jakarta,
    Testing,
    Build,
    Jvm,
    Architecture,
    Data,
    Cloud,
    Community,
}

impl ResourceCategory {
    pub const ALL: &'static [Self] = &[
        Self::Java,
        Self::Spring,
        Self::Jakarta,
        Self::Testing,
        Self::Build,
        Self::Jvm,
        Self::Architecture,
        Self::Data,
        Self::Cloud,
        Self::Community,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Spring => "spring",
            Self::Jakarta => "jakarta",
            Self::Testing => "testing",
            Self::Build => "build",
            Self::Jvm => "jvm",
            Self::Architecture => "architecture",
            Self::Data => "data",
            Self::Cloud => "cloud",
            Self::Community => "community",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Spring => "Spring",
            Self::Jakarta => "Jakarta EE",
            Self::Testing => "Testing",
            Self::Build => "Build & Tooling",
            Self::Jvm => "JVM",
            Self::Architecture => "Architecture",
            Self::Data => "Data & Persistence",
            Self::Cloud => "Cloud & DevOps",
            Self::Community => "Community",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ResourceCategory {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_slug("category", s, Self::ALL, Self::slug)
    }
}

/// Skill level a resource targets. Ordered from easiest to hardest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: &'static [Self] = &[
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
            Self::Expert => 3,
        }
    }

    /// Number of tiers between two difficulties.
    pub const fn distance(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// The next harder tier, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => Some(Self::Expert),
            Self::Expert => None,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Difficulty {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_slug("difficulty", s, Self::ALL, Self::slug)
    }
}

/// Content format of a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    #[default]
    Documentation,
    Tutorial,
    Article,
    Book,
    Course,
    Video,
    Podcast,
    Tool,
    Reference,
    Community,
}

impl ResourceType {
    pub const ALL: &'static [Self] = &[
        Self::Documentation,
        Self::Tutorial,
        Self::Article,
        Self::Book,
        Self::Course,
        Self::Video,
        Self::Podcast,
        Self::Tool,
        Self::Reference,
        Self::Community,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Tutorial => "tutorial",
            Self::Article => "article",
            Self::Book => "book",
            Self::Course => "course",
            Self::Video => "video",
            Self::Podcast => "podcast",
            Self::Tool => "tool",
            Self::Reference => "reference",
            Self::Community => "community",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceType {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_slug("resource type", s, Self::ALL, Self::slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("concurrency", ConceptArea::Concurrency)]
    #[case("Design-Patterns", ConceptArea::DesignPatterns)]
    #[case("design_patterns", ConceptArea::DesignPatterns)]
    #[case("getting started", ConceptArea::GettingStarted)]
    #[case("oop", ConceptArea::ObjectOriented)]
    fn test_concept_from_slug(#[case] input: &str, #[case] expected: ConceptArea) {
        check!(input.parse::<ConceptArea>().ok() == Some(expected));
    }

    #[test]
    fn test_unknown_category_lists_slugs() {
        let_assert!(Err(err) = "quantum".parse::<ResourceCategory>());
        let message = err.to_string();
        check!(message.contains("quantum"));
        check!(message.contains("spring"));
    }

    #[test]
    fn test_slugs_round_trip_for_every_variant() {
        for concept in ConceptArea::ALL {
            check!(concept.slug().parse::<ConceptArea>().ok() == Some(*concept));
        }
        for category in ResourceCategory::ALL {
            check!(category.slug().parse::<ResourceCategory>().ok() == Some(*category));
        }
    }

    #[rstest]
    #[case(Difficulty::Beginner, Difficulty::Beginner, 0)]
    #[case(Difficulty::Beginner, Difficulty::Intermediate, 1)]
    #[case(Difficulty::Expert, Difficulty::Beginner, 3)]
    fn test_difficulty_distance(#[case] a: Difficulty, #[case] b: Difficulty, #[case] d: u8) {
        check!(a.distance(b) == d);
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "junit5-guide",
            "title": "JUnit 5 User Guide",
            "type": "documentation",
            "difficulty": "beginner",
            "concepts": ["testing"],
            "categories": ["testing", "java"],
            "official": true
        }"#;
        let_assert!(Ok(resource) = serde_json::from_str::<Resource>(json));
        check!(resource.id == "junit5-guide");
        check!(resource.covers(ConceptArea::Testing));
        check!(resource.belongs_to(ResourceCategory::Java));
        check!(resource.official);
        check!(!resource.free);
        check!(resource.tags.is_empty());
    }

    #[test]
    fn test_full_text_is_lowercase_and_includes_tags() {
        let resource = Resource::new("r", "Effective Java")
            .with_description("Best PRACTICES")
            .with_tags(["Idioms"])
            .with_author("Joshua Bloch");
        let text = resource.full_text();
        check!(text.contains("effective java"));
        check!(text.contains("best practices"));
        check!(text.contains("idioms"));
        check!(text.contains("joshua bloch"));
    }
}
