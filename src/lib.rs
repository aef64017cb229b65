pub mod catalog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod format;
pub mod logging;
pub mod resource;
pub mod search;
pub mod server;
pub mod store;
pub mod tools;

pub use discovery::{DiscoveryEngine, DiscoveryMode, DiscoveryProvider, DiscoveryResult};
pub use error::{DiscoveryError, Result};
pub use resource::{ConceptArea, Difficulty, Resource, ResourceCategory, ResourceType};
pub use store::{ResourceFilter, ResourceStore};
