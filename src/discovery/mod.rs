//! Intent-aware discovery over the resource corpus.
//!
//! [`DiscoveryEngine`] classifies a query, runs the relevance recipe for its
//! mode and explains the result. [`DiscoveryProvider`] exposes the same engine
//! through the domain-agnostic [`crate::search::SearchProvider`] contract.

pub mod adapter;
pub mod classify;
pub mod engine;
pub mod keywords;
pub mod profiles;
pub mod suggest;

pub use adapter::DiscoveryProvider;
pub use classify::{Classification, DiscoveryMode, classify};
pub use engine::{DiscoveryEngine, DiscoveryResult};
pub use profiles::{
    ConceptWeights, DifficultyRange, ExploratoryWeights, ProfileWeights, RelevanceProfiles,
    SpecificWeights, TopicIntent, VagueWeights,
};
