//! Compiled bibliographic graph.
//!
//! - **Store** ([`SemanticStore`]): oxigraph-backed RDF storage with SPARQL and Turtle I/O
//! - **Vocabulary** ([`ModelVocabulary`]): classes and properties under the configured namespace
//! - **Builder** ([`GraphBuilder`]): record fields → triples, with slug-based entity identity

pub mod builder;
pub mod store;
pub mod vocab;

pub use builder::{BuildStats, DocumentOutcome, GraphBuilder};
pub use store::SemanticStore;
pub use vocab::ModelVocabulary;
