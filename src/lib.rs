// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # biblio-graph
//!
//! Compiles Dublin Core bibliographic records into an RDF graph and answers
//! batches of SPARQL information needs against it, with Spanish full-text
//! matching available inside queries.
//!
//! ## Architecture
//!
//! - **Records** (`record`): namespace-aware field extraction from XML
//! - **Graph** (`graph`): oxigraph store, model vocabulary, triple builder
//! - **Corpus** (`corpus`): directory → graph compilation and Turtle output
//! - **Search** (`search`): text index, need reader, batch runner, TSV writer
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use biblio_graph::config::BiblioConfig;
//! use biblio_graph::corpus::{CorpusCompiler, write_turtle};
//! use biblio_graph::graph::{ModelVocabulary, SemanticStore};
//!
//! let config = BiblioConfig::default();
//! let vocab = ModelVocabulary::new(&config.model_namespace).unwrap();
//! let store = SemanticStore::in_memory().unwrap();
//! let mut compiler = CorpusCompiler::new(&store, vocab.clone(), &config);
//! let report = compiler.compile_dir(Path::new("records")).unwrap();
//! write_turtle(&store, &vocab, Path::new("graph.ttl")).unwrap();
//! println!("{report}");
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod graph;
pub mod record;
pub mod search;
pub mod slug;
