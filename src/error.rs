//! Rich diagnostic error types for biblio-graph.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

pub use crate::record::error::{RecordError, RecordResult};

/// Top-level error type for biblio-graph.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum BiblioError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Search(#[from] SearchError),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(biblio::config::read),
        help("Check that the file passed with --config exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(biblio::config::parse),
        help(
            "The config file must be valid TOML. Every key is optional; \
             unknown keys are rejected."
        )
    )]
    Parse { path: String, message: String },

    #[error("invalid namespace IRI \"{iri}\": {message}")]
    #[diagnostic(
        code(biblio::config::namespace),
        help(
            "Namespaces must be absolute IRIs ending in '#' or '/', \
             e.g. \"http://www.biblio-graph.org/model#\"."
        )
    )]
    InvalidNamespace { iri: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("record has no identifier")]
    #[diagnostic(
        code(biblio::graph::missing_identifier),
        help(
            "Every record needs a non-empty identifier element; it becomes the \
             document IRI. The record was not added to the graph."
        )
    )]
    MissingIdentifier,

    #[error("\"{iri}\" is not a valid IRI: {message}")]
    #[diagnostic(
        code(biblio::graph::invalid_iri),
        help(
            "Record identifiers are used verbatim as IRIs and must be absolute \
             (e.g. \"oai:zaguan.unizar.es:1234\" or \"http://...\")."
        )
    )]
    InvalidIri { iri: String, message: String },

    #[error("duplicate document identifier \"{id}\"")]
    #[diagnostic(
        code(biblio::graph::duplicate_document),
        help(
            "Another record with the same identifier was already compiled. \
             The first record wins; remove or fix the duplicate."
        )
    )]
    DuplicateDocument { id: String },

    #[error("document \"{id}\" has a non-numeric date \"{value}\"")]
    #[diagnostic(
        code(biblio::graph::invalid_date),
        help("The date element must hold a year such as \"2014\".")
    )]
    InvalidDate { id: String, value: String },

    #[error("graph store error: {message}")]
    #[diagnostic(
        code(biblio::graph::store),
        help("The oxigraph store rejected the operation.")
    )]
    Store { message: String },

    #[error("failed to load graph from {path}: {message}")]
    #[diagnostic(
        code(biblio::graph::load),
        help(
            "The compiled graph must be a Turtle file produced by `biblio generate`. \
             Check the path passed with --rdf."
        )
    )]
    Load { path: String, message: String },

    #[error("failed to serialize graph: {message}")]
    #[diagnostic(
        code(biblio::graph::serialize),
        help("Check that the output path is writable and the disk is not full.")
    )]
    Serialize { message: String },
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

// ---------------------------------------------------------------------------
// Corpus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    #[error("corpus path is not a directory: {path}")]
    #[diagnostic(
        code(biblio::corpus::not_a_directory),
        help("Pass the directory holding the XML records with --docs.")
    )]
    NotADirectory { path: String },

    #[error("failed to list corpus directory {path}")]
    #[diagnostic(
        code(biblio::corpus::read_dir),
        help("Check that the directory exists and you have read permissions.")
    )]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record {path} rejected in strict mode")]
    #[diagnostic(
        code(biblio::corpus::strict),
        help("Fix the record or set `strict = false` to skip bad records.")
    )]
    Strict {
        path: String,
        #[source]
        source: Box<BiblioError>,
    },

    #[error("failed to write {path}")]
    #[diagnostic(
        code(biblio::corpus::output),
        help("Check that the output directory exists and is writable.")
    )]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

// ---------------------------------------------------------------------------
// Search errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SearchError {
    #[error("failed to read information needs from {path}")]
    #[diagnostic(
        code(biblio::search::needs_read),
        help("Check the path passed with --info-needs.")
    )]
    NeedsRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed information needs document: {message}")]
    #[diagnostic(
        code(biblio::search::needs_parse),
        help(
            "The file must be XML with repeated <informationNeed> elements, \
             each holding an <identifier> and a <text> child."
        )
    )]
    NeedsParse { message: String },

    #[error("query for need \"{need}\" failed: {message}")]
    #[diagnostic(
        code(biblio::search::query),
        help(
            "The need text must be a SPARQL SELECT query binding the result \
             variable. Full-text matching is available via text:query(...)."
        )
    )]
    Query { need: String, message: String },

    #[error("text index error: {message}")]
    #[diagnostic(
        code(biblio::search::index),
        help("The in-memory full-text index could not be built or searched.")
    )]
    Index { message: String },

    #[error("invalid text query \"{query}\": {message}")]
    #[diagnostic(
        code(biblio::search::text_query),
        help(
            "Text queries use Lucene-style syntax: bare terms, +required, \
             -excluded, \"quoted phrases\", AND / OR."
        )
    )]
    TextQuery { query: String, message: String },

    #[error("failed to write results")]
    #[diagnostic(
        code(biblio::search::output),
        help("Check that the path passed with --output is writable.")
    )]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Convenience alias for top-level results.
pub type BiblioResult<T> = std::result::Result<T, BiblioError>;
