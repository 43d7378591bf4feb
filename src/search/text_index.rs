//! Full-text index over selected graph properties.
//!
//! Every literal value of an indexed property becomes one tantivy document
//! holding the subject, the property IRI and the analyzed text. Properties
//! that point at persons or URL resources are indexed through the entity's
//! `name` / `url` attribute.
//!
//! The index is exposed to SPARQL as a filter function:
//!
//! ```sparql
//! PREFIX text: <http://jena.apache.org/text#>
//! SELECT ?x WHERE {
//!   ?x model:title ?t .
//!   FILTER(text:query(?x, model:subject, "energía +solar -eólica"))
//! }
//! ```
//!
//! `text:query(?x, "q")` searches all indexed properties.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use oxigraph::model::{Literal, NamedNode, Term};
use tantivy::collector::DocSetCollector;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions, Value,
};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, doc};
use unicode_normalization::UnicodeNormalization;

use crate::error::{SearchError, SearchResult};
use crate::graph::{ModelVocabulary, SemanticStore};
use crate::search::analyzer::{SPANISH_ANALYZER, spanish_analyzer};

/// IRI of the SPARQL filter function backed by [`TextIndex`].
pub const TEXT_QUERY_FUNCTION: &str = "http://jena.apache.org/text#query";

const WRITER_MEMORY: usize = 15_000_000;

fn index_err(e: impl std::fmt::Display) -> SearchError {
    SearchError::Index {
        message: e.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexFields {
    subject: Field,
    property: Field,
    text: Field,
}

/// Subjects matching one (property, query) pair; `None` marks a query that
/// failed to parse.
type MatchCache = HashMap<(Option<String>, String), Option<Arc<HashSet<String>>>>;

/// Collects values into a fresh in-memory index.
pub struct TextIndexBuilder {
    index: Index,
    writer: IndexWriter,
    fields: IndexFields,
    values: usize,
}

impl TextIndexBuilder {
    pub fn new() -> SearchResult<Self> {
        let mut schema = Schema::builder();
        let subject = schema.add_text_field("subject", STRING | STORED);
        let property = schema.add_text_field("property", STRING);
        let indexing = TextFieldIndexing::default()
            .set_tokenizer(SPANISH_ANALYZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let text = schema.add_text_field("text", TextOptions::default().set_indexing_options(indexing));

        let index = Index::create_in_ram(schema.build());
        index.tokenizers().register(SPANISH_ANALYZER, spanish_analyzer()?);
        let writer = index.writer_with_num_threads(1, WRITER_MEMORY).map_err(index_err)?;
        Ok(Self {
            index,
            writer,
            fields: IndexFields {
                subject,
                property,
                text,
            },
            values: 0,
        })
    }

    /// Index `text` as a value of `property` on `subject` (N-Triples form).
    pub fn add(&mut self, subject: &str, property: &str, text: &str) -> SearchResult<()> {
        let normalized: String = text.nfc().collect();
        self.writer
            .add_document(doc!(
                self.fields.subject => subject,
                self.fields.property => property,
                self.fields.text => normalized,
            ))
            .map_err(index_err)?;
        self.values += 1;
        Ok(())
    }

    /// Commit and open the index for searching.
    pub fn finish(mut self) -> SearchResult<TextIndex> {
        self.writer.commit().map_err(index_err)?;
        let reader: IndexReader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(index_err)?;
        let parser = QueryParser::for_index(&self.index, vec![self.fields.text]);
        tracing::info!(values = self.values, "text index built");
        Ok(TextIndex {
            reader,
            parser,
            fields: self.fields,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

/// Searchable index of property values, keyed by subject.
pub struct TextIndex {
    reader: IndexReader,
    parser: QueryParser,
    fields: IndexFields,
    cache: Mutex<MatchCache>,
}

impl TextIndex {
    /// Index the given model properties (local names) of `store`.
    ///
    /// Unknown property names are logged and ignored.
    pub fn build(store: &SemanticStore, vocab: &ModelVocabulary, fields: &[String]) -> SearchResult<Self> {
        let mut labels: HashMap<String, Vec<String>> = HashMap::new();
        for predicate in vocab.label_properties() {
            for (subject, object) in store.subject_objects(predicate.as_ref())? {
                if let Term::Literal(literal) = object {
                    labels.entry(subject).or_default().push(literal.value().to_string());
                }
            }
        }

        let mut builder = TextIndexBuilder::new()?;
        for field in fields {
            let Some(predicate) = vocab.property(field) else {
                tracing::warn!(field = %field, "unknown text field, not indexed");
                continue;
            };
            for (subject, object) in store.subject_objects(predicate.as_ref())? {
                match &object {
                    Term::Literal(literal) => builder.add(&subject, predicate.as_str(), literal.value())?,
                    Term::NamedNode(node) => {
                        for label in labels.get(&node.to_string()).into_iter().flatten() {
                            builder.add(&subject, predicate.as_str(), label)?;
                        }
                    }
                    _ => {}
                }
            }
        }
        builder.finish()
    }

    /// Subjects (N-Triples form) with a value matching `query`, restricted to
    /// `property` when given.
    pub fn search(&self, property: Option<&str>, query: &str) -> SearchResult<HashSet<String>> {
        let normalized: String = query.nfc().collect();
        let parsed = self
            .parser
            .parse_query(&normalized)
            .map_err(|e| SearchError::TextQuery {
                query: query.to_string(),
                message: e.to_string(),
            })?;
        let query: Box<dyn Query> = match property {
            Some(p) => {
                let term = tantivy::Term::from_field_text(self.fields.property, p);
                Box::new(BooleanQuery::new(vec![
                    (Occur::Must, parsed),
                    (Occur::Must, Box::new(TermQuery::new(term, IndexRecordOption::Basic))),
                ]))
            }
            None => parsed,
        };

        let searcher = self.reader.searcher();
        let hits = searcher.search(&query, &DocSetCollector).map_err(index_err)?;
        let mut subjects = HashSet::new();
        for address in hits {
            let doc: TantivyDocument = searcher.doc(address).map_err(index_err)?;
            if let Some(subject) = doc.get_first(self.fields.subject).and_then(|v| v.as_str()) {
                subjects.insert(subject.to_string());
            }
        }
        Ok(subjects)
    }

    /// Cached [`search`](Self::search). A failing query is logged once and
    /// yields `None` from then on.
    pub fn matching(&self, property: Option<&str>, query: &str) -> Option<Arc<HashSet<String>>> {
        let key = (property.map(str::to_string), query.to_string());
        let mut cache = self.cache.lock().ok()?;
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }
        let result = match self.search(property, query) {
            Ok(subjects) => Some(Arc::new(subjects)),
            Err(e) => {
                tracing::warn!(query, error = %e, "text query rejected");
                None
            }
        };
        cache.insert(key, result.clone());
        result
    }

    /// Body of the `text:query` SPARQL function.
    ///
    /// Accepts `(subject, "query")` or `(subject, property, "query")`. Returns
    /// `None` (an evaluation error, which drops the row) on bad arguments or
    /// an unparsable query.
    pub fn evaluate(&self, args: &[Term]) -> Option<Term> {
        let (subject, property, query) = match args {
            [subject, Term::Literal(query)] => (subject, None, query),
            [subject, Term::NamedNode(property), Term::Literal(query)] => {
                (subject, Some(property.as_str()), query)
            }
            _ => return None,
        };
        let subjects = self.matching(property, query.value())?;
        Some(Literal::from(subjects.contains(&subject.to_string())).into())
    }

    /// IRI of the function this index answers.
    pub fn function_name() -> NamedNode {
        NamedNode::new_unchecked(TEXT_QUERY_FUNCTION)
    }
}
