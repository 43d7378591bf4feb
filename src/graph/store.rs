//! RDF graph store backed by oxigraph.
//!
//! Holds the compiled corpus in memory, serializes it as Turtle, loads it back
//! for the search phase and answers SPARQL queries.

use std::io::{Read, Write};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{GraphName, GraphNameRef, NamedNodeRef, Quad, Term, Triple};
use oxigraph::sparql::{QueryResults, QuerySolution, SparqlEvaluator};
use oxigraph::store::Store;

use crate::error::{GraphError, GraphResult};

/// In-memory, SPARQL-capable RDF store.
pub struct SemanticStore {
    store: Store,
}

impl SemanticStore {
    /// Create a new empty in-memory store.
    pub fn in_memory() -> GraphResult<Self> {
        let store = Store::new().map_err(|e| GraphError::Store {
            message: format!("failed to create oxigraph store: {e}"),
        })?;
        Ok(Self { store })
    }

    /// Create a store holding the Turtle graph at `path`.
    pub fn from_turtle_file(path: &Path) -> GraphResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| GraphError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let store = Self::in_memory()?;
        store
            .load_turtle(std::io::BufReader::new(file))
            .map_err(|e| GraphError::Load {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(store)
    }

    /// Insert a triple into the default graph. Returns `false` if it was
    /// already present.
    pub fn insert(&self, triple: &Triple) -> GraphResult<bool> {
        if self.contains(triple)? {
            return Ok(false);
        }
        self.store.insert(&default_graph_quad(triple)).map_err(|e| GraphError::Store {
            message: format!("insert failed: {e}"),
        })?;
        Ok(true)
    }

    /// Whether the default graph holds `triple`.
    pub fn contains(&self, triple: &Triple) -> GraphResult<bool> {
        self.store.contains(&default_graph_quad(triple)).map_err(|e| GraphError::Store {
            message: format!("lookup failed: {e}"),
        })
    }

    /// All `(subject, object)` pairs for a predicate in the default graph.
    ///
    /// Subjects are returned in N-Triples form (`<iri>` or `_:b0`), which is
    /// also how SPARQL terms print, so the string can be used as a lookup key.
    pub fn subject_objects(&self, predicate: NamedNodeRef<'_>) -> GraphResult<Vec<(String, Term)>> {
        self.store
            .quads_for_pattern(None, Some(predicate), None, Some(GraphNameRef::DefaultGraph))
            .map(|quad| {
                quad.map(|q| (q.subject.to_string(), q.object))
                    .map_err(|e| GraphError::Store {
                        message: format!("scan failed: {e}"),
                    })
            })
            .collect()
    }

    /// Load Turtle data into the default graph.
    pub fn load_turtle(&self, reader: impl Read) -> GraphResult<()> {
        self.store
            .load_from_reader(RdfFormat::Turtle, reader)
            .map_err(|e| GraphError::Store {
                message: format!("turtle load failed: {e}"),
            })
    }

    /// Serialize the default graph as Turtle with the given prefixes.
    pub fn dump_turtle<W: Write>(&self, writer: W, prefixes: &[(&str, &str)]) -> GraphResult<W> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
        for (name, iri) in prefixes {
            serializer = serializer
                .with_prefix(*name, *iri)
                .map_err(|e| GraphError::Serialize {
                    message: format!("invalid prefix {name}: {e}"),
                })?;
        }
        self.store
            .dump_graph_to_writer(GraphNameRef::DefaultGraph, serializer, writer)
            .map_err(|e| GraphError::Serialize {
                message: e.to_string(),
            })
    }

    /// Run a SELECT query through `evaluator` (which may carry custom
    /// functions). Solutions come back in engine order.
    pub fn select(&self, evaluator: SparqlEvaluator, sparql: &str) -> GraphResult<Vec<QuerySolution>> {
        let results = evaluator
            .parse_query(sparql)
            .map_err(|e| GraphError::Store {
                message: format!("SPARQL syntax error: {e}"),
            })?
            .on_store(&self.store)
            .execute()
            .map_err(|e| GraphError::Store {
                message: format!("SPARQL query failed: {e}"),
            })?;

        match results {
            QueryResults::Solutions(solutions) => solutions
                .map(|solution| {
                    solution.map_err(|e| GraphError::Store {
                        message: format!("solution error: {e}"),
                    })
                })
                .collect(),
            _ => Err(GraphError::Store {
                message: "only SELECT queries are supported".into(),
            }),
        }
    }

    /// Get the number of triples in the store.
    pub fn len(&self) -> GraphResult<usize> {
        self.store.len().map_err(|e| GraphError::Store {
            message: format!("count failed: {e}"),
        })
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> GraphResult<bool> {
        self.len().map(|n| n == 0)
    }
}

fn default_graph_quad(triple: &Triple) -> Quad {
    Quad::new(
        triple.subject.clone(),
        triple.predicate.clone(),
        triple.object.clone(),
        GraphName::DefaultGraph,
    )
}

impl std::fmt::Debug for SemanticStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{Literal, NamedNode};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(format!("http://example.org/{s}")).unwrap()
    }

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(iri(s), iri(p), Literal::new_simple_literal(o))
    }

    #[test]
    fn insert_and_query() {
        let store = SemanticStore::in_memory().unwrap();
        assert!(store.insert(&triple("d1", "title", "Uno")).unwrap());
        assert!(!store.insert(&triple("d1", "title", "Uno")).unwrap());
        assert!(store.contains(&triple("d1", "title", "Uno")).unwrap());
        assert_eq!(store.len().unwrap(), 1);

        let rows = store
            .select(SparqlEvaluator::new(), "SELECT ?s ?o WHERE { ?s ?p ?o }")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("o").unwrap().to_string(), "\"Uno\"");
    }

    #[test]
    fn repeated_insert_counts_once() {
        let store = SemanticStore::in_memory().unwrap();
        let added = (0..3)
            .filter(|_| store.insert(&triple("d1", "title", "Uno")).unwrap())
            .count();
        assert_eq!(added, 1);
        assert_eq!(store.len().unwrap(), 1);
        assert!(!store.contains(&triple("d1", "title", "Dos")).unwrap());
    }

    #[test]
    fn subject_objects_scans_one_predicate() {
        let store = SemanticStore::in_memory().unwrap();
        store.insert(&triple("d1", "title", "Uno")).unwrap();
        store.insert(&triple("d2", "title", "Dos")).unwrap();
        store.insert(&triple("d2", "subject", "otro")).unwrap();

        let pairs = store.subject_objects(iri("title").as_ref()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().any(|(s, _)| s == "<http://example.org/d2>"));
    }

    #[test]
    fn turtle_roundtrip_preserves_triples() {
        let store = SemanticStore::in_memory().unwrap();
        store.insert(&triple("d1", "title", "Energía")).unwrap();
        store.insert(&triple("d1", "subject", "sol")).unwrap();

        let bytes = store
            .dump_turtle(Vec::new(), &[("ex", "http://example.org/")])
            .unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("@prefix ex:"));

        let reloaded = SemanticStore::in_memory().unwrap();
        reloaded.load_turtle(bytes.as_slice()).unwrap();
        assert_eq!(reloaded.len().unwrap(), 2);
        assert!(reloaded.contains(&triple("d1", "title", "Energía")).unwrap());
    }

    #[test]
    fn missing_turtle_file_is_a_load_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SemanticStore::from_turtle_file(&dir.path().join("none.ttl")).unwrap_err();
        assert!(matches!(err, GraphError::Load { .. }));
    }

    #[test]
    fn select_rejects_ask_and_bad_syntax() {
        let store = SemanticStore::in_memory().unwrap();
        store.insert(&triple("d1", "title", "Uno")).unwrap();
        let ask = store.select(SparqlEvaluator::new(), "ASK { ?s ?p ?o }");
        assert!(matches!(ask, Err(GraphError::Store { .. })));
        let broken = store.select(SparqlEvaluator::new(), "SELECT ?x WHERE {");
        assert!(matches!(broken, Err(GraphError::Store { .. })));
    }
}
