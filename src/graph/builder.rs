//! Maps extracted record fields onto graph triples.
//!
//! Documents are keyed by their identifier. Creators, contributors, relations
//! and rights become entities keyed by the slug of their raw value, so repeated
//! mentions anywhere in the corpus resolve to one entity.

use std::collections::{HashMap, HashSet};

use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{Literal, NamedNode, Triple};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::store::SemanticStore;
use crate::graph::vocab::ModelVocabulary;
use crate::record::DocumentFields;
use crate::slug;

/// Kind of slug-keyed entity a complex field points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Person,
    Url,
}

/// Running totals of what the builder has written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub documents: usize,
    pub persons: usize,
    pub url_resources: usize,
    /// Triples that were new to the store.
    pub triples: usize,
}

/// Result of adding one document.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub document: NamedNode,
    /// Triples that were new to the store.
    pub triples: usize,
    /// Persons and URL resources created by this document.
    pub new_entities: usize,
}

/// Triples for one document, computed before anything touches the store.
#[derive(Default)]
struct DocumentPlan {
    triples: Vec<Triple>,
    created: Vec<(String, NamedNode, EntityKind)>,
}

/// Writes documents into a [`SemanticStore`], resolving entity identity.
pub struct GraphBuilder<'a> {
    store: &'a SemanticStore,
    vocab: ModelVocabulary,
    /// slug -> entity IRI; first mention wins.
    entities: HashMap<String, NamedNode>,
    documents: HashSet<String>,
    stats: BuildStats,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(store: &'a SemanticStore, vocab: ModelVocabulary) -> Self {
        Self {
            store,
            vocab,
            entities: HashMap::new(),
            documents: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Entity IRI already assigned to `slug`, if any.
    pub fn entity(&self, slug: &str) -> Option<&NamedNode> {
        self.entities.get(slug)
    }

    /// Add one document and everything it references.
    ///
    /// Validation happens first: a document without identifier, with an
    /// identifier that is not an IRI or was already added, or with a
    /// non-numeric date is rejected and nothing is written.
    pub fn add_document(&mut self, fields: &DocumentFields) -> GraphResult<DocumentOutcome> {
        let id = present(fields.identifier.as_deref())
            .ok_or(GraphError::MissingIdentifier)?
            .trim();
        let document = NamedNode::new(id).map_err(|e| GraphError::InvalidIri {
            iri: id.to_string(),
            message: e.to_string(),
        })?;
        if self.documents.contains(id) {
            return Err(GraphError::DuplicateDocument { id: id.to_string() });
        }
        let year = match present(fields.date.as_deref()) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| GraphError::InvalidDate {
                id: id.to_string(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        let plan = self.plan(&document, fields, year);
        let outcome = self.commit(document, plan)?;
        self.documents.insert(id.to_string());
        self.stats.documents += 1;
        tracing::debug!(
            document = %outcome.document,
            triples = outcome.triples,
            new_entities = outcome.new_entities,
            "added document"
        );
        Ok(outcome)
    }

    fn plan(&self, document: &NamedNode, fields: &DocumentFields, year: Option<i64>) -> DocumentPlan {
        let vocab = &self.vocab;
        let mut plan = DocumentPlan::default();
        let literal = |plan: &mut DocumentPlan, predicate: &NamedNode, value: &str| {
            plan.triples.push(Triple::new(
                document.clone(),
                predicate.clone(),
                Literal::new_simple_literal(value),
            ));
        };

        if let Some(doc_type) = fields.document_type() {
            plan.triples.push(Triple::new(
                document.clone(),
                rdf::TYPE,
                vocab.type_class(doc_type),
            ));
        }
        for value in all_present(&fields.language) {
            literal(&mut plan, &vocab.language, value);
        }
        if let Some(year) = year {
            plan.triples.push(Triple::new(
                document.clone(),
                vocab.date.clone(),
                Literal::new_typed_literal(year.to_string(), xsd::INTEGER),
            ));
        }
        if let Some(title) = present(fields.title.as_deref()) {
            literal(&mut plan, &vocab.title, title);
        }
        for value in all_present(&fields.subject) {
            literal(&mut plan, &vocab.subject, value);
        }
        if let Some(description) = present(fields.description.as_deref()) {
            literal(&mut plan, &vocab.description, description);
        }
        for value in all_present(&fields.creator) {
            self.plan_reference(&mut plan, document, &vocab.creator, value, EntityKind::Person);
        }
        for value in all_present(&fields.contributor) {
            self.plan_reference(&mut plan, document, &vocab.contributor, value, EntityKind::Person);
        }
        if let Some(publisher) = present(fields.publisher.as_deref()) {
            literal(&mut plan, &vocab.publisher, publisher);
        }
        for value in all_present(&fields.relation) {
            self.plan_reference(&mut plan, document, &vocab.relation, value, EntityKind::Url);
        }
        for value in all_present(&fields.rights) {
            self.plan_reference(&mut plan, document, &vocab.rights, value, EntityKind::Url);
        }
        plan
    }

    /// Link `document` to the entity for `raw`, creating the entity on first
    /// mention (class edge + attribute holding the raw value).
    fn plan_reference(
        &self,
        plan: &mut DocumentPlan,
        document: &NamedNode,
        predicate: &NamedNode,
        raw: &str,
        kind: EntityKind,
    ) {
        let key = slug::normalize(raw);
        if key.is_empty() {
            tracing::warn!(
                document = %document,
                property = %predicate,
                value = raw,
                "value normalizes to an empty key, skipping reference"
            );
            return;
        }

        let known = self.entities.get(&key).cloned().or_else(|| {
            plan.created
                .iter()
                .find(|(slug, _, _)| *slug == key)
                .map(|(_, node, _)| node.clone())
        });
        let entity = match known {
            Some(node) => node,
            None => {
                let node = self.vocab.entity(&key);
                let (class, attribute) = match kind {
                    EntityKind::Person => (&self.vocab.person_class, &self.vocab.name),
                    EntityKind::Url => (&self.vocab.url_class, &self.vocab.url),
                };
                plan.triples
                    .push(Triple::new(node.clone(), rdf::TYPE, class.clone()));
                plan.triples.push(Triple::new(
                    node.clone(),
                    attribute.clone(),
                    Literal::new_simple_literal(raw),
                ));
                plan.created.push((key, node.clone(), kind));
                node
            }
        };
        plan.triples
            .push(Triple::new(document.clone(), predicate.clone(), entity));
    }

    fn commit(&mut self, document: NamedNode, plan: DocumentPlan) -> GraphResult<DocumentOutcome> {
        let mut written = 0;
        for triple in &plan.triples {
            if self.store.insert(triple)? {
                written += 1;
            }
        }
        let new_entities = plan.created.len();
        for (key, node, kind) in plan.created {
            match kind {
                EntityKind::Person => self.stats.persons += 1,
                EntityKind::Url => self.stats.url_resources += 1,
            }
            self.entities.insert(key, node);
        }
        self.stats.triples += written;
        Ok(DocumentOutcome {
            document,
            triples: written,
            new_entities,
        })
    }
}

/// A value counts as present only if it has non-whitespace content.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn all_present(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(String::as_str).filter(|v| !v.trim().is_empty())
}
