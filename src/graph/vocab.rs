//! Well-known classes and properties of the compiled model.
//!
//! Follows the same pattern as a predicate table: every IRI is resolved once
//! from the configured namespace and handed to whoever writes or reads the
//! graph, so no namespace constant is global.

use oxigraph::model::NamedNode;

use crate::error::{GraphError, GraphResult};
use crate::record::DocumentType;

/// IRIs of the model vocabulary under one namespace.
#[derive(Debug, Clone)]
pub struct ModelVocabulary {
    namespace: String,

    // Document literal properties
    pub language: NamedNode,
    pub date: NamedNode,
    pub title: NamedNode,
    pub subject: NamedNode,
    pub description: NamedNode,
    pub publisher: NamedNode,

    // Document reference properties
    pub creator: NamedNode,
    pub contributor: NamedNode,
    pub relation: NamedNode,
    pub rights: NamedNode,

    // Referenced entity classes and attributes
    pub person_class: NamedNode,
    pub url_class: NamedNode,
    pub name: NamedNode,
    pub url: NamedNode,
}

impl ModelVocabulary {
    /// Resolve the vocabulary under `namespace`.
    pub fn new(namespace: &str) -> GraphResult<Self> {
        NamedNode::new(namespace).map_err(|e| GraphError::InvalidIri {
            iri: namespace.to_string(),
            message: e.to_string(),
        })?;
        let term = |local: &str| NamedNode::new_unchecked(format!("{namespace}{local}"));
        Ok(Self {
            namespace: namespace.to_string(),
            language: term("language"),
            date: term("date"),
            title: term("title"),
            subject: term("subject"),
            description: term("description"),
            publisher: term("publisher"),
            creator: term("creator"),
            contributor: term("contributor"),
            relation: term("relation"),
            rights: term("rights"),
            person_class: term("Person"),
            url_class: term("UrlResource"),
            name: term("name"),
            url: term("url"),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Class IRI for a recognized document type, e.g. `<ns>TAZ-TFG`.
    pub fn type_class(&self, doc_type: DocumentType) -> NamedNode {
        self.local(doc_type.as_str())
    }

    /// IRI of a slug-keyed entity (person or URL resource).
    ///
    /// Slugs only contain `[a-z0-9-]`, which are valid in any IRI suffix.
    pub fn entity(&self, slug: &str) -> NamedNode {
        self.local(slug)
    }

    /// Document property by local name, as used by the text index settings.
    pub fn property(&self, local: &str) -> Option<&NamedNode> {
        Some(match local {
            "language" => &self.language,
            "date" => &self.date,
            "title" => &self.title,
            "subject" => &self.subject,
            "description" => &self.description,
            "publisher" => &self.publisher,
            "creator" => &self.creator,
            "contributor" => &self.contributor,
            "relation" => &self.relation,
            "rights" => &self.rights,
            _ => return None,
        })
    }

    /// Attribute predicates that carry the display value of referenced entities.
    pub fn label_properties(&self) -> [&NamedNode; 2] {
        [&self.name, &self.url]
    }

    fn local(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{local}", self.namespace))
    }
}
