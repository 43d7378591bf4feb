//! Namespace-aware extraction of metadata fields from a record.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::record::error::{RecordError, RecordResult};
use crate::record::model::DocumentFields;

/// Reads metadata elements in one namespace from a parsed record.
///
/// Lookup mirrors DOM `getElementsByTagNameNS`: every descendant of the root
/// element is searched in document order, and the value is the concatenated
/// text content of the matching element.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    namespace: String,
}

impl FieldExtractor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Text of the first matching element, or `None` if there is none.
    pub fn single(&self, root: Node<'_, '_>, field: &str) -> Option<String> {
        self.matching(root, field).next().map(text_content)
    }

    /// Text of every matching element, in document order.
    pub fn multi(&self, root: Node<'_, '_>, field: &str) -> Vec<String> {
        self.matching(root, field).map(text_content).collect()
    }

    /// Extract all known fields from a parsed record.
    pub fn extract(&self, doc: &Document<'_>) -> DocumentFields {
        let root = doc.root_element();
        DocumentFields {
            identifier: self.single(root, "identifier"),
            doc_type: self.single(root, "type"),
            language: self.multi(root, "language"),
            date: self.single(root, "date"),
            title: self.single(root, "title"),
            subject: self.multi(root, "subject"),
            description: self.single(root, "description"),
            creator: self.multi(root, "creator"),
            contributor: self.multi(root, "contributor"),
            publisher: self.single(root, "publisher"),
            relation: self.multi(root, "relation"),
            rights: self.multi(root, "rights"),
        }
    }

    /// Parse XML text and extract its fields. `origin` labels errors.
    pub fn parse_record(&self, origin: &str, xml: &str) -> RecordResult<DocumentFields> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(xml, options).map_err(|e| RecordError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.extract(&doc))
    }

    /// Read a record file and extract its fields.
    pub fn read_record(&self, path: &Path) -> RecordResult<DocumentFields> {
        let xml = std::fs::read_to_string(path).map_err(|e| RecordError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        self.parse_record(&path.display().to_string(), &xml)
    }

    fn matching<'a, 'input>(
        &'a self,
        root: Node<'a, 'input>,
        field: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        // descendants() yields the root itself first.
        root.descendants().skip(1).filter(move |n| {
            n.is_element()
                && n.tag_name().name() == field
                && n.tag_name().namespace() == Some(self.namespace.as_str())
        })
    }
}

/// Concatenated text of all descendant text nodes (DOM `textContent`).
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
