//! Core data types for metadata records.

use serde::{Deserialize, Serialize};

/// Recognized document types. Anything else maps to no type at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Bachelor's thesis (Trabajo Fin de Grado).
    TazTfg,
    /// Master's thesis (Trabajo Fin de Máster).
    TazTfm,
    /// Final degree project (Proyecto Fin de Carrera).
    TazPfc,
    /// Doctoral thesis.
    Tesis,
}

impl DocumentType {
    /// All recognized types, in vocabulary order.
    pub const ALL: [DocumentType; 4] = [Self::TazTfg, Self::TazTfm, Self::TazPfc, Self::Tesis];

    /// Map a raw `type` value. Matching is exact and case-sensitive.
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    /// Vocabulary string, also used as the class local name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TazTfg => "TAZ-TFG",
            Self::TazTfm => "TAZ-TFM",
            Self::TazPfc => "TAZ-PFC",
            Self::Tesis => "TESIS",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from one record, verbatim.
///
/// Single-valued fields are `None` when the element is absent; multi-valued
/// fields keep document order and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub identifier: Option<String>,
    /// Raw type string; see [`DocumentType::from_raw`].
    pub doc_type: Option<String>,
    pub language: Vec<String>,
    pub date: Option<String>,
    pub title: Option<String>,
    pub subject: Vec<String>,
    pub description: Option<String>,
    pub creator: Vec<String>,
    pub contributor: Vec<String>,
    pub publisher: Option<String>,
    pub relation: Vec<String>,
    pub rights: Vec<String>,
}

impl DocumentFields {
    /// The recognized document type, if any.
    pub fn document_type(&self) -> Option<DocumentType> {
        self.doc_type.as_deref().and_then(DocumentType::from_raw)
    }
}
