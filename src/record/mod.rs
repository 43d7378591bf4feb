//! Dublin Core metadata records.
//!
//! A record is one XML document whose metadata elements live in a fixed
//! namespace. [`FieldExtractor`] reads those elements into [`DocumentFields`],
//! tolerating any of them being absent.

pub mod error;
pub mod fields;
pub mod model;

pub use error::{RecordError, RecordResult};
pub use fields::FieldExtractor;
pub use model::{DocumentFields, DocumentType};
