//! Search phase: run a batch of information needs against a compiled graph.
//!
//! - **Needs** ([`read_needs`]): identifier + SPARQL text pairs from XML
//! - **Sanitizer** ([`sanitize()`]): trims and repairs mis-decoded query text
//! - **Text index** ([`TextIndex`]): tantivy-backed Spanish full-text matching exposed as `text:query`
//! - **Property functions** ([`expand_property_functions`]): Jena-style `?x text:query (...)` patterns
//! - **Runner** ([`QueryBatchRunner`]): evaluates each need, collects document IRIs
//! - **Writer** ([`ResultWriter`]): `need<TAB>document` lines

pub mod analyzer;
pub mod needs;
pub mod property_function;
pub mod runner;
pub mod sanitize;
pub mod text_index;
pub mod writer;

pub use analyzer::{SPANISH_ANALYZER, spanish_analyzer};
pub use needs::{InfoNeed, parse_needs, read_needs};
pub use property_function::expand_property_functions;
pub use runner::{BatchSummary, QueryBatchRunner};
pub use sanitize::sanitize;
pub use text_index::{TEXT_QUERY_FUNCTION, TextIndex, TextIndexBuilder};
pub use writer::{ResultRow, ResultWriter};
