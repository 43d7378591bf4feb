//! Tab-separated result output.

use std::io::Write;

use crate::error::{SearchError, SearchResult};

/// One retrieved document for one need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub need_id: String,
    /// Document IRI, without angle brackets.
    pub document_uri: String,
}

/// Writes `need_id<TAB>document_uri` lines, no header.
pub struct ResultWriter<W: Write> {
    sink: W,
    rows: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, rows: 0 }
    }

    pub fn write(&mut self, row: &ResultRow) -> SearchResult<()> {
        writeln!(self.sink, "{}\t{}", row.need_id, row.document_uri)
            .map_err(|source| SearchError::Output { source })?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> SearchResult<W> {
        self.sink
            .flush()
            .map_err(|source| SearchError::Output { source })?;
        Ok(self.sink)
    }
}
