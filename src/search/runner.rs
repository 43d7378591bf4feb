//! Batch evaluation of information needs.

use std::io::Write;
use std::sync::Arc;

use oxigraph::model::Term;
use oxigraph::sparql::SparqlEvaluator;
use serde::Serialize;

use crate::config::BiblioConfig;
use crate::error::{SearchError, SearchResult};
use crate::graph::SemanticStore;
use crate::search::needs::InfoNeed;
use crate::search::property_function::expand_property_functions;
use crate::search::sanitize::sanitize;
use crate::search::text_index::TextIndex;
use crate::search::writer::{ResultRow, ResultWriter};

/// Totals for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub needs: usize,
    /// Needs whose query could not be parsed or evaluated.
    pub failed: usize,
    pub rows: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} needs, {} failed, {} result rows", self.needs, self.failed, self.rows)
    }
}

/// Runs SPARQL needs against a store with `text:query` available.
pub struct QueryBatchRunner<'a> {
    store: &'a SemanticStore,
    index: Arc<TextIndex>,
    variable: String,
}

impl<'a> QueryBatchRunner<'a> {
    pub fn new(store: &'a SemanticStore, index: Arc<TextIndex>, config: &BiblioConfig) -> Self {
        Self {
            store,
            index,
            variable: config.result_variable.clone(),
        }
    }

    fn evaluator(&self) -> SparqlEvaluator {
        let index = Arc::clone(&self.index);
        SparqlEvaluator::new().with_custom_function(TextIndex::function_name(), move |args| index.evaluate(args))
    }

    /// Evaluate one need; rows come back in engine order.
    ///
    /// The query text is sanitized and Jena-style `text:query` patterns are
    /// expanded before evaluation.
    pub fn evaluate(&self, need: &InfoNeed) -> SearchResult<Vec<ResultRow>> {
        let query_err = |message: String| SearchError::Query {
            need: need.id.clone(),
            message,
        };
        let text = expand_property_functions(&sanitize(&need.text), &self.index)
            .map_err(|e| query_err(e.to_string()))?;
        let solutions = self
            .store
            .select(self.evaluator(), &text)
            .map_err(|e| query_err(e.to_string()))?;

        let mut rows = Vec::new();
        for solution in &solutions {
            match solution.get(self.variable.as_str()) {
                Some(Term::NamedNode(node)) => rows.push(ResultRow {
                    need_id: need.id.clone(),
                    document_uri: node.as_str().to_string(),
                }),
                other => {
                    tracing::debug!(need = %need.id, variable = %self.variable, value = ?other, "solution skipped")
                }
            }
        }
        Ok(rows)
    }

    /// Evaluate every need in order, writing rows as they come.
    ///
    /// A failing need is logged and contributes no rows. Only output errors
    /// stop the batch.
    pub fn run<W: Write>(&self, needs: &[InfoNeed], writer: &mut ResultWriter<W>) -> SearchResult<BatchSummary> {
        let mut summary = BatchSummary::default();
        for need in needs {
            summary.needs += 1;
            let rows = match self.evaluate(need) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(need = %need.id, error = %e, "need failed");
                    summary.failed += 1;
                    continue;
                }
            };
            tracing::info!(need = %need.id, results = rows.len(), "need evaluated");
            for row in &rows {
                writer.write(row)?;
            }
            summary.rows += rows.len();
        }
        Ok(summary)
    }
}
