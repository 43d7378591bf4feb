//! Corpus compilation: a directory of records → one graph.
//!
//! Orchestrates: list records → read + parse → extract fields → build triples.
//! A bad record is logged and skipped; only a bad corpus root, a store failure
//! or (in strict mode) a bad record stops the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::BiblioConfig;
use crate::error::{BiblioError, BiblioResult, CorpusError, CorpusResult, GraphError};
use crate::export::{CompileReport, SkippedRecord};
use crate::graph::{DocumentOutcome, GraphBuilder, ModelVocabulary, SemanticStore};
use crate::record::FieldExtractor;

const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// List record files in `dir`, sorted by file name.
///
/// Only regular, non-hidden files with the given extension (case-insensitive)
/// are returned. Sorting makes the compiled graph independent of the order in
/// which the filesystem lists entries.
pub fn list_records(dir: &Path, extension: &str) -> CorpusResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CorpusError::NotADirectory {
            path: dir.display().to_string(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|e| CorpusError::ReadDir {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CorpusError::ReadDir {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Compiles record files into a [`SemanticStore`].
pub struct CorpusCompiler<'a> {
    extractor: FieldExtractor,
    builder: GraphBuilder<'a>,
    extension: String,
    strict: bool,
}

impl<'a> CorpusCompiler<'a> {
    pub fn new(store: &'a SemanticStore, vocab: ModelVocabulary, config: &BiblioConfig) -> Self {
        Self {
            extractor: FieldExtractor::new(config.record_namespace.clone()),
            builder: GraphBuilder::new(store, vocab),
            extension: config.record_extension.clone(),
            strict: config.strict,
        }
    }

    /// Compile every record file in `dir` (see [`list_records`]).
    pub fn compile_dir(&mut self, dir: &Path) -> CorpusResult<CompileReport> {
        let paths = list_records(dir, &self.extension)?;
        tracing::info!(dir = %dir.display(), records = paths.len(), "compiling corpus");
        self.compile(&paths)
    }

    /// Compile the given record files in order.
    pub fn compile(&mut self, paths: &[PathBuf]) -> CorpusResult<CompileReport> {
        let mut report = CompileReport::default();
        for path in paths {
            report.records_seen += 1;
            match self.compile_one(path) {
                Ok(_) => report.compiled += 1,
                Err(BiblioError::Graph(e @ GraphError::Store { .. })) => return Err(e.into()),
                Err(e) if self.strict => {
                    return Err(CorpusError::Strict {
                        path: path.display().to_string(),
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping record");
                    report.skipped.push(SkippedRecord {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        report.graph = self.builder.stats();
        tracing::info!(%report, "corpus compiled");
        Ok(report)
    }

    fn compile_one(&mut self, path: &Path) -> BiblioResult<DocumentOutcome> {
        let fields = self.extractor.read_record(path)?;
        Ok(self.builder.add_document(&fields)?)
    }
}

/// Write the store's default graph as Turtle to `path`.
///
/// Returns the number of triples written.
pub fn write_turtle(store: &SemanticStore, vocab: &ModelVocabulary, path: &Path) -> CorpusResult<usize> {
    let output_err = |e| CorpusError::Output {
        path: path.display().to_string(),
        source: e,
    };
    let file = std::fs::File::create(path).map_err(output_err)?;
    let prefixes = [
        ("model", vocab.namespace()),
        ("rdf", RDF_NAMESPACE),
        ("xsd", XSD_NAMESPACE),
    ];
    let mut writer = store.dump_turtle(std::io::BufWriter::new(file), &prefixes)?;
    writer.flush().map_err(output_err)?;
    let triples = store.len()?;
    tracing::info!(path = %path.display(), triples, "graph written");
    Ok(triples)
}
