//! Export types for reporting on a compilation run.
//!
//! These types give a human-readable summary of what the compiler did,
//! suitable for JSON export with `biblio generate --report`.

use serde::{Deserialize, Serialize};

use crate::graph::BuildStats;

/// Record that was left out of the compiled graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Path of the record file.
    pub path: String,
    /// Human-readable reason (the error message).
    pub reason: String,
}

/// Summary of one compilation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileReport {
    /// Record files visited.
    pub records_seen: usize,
    /// Records that became documents.
    pub compiled: usize,
    /// Records that were skipped, in processing order.
    pub skipped: Vec<SkippedRecord>,
    /// Builder totals after the run.
    pub graph: BuildStats,
}

impl CompileReport {
    /// Pretty JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for CompileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records, {} compiled, {} skipped; {} documents, {} persons, {} url resources, {} triples",
            self.records_seen,
            self.compiled,
            self.skipped.len(),
            self.graph.documents,
            self.graph.persons,
            self.graph.url_resources,
            self.graph.triples,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_export_names_fields() {
        let report = CompileReport {
            records_seen: 2,
            compiled: 1,
            skipped: vec![SkippedRecord {
                path: "bad.xml".into(),
                reason: "record has no identifier".into(),
            }],
            graph: BuildStats {
                documents: 1,
                persons: 1,
                url_resources: 0,
                triples: 4,
            },
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("\"records_seen\": 2"));
        assert!(json.contains("\"bad.xml\""));
        let back: CompileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert!(report.to_string().starts_with("2 records, 1 compiled, 1 skipped"));
    }
}
