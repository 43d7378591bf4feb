//! Rich diagnostic error types for record reading.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from reading a single metadata record.
///
/// These are recoverable at corpus level: the record is skipped and
/// compilation continues.
#[derive(Debug, Error, Diagnostic)]
pub enum RecordError {
    #[error("failed to read record {path}")]
    #[diagnostic(
        code(biblio::record::io),
        help("Check that the file exists, is readable and is UTF-8 encoded.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {origin}: {message}")]
    #[diagnostic(
        code(biblio::record::parse),
        help(
            "The record could not be parsed as XML. Verify the file is \
             well-formed and not truncated."
        )
    )]
    Parse { origin: String, message: String },
}

/// Convenience alias for record operation results.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
