//! Jena-style `text:query` property functions.
//!
//! Queries written for a Jena text dataset put the text search in subject
//! position:
//!
//! ```sparql
//! ?x text:query (model:title "energía solar") .
//! ?x text:query ("energía") .
//! ?x text:query "energía" .
//! ```
//!
//! Each such pattern binds `?x` to the matching subjects. It is expanded into
//! an inline `VALUES ?x { ... }` block computed from the [`TextIndex`] before
//! the query reaches the SPARQL engine. An optional trailing hit limit inside
//! the list is accepted and ignored.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{SearchError, SearchResult};
use crate::search::text_index::TextIndex;

static RE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPREFIX\s+([A-Za-z][\w.-]*)?:\s*<([^>]*)>").unwrap());

static RE_PROPERTY_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([?$]\w+)\s+text:query\s+(?:\(\s*(?:(<[^>]*>|[A-Za-z][\w.-]*:[\w.-]*|:[\w.-]*)\s+)?("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')(?:\s+\d+)?\s*\)|("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'))[ \t]*\.?"#,
    )
    .unwrap()
});

/// `text:query` right after a subject term, i.e. used as a predicate.
static RE_PREDICATE_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?$]\w+|>|[\w.-]+:[\w.-]*)\s+text:query\b").unwrap());

/// Expand every `?s text:query ...` pattern in `query`.
///
/// Fails when a pattern uses an undeclared prefix, its text query is
/// rejected by the index, or `text:query` appears as a predicate in a shape
/// that cannot be expanded.
pub fn expand_property_functions(query: &str, index: &TextIndex) -> SearchResult<String> {
    if !RE_PROPERTY_FUNCTION.is_match(query) {
        return check_leftovers(query.to_string());
    }
    let prefixes: HashMap<&str, &str> = RE_PREFIX
        .captures_iter(query)
        .map(|c| (c.get(1).map_or("", |m| m.as_str()), c.get(2).map_or("", |m| m.as_str())))
        .collect();

    let mut out = String::with_capacity(query.len());
    let mut last = 0;
    for caps in RE_PROPERTY_FUNCTION.captures_iter(query) {
        let Some(whole) = caps.get(0) else { continue };
        let variable = &caps[1];
        let property = caps
            .get(2)
            .map(|m| resolve(m.as_str(), &prefixes))
            .transpose()?;
        let literal = caps.get(3).or_else(|| caps.get(4)).map_or("\"\"", |m| m.as_str());
        let text = unquote(literal);

        let mut subjects: Vec<String> = index
            .search(property.as_deref(), &text)?
            .into_iter()
            .filter(|s| s.starts_with('<'))
            .collect();
        subjects.sort();
        tracing::debug!(variable, property = ?property, query = %text, matches = subjects.len(), "expanded text:query pattern");

        out.push_str(&query[last..whole.start()]);
        out.push_str(&format!("VALUES {variable} {{ {} }}", subjects.join(" ")));
        last = whole.end();
    }
    out.push_str(&query[last..]);
    check_leftovers(out)
}

fn check_leftovers(query: String) -> SearchResult<String> {
    match RE_PREDICATE_USE.find(&query) {
        Some(m) => Err(SearchError::TextQuery {
            query: m.as_str().to_string(),
            message: "unsupported text:query pattern; use `?s text:query (property \"q\")` \
                      or FILTER(text:query(?s, property, \"q\"))"
                .into(),
        }),
        None => Ok(query),
    }
}

/// Property term → IRI.
fn resolve(term: &str, prefixes: &HashMap<&str, &str>) -> SearchResult<String> {
    if let Some(iri) = term.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(iri.to_string());
    }
    let (prefix, local) = term.split_once(':').unwrap_or(("", term));
    prefixes
        .get(prefix)
        .map(|ns| format!("{ns}{local}"))
        .ok_or_else(|| SearchError::TextQuery {
            query: term.to_string(),
            message: format!("undeclared prefix \"{prefix}:\""),
        })
}

/// Strip the quotes of a SPARQL string literal and undo its escapes.
fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
