//! Information-need files.
//!
//! ```xml
//! <informationNeeds>
//!   <informationNeed>
//!     <identifier>N1</identifier>
//!     <text>SELECT ?x WHERE { ... }</text>
//!   </informationNeed>
//! </informationNeeds>
//! ```

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{SearchError, SearchResult};

/// One structured query to run against the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoNeed {
    pub id: String,
    /// Raw query text, before sanitizing.
    pub text: String,
}

/// Parse every `informationNeed` element, in document order.
///
/// Elements are matched by local name at any depth. A need without an
/// `identifier` or `text` child is skipped.
pub fn parse_needs(xml: &str) -> SearchResult<Vec<InfoNeed>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(xml, options).map_err(|e| SearchError::NeedsParse {
        message: e.to_string(),
    })?;

    let mut needs = Vec::new();
    for (position, node) in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "informationNeed")
        .enumerate()
    {
        let id = child_text(node, "identifier").map(|s| s.trim().to_string());
        let text = child_text(node, "text");
        match (id, text) {
            (Some(id), Some(text)) if !id.is_empty() => needs.push(InfoNeed { id, text }),
            _ => tracing::warn!(position, "information need without identifier or text, skipped"),
        }
    }
    tracing::debug!(needs = needs.len(), "information needs parsed");
    Ok(needs)
}

/// Read and parse an information-need file.
pub fn read_needs(path: &Path) -> SearchResult<Vec<InfoNeed>> {
    let xml = std::fs::read_to_string(path).map_err(|e| SearchError::NeedsRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_needs(&xml)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .map(|n| {
            n.descendants()
                .filter(|d| d.is_text())
                .filter_map(|d| d.text())
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_needs_in_order() {
        let xml = r#"<informationNeeds>
  <informationNeed><identifier>N1</identifier><text>SELECT ?x WHERE { ?x ?p ?o }</text></informationNeed>
  <informationNeed><identifier> N2 </identifier><text><![CDATA[SELECT ?x WHERE { FILTER(1 < 2) }]]></text></informationNeed>
</informationNeeds>"#;
        let needs = parse_needs(xml).unwrap();
        assert_eq!(needs.len(), 2);
        assert_eq!(needs[0].id, "N1");
        assert_eq!(needs[1].id, "N2");
        assert_eq!(needs[1].text, "SELECT ?x WHERE { FILTER(1 < 2) }");
    }

    #[test]
    fn incomplete_needs_are_skipped() {
        let xml = r#"<n:needs xmlns:n="urn:needs">
  <n:informationNeed><n:identifier>A</n:identifier></n:informationNeed>
  <n:informationNeed><n:text>q</n:text></n:informationNeed>
  <n:informationNeed><n:identifier>B</n:identifier><n:text>q</n:text></n:informationNeed>
</n:needs>"#;
        let needs = parse_needs(xml).unwrap();
        assert_eq!(needs, vec![InfoNeed { id: "B".into(), text: "q".into() }]);
    }

    #[test]
    fn doctype_is_accepted() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE informationNeeds SYSTEM "needs.dtd">
<informationNeeds>
  <informationNeed><identifier>N1</identifier><text>q</text></informationNeed>
</informationNeeds>"#;
        let needs = parse_needs(xml).unwrap();
        assert_eq!(needs, vec![InfoNeed { id: "N1".into(), text: "q".into() }]);
    }

    #[test]
    fn malformed_xml_is_fatal() {
        assert!(matches!(
            parse_needs("<informationNeeds>").unwrap_err(),
            SearchError::NeedsParse { .. }
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_needs(&dir.path().join("none.xml")).unwrap_err();
        assert!(matches!(err, SearchError::NeedsRead { .. }));
    }
}
