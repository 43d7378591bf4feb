//! Run configuration, optionally loaded from a TOML file.
//!
//! Every key has a default, so an empty file (or no file at all) yields a
//! working configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Dublin Core elements namespace used by OAI-DC records.
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Default namespace for compiled graph classes and properties.
pub const MODEL_NAMESPACE: &str = "http://www.biblio-graph.org/model#";

/// Configuration shared by the `generate` and `search` phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BiblioConfig {
    /// Namespace for the compiled graph (classes, predicates, entity keys).
    #[serde(default = "default_model_namespace")]
    pub model_namespace: String,
    /// Namespace of the metadata elements inside each record.
    #[serde(default = "default_record_namespace")]
    pub record_namespace: String,
    /// File extension (without dot) of record files in the corpus directory.
    #[serde(default = "default_record_extension")]
    pub record_extension: String,
    /// SPARQL variable that carries the matched document in each need query.
    #[serde(default = "default_result_variable")]
    pub result_variable: String,
    /// Model properties (local names) covered by the full-text index.
    #[serde(default = "default_text_fields")]
    pub text_fields: Vec<String>,
    /// Abort compilation on the first bad record instead of skipping it.
    #[serde(default)]
    pub strict: bool,
}

fn default_model_namespace() -> String {
    MODEL_NAMESPACE.into()
}
fn default_record_namespace() -> String {
    DC_NAMESPACE.into()
}
fn default_record_extension() -> String {
    "xml".into()
}
fn default_result_variable() -> String {
    "x".into()
}
fn default_text_fields() -> Vec<String> {
    [
        "language",
        "date",
        "title",
        "subject",
        "description",
        "creator",
        "contributor",
        "publisher",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for BiblioConfig {
    fn default() -> Self {
        Self {
            model_namespace: default_model_namespace(),
            record_namespace: default_record_namespace(),
            record_extension: default_record_extension(),
            result_variable: default_result_variable(),
            text_fields: default_text_fields(),
            strict: false,
        }
    }
}

impl BiblioConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "(inline)".into(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        for ns in [&self.model_namespace, &self.record_namespace] {
            oxigraph::model::NamedNode::new(ns.as_str()).map_err(|e| {
                ConfigError::InvalidNamespace {
                    iri: ns.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        if !self.model_namespace.ends_with('#') && !self.model_namespace.ends_with('/') {
            return Err(ConfigError::InvalidNamespace {
                iri: self.model_namespace.clone(),
                message: "model namespace must end with '#' or '/'".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = BiblioConfig::from_toml("").unwrap();
        assert_eq!(config, BiblioConfig::default());
        assert_eq!(config.result_variable, "x");
        assert_eq!(config.text_fields.len(), 8);
    }

    #[test]
    fn overrides_are_applied() {
        let config = BiblioConfig::from_toml(
            r#"
            model_namespace = "http://example.org/m/"
            strict = true
            text_fields = ["title"]
            "#,
        )
        .unwrap();
        assert_eq!(config.model_namespace, "http://example.org/m/");
        assert!(config.strict);
        assert_eq!(config.text_fields, vec!["title".to_string()]);
        assert_eq!(config.record_namespace, DC_NAMESPACE);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = BiblioConfig::from_toml("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn namespace_without_separator_rejected() {
        let err = BiblioConfig::from_toml("model_namespace = \"http://example.org/m\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNamespace { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("biblio.toml");
        std::fs::write(&path, "result_variable = \"doc\"\n").unwrap();
        let config = BiblioConfig::load(&path).unwrap();
        assert_eq!(config.result_variable, "doc");

        let err = BiblioConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
