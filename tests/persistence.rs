//! The Turtle file is the hand-off between the compile and search phases.
//! These tests check that it carries the whole graph and nothing else.

use std::path::{Path, PathBuf};

use oxigraph::sparql::SparqlEvaluator;

use biblio_graph::config::BiblioConfig;
use biblio_graph::corpus::{CorpusCompiler, write_turtle};
use biblio_graph::graph::{ModelVocabulary, SemanticStore};

const RECORDS: &[(&str, &str)] = &[
    (
        "b.xml",
        r#"<r xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier>http://repo.example/2</dc:identifier>
  <dc:type>TAZ-TFM</dc:type>
  <dc:title>Redes neuronales</dc:title>
  <dc:contributor>Luis Pérez</dc:contributor>
  <dc:relation>http://repo.example/files/2.pdf</dc:relation>
</r>"#,
    ),
    (
        "a.xml",
        r#"<r xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier>http://repo.example/1</dc:identifier>
  <dc:type>TAZ-PFC</dc:type>
  <dc:title>Compiladores</dc:title>
  <dc:date>2012</dc:date>
  <dc:language>spa</dc:language>
  <dc:creator>Pérez, Luis</dc:creator>
</r>"#,
    ),
];

fn write_records(dir: &Path) {
    for (name, xml) in RECORDS {
        std::fs::write(dir.join(name), xml).unwrap();
    }
}

fn generate(config: &BiblioConfig, records: &Path, out: &Path) -> (usize, SemanticStore) {
    let vocab = ModelVocabulary::new(&config.model_namespace).unwrap();
    let store = SemanticStore::in_memory().unwrap();
    let mut compiler = CorpusCompiler::new(&store, vocab.clone(), config);
    let report = compiler.compile_dir(records).unwrap();
    assert_eq!(report.compiled, RECORDS.len());
    let triples = write_turtle(&store, &vocab, out).unwrap();
    (triples, store)
}

fn rows(store: &SemanticStore, sparql: &str) -> Vec<Vec<String>> {
    store
        .select(SparqlEvaluator::new(), sparql)
        .unwrap()
        .iter()
        .map(|solution| solution.iter().map(|(_, term)| term.to_string()).collect())
        .collect()
}

fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let records = dir.path().join("records");
    std::fs::create_dir(&records).unwrap();
    write_records(&records);
    (dir, records)
}

#[test]
fn reloaded_graph_matches_compiled_graph() {
    let (dir, records) = workspace();
    let ttl = dir.path().join("graph.ttl");
    let (triples, compiled) = generate(&BiblioConfig::default(), &records, &ttl);

    let reloaded = SemanticStore::from_turtle_file(&ttl).unwrap();
    assert_eq!(reloaded.len().unwrap(), triples);

    let query = "SELECT ?s ?p ?o WHERE { ?s ?p ?o } ORDER BY ?s ?p ?o";
    assert_eq!(rows(&reloaded, query), rows(&compiled, query));
}

#[test]
fn output_is_deterministic() {
    let (dir, records) = workspace();
    let first = dir.path().join("one.ttl");
    let second = dir.path().join("two.ttl");
    generate(&BiblioConfig::default(), &records, &first);
    generate(&BiblioConfig::default(), &records, &second);

    let one = SemanticStore::from_turtle_file(&first).unwrap();
    let two = SemanticStore::from_turtle_file(&second).unwrap();
    let query = "SELECT ?s ?p ?o WHERE { ?s ?p ?o } ORDER BY ?s ?p ?o";
    assert_eq!(rows(&one, query), rows(&two, query));
}

#[test]
fn configured_namespace_is_used_throughout() {
    let (dir, records) = workspace();
    let config_path = dir.path().join("biblio.toml");
    std::fs::write(
        &config_path,
        "model_namespace = \"http://library.example/ns/\"\n",
    )
    .unwrap();
    let config = BiblioConfig::load(&config_path).unwrap();

    let ttl = dir.path().join("graph.ttl");
    let (_, store) = generate(&config, &records, &ttl);

    let text = std::fs::read_to_string(&ttl).unwrap();
    assert!(text.contains("@prefix model: <http://library.example/ns/>"));
    assert!(!text.contains("biblio-graph.org"));

    // "Pérez, Luis" and "Luis Pérez" slug differently, so they stay apart.
    let persons = rows(
        &store,
        "SELECT ?p WHERE { ?p a <http://library.example/ns/Person> } ORDER BY ?p",
    );
    assert_eq!(persons.len(), 2);

    let urls = rows(
        &store,
        "SELECT ?u WHERE { ?r a <http://library.example/ns/UrlResource> ; \
         <http://library.example/ns/url> ?u }",
    );
    assert_eq!(urls, vec![vec!["\"http://repo.example/files/2.pdf\"".to_string()]]);
}
