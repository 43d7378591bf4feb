//! biblio CLI: compile bibliographic records into RDF and search them.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use biblio_graph::config::BiblioConfig;
use biblio_graph::corpus::{CorpusCompiler, write_turtle};
use biblio_graph::error::SearchError;
use biblio_graph::graph::{ModelVocabulary, SemanticStore};
use biblio_graph::search::{QueryBatchRunner, ResultWriter, TextIndex, read_needs};

#[derive(Parser)]
#[command(name = "biblio", version, about = "Bibliographic RDF compiler and semantic search")]
struct Cli {
    /// TOML configuration file (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a directory of XML records into a Turtle graph.
    Generate {
        /// Output Turtle file.
        #[arg(long)]
        rdf: PathBuf,

        /// Directory holding one XML record per document.
        #[arg(long)]
        docs: PathBuf,

        /// Write a JSON compile report here.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Run information needs against a compiled graph.
    Search {
        /// Turtle graph produced by `generate`.
        #[arg(long)]
        rdf: PathBuf,

        /// XML file with the information needs.
        #[arg(long)]
        info_needs: PathBuf,

        /// Results file (`need<TAB>document` lines).
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BiblioConfig::load_or_default(cli.config.as_deref())?;
    let vocab = ModelVocabulary::new(&config.model_namespace)?;

    match cli.command {
        Commands::Generate { rdf, docs, report } => {
            let store = SemanticStore::in_memory()?;
            let mut compiler = CorpusCompiler::new(&store, vocab.clone(), &config);
            let compiled = compiler.compile_dir(&docs)?;
            let triples = write_turtle(&store, &vocab, &rdf)?;

            if let Some(path) = report {
                let json = compiled.to_json().into_diagnostic()?;
                std::fs::write(&path, json).into_diagnostic()?;
                println!("Report written to {}", path.display());
            }
            println!("{compiled}");
            println!("Wrote {triples} triples to {}", rdf.display());
        }

        Commands::Search {
            rdf,
            info_needs,
            output,
        } => {
            let store = SemanticStore::from_turtle_file(&rdf)?;
            let index = TextIndex::build(&store, &vocab, &config.text_fields)?;
            let needs = read_needs(&info_needs)?;

            let file = std::fs::File::create(&output).map_err(|source| SearchError::Output { source })?;
            let mut writer = ResultWriter::new(std::io::BufWriter::new(file));
            let runner = QueryBatchRunner::new(&store, Arc::new(index), &config);
            let summary = runner.run(&needs, &mut writer)?;
            let rows = writer.rows();
            writer.finish()?;
            tracing::info!(rows, path = %output.display(), "results written");

            println!("{summary}");
            println!("Results written to {}", output.display());
        }
    }

    Ok(())
}
