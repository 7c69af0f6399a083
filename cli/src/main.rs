//! realscore CLI - score a document from the command line.
//!
//! Reads a file, records it in the document store, runs one analysis pass,
//! and prints the resulting scores as JSON on stdout. Logs go to stderr so
//! the JSON output stays clean for piping.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use realscore_engine::{
    AnalysisOrchestrator, Document, DocumentStore, JsonFileStore, LocalEncoder, PassOutcome,
    RealscoreConfig, default_data_dir,
};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: realscore <file>");
    };

    let config = match RealscoreConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Ignoring unusable config: {err}");
            None
        }
    };
    let settings = config
        .as_ref()
        .map(RealscoreConfig::settings)
        .unwrap_or_default();
    let data_dir = config
        .as_ref()
        .and_then(RealscoreConfig::data_dir)
        .map_or_else(default_data_dir, Path::to_path_buf);

    let store = Arc::new(
        JsonFileStore::open(data_dir.join("documents")).context("failed to open document store")?,
    );

    let provider = Arc::new(LocalEncoder::new());
    provider.bootstrap();
    tracing::info!("Embedding provider ready");

    let min_words = settings.min_words;
    let (orchestrator, _updates) = AnalysisOrchestrator::new(store.clone(), provider, settings);

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let title = path.file_stem().map_or_else(
        || "Untitled Document".to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    );

    let document = Document::new(title, content.clone());
    store
        .put(&document)
        .context("failed to record the document")?;

    match orchestrator.analyze_now(document.id, &content)? {
        PassOutcome::Applied(scores) => {
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
        PassOutcome::TooShort { words } => {
            bail!("document has only {words} words; at least {min_words} are needed for analysis");
        }
        PassOutcome::Superseded { applied } => {
            bail!("pass superseded by a later analysis (sequence {applied})");
        }
    }

    Ok(())
}
