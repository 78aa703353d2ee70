use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use clinical_surrogates::logging::init_logging;
use clinical_surrogates::rewrite::tag_placeholder;
use clinical_surrogates::{
    apply_surrogates, brat, mask_annotations, table, DatasetDeidentifier, ErrorPolicy,
    SurrogateConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "clinical-surrogates",
    about = "CLI tool that replaces annotated PHI in brat datasets with realistic surrogates.",
    version,
    author = ""
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level: trace, debug, info, warn or error. RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress the run summary.
    #[arg(long, global = true)]
    quiet: bool,

    /// Emit the run summary as JSON to stderr.
    #[arg(long, global = true)]
    stats_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a surrogate for every annotation and write the review table.
    Generate {
        /// Directory with brat .txt/.ann pairs.
        dataset_dir: PathBuf,

        /// CSV review table to create. Must not exist yet.
        output_table: PathBuf,

        /// Path to JSON config.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overrides the seed from the config.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rewrite a dataset with the surrogates of a (reviewed) table.
    Rewrite {
        /// CSV review table written by `generate`.
        table: PathBuf,

        /// Directory with the original brat .txt/.ann pairs.
        dataset_dir: PathBuf,

        /// Directory to write the rewritten documents to.
        output_dir: PathBuf,

        /// Path to JSON config.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Handling of annotations without surrogate. Overrides the config.
        #[arg(long, value_enum)]
        errors: Option<ErrorPolicy>,
    },

    /// Replace every annotation with its bracketed tag, e.g. [NAME].
    Mask {
        dataset_dir: PathBuf,
        output_dir: PathBuf,
    },
}

#[derive(Debug, Default, Serialize)]
struct RunStats {
    documents: usize,
    annotations: usize,
    without_surrogate: usize,
    copied: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let stats = match args.command {
        Command::Generate {
            dataset_dir,
            output_table,
            config,
            seed,
        } => generate(&dataset_dir, &output_table, config.as_deref(), seed)?,
        Command::Rewrite {
            table,
            dataset_dir,
            output_dir,
            config,
            errors,
        } => {
            let config = SurrogateConfig::load(config.as_deref())?;
            let errors = errors.unwrap_or(config.errors);
            rewrite(&table, &dataset_dir, &output_dir, errors)?
        }
        Command::Mask {
            dataset_dir,
            output_dir,
        } => mask(&dataset_dir, &output_dir)?,
    };

    if !args.quiet {
        report_stats(&stats, args.stats_json)?;
    }

    Ok(())
}

fn load_documents(dataset_dir: &Path) -> Result<Vec<clinical_surrogates::SurrogateDocument>> {
    let names = brat::document_names(dataset_dir)
        .with_context(|| format!("failed to list dataset: {}", dataset_dir.display()))?;
    info!(documents = names.len(), dir = %dataset_dir.display(), "loading brat documents");

    names
        .iter()
        .map(|name| {
            brat::load_document(dataset_dir, name)
                .with_context(|| format!("failed to load document: {}", name))
        })
        .collect()
}

fn generate(
    dataset_dir: &Path,
    output_table: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<RunStats> {
    if output_table.exists() {
        bail!(
            "output table already exists, refusing to overwrite: {}",
            output_table.display()
        );
    }

    let mut config = SurrogateConfig::load(config_path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let documents = load_documents(dataset_dir)?;
    let deidentifier = DatasetDeidentifier::from_config(&config)?;
    let results = deidentifier
        .generate_surrogates(documents)
        .context("failed to generate surrogates")?;

    let records = table::records_for_documents(&results);
    table::write_table_file(output_table, &records)
        .with_context(|| format!("failed to write surrogate table: {}", output_table.display()))?;
    info!(rows = records.len(), table = %output_table.display(), "wrote surrogate table");

    Ok(RunStats {
        documents: results.len(),
        annotations: records.len(),
        without_surrogate: records.iter().filter(|r| r.surrogate.is_none()).count(),
        copied: 0,
    })
}

fn rewrite(
    table_path: &Path,
    dataset_dir: &Path,
    output_dir: &Path,
    errors: ErrorPolicy,
) -> Result<RunStats> {
    let records = table::read_table_file(table_path)
        .with_context(|| format!("failed to read surrogate table: {}", table_path.display()))?;
    let groups = table::group_by_document(records);
    info!(documents = groups.len(), "rewriting documents");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let mut stats = RunStats::default();
    for (doc_id, rows) in &groups {
        let text = brat::load_text(&dataset_dir.join(format!("{}.txt", doc_id)))
            .with_context(|| format!("failed to load document: {}", doc_id))?;
        let annotations: Vec<_> = rows.iter().map(|row| row.annotation()).collect();
        let surrogates: Vec<Option<&str>> =
            rows.iter().map(|row| row.effective_surrogate()).collect();

        let rewritten = apply_surrogates(&text, &annotations, &surrogates, errors)
            .with_context(|| format!("failed to rewrite document: {}", doc_id))?;
        for annotation in &rewritten.annotations_without_surrogate {
            warn!(
                document = %doc_id,
                annotation = %annotation,
                policy = ?errors,
                "annotation was not replaced by a surrogate"
            );
        }

        brat::write_document(output_dir, doc_id, &rewritten.text, &rewritten.annotations)
            .with_context(|| format!("failed to write document: {}", doc_id))?;

        stats.documents += 1;
        stats.annotations += rewritten.annotations.len();
        stats.without_surrogate += rewritten.annotations_without_surrogate.len();
    }

    let names = brat::document_names(dataset_dir)
        .with_context(|| format!("failed to list dataset: {}", dataset_dir.display()))?;
    for name in names.iter().filter(|name| !groups.contains_key(*name)) {
        brat::copy_document(dataset_dir, output_dir, name)
            .with_context(|| format!("failed to copy document: {}", name))?;
        stats.copied += 1;
    }
    info!(copied = stats.copied, "copied documents without annotations");

    Ok(stats)
}

fn mask(dataset_dir: &Path, output_dir: &Path) -> Result<RunStats> {
    let documents = load_documents(dataset_dir)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let mut stats = RunStats::default();
    for document in &documents {
        let masked = mask_annotations(document.text(), document.all_annotations(), tag_placeholder)
            .with_context(|| format!("failed to mask document: {}", document.name()))?;
        brat::write_document(output_dir, document.name(), &masked.text, &masked.annotations)
            .with_context(|| format!("failed to write document: {}", document.name()))?;

        stats.documents += 1;
        stats.annotations += masked.annotations.len();
    }

    Ok(stats)
}

fn report_stats(stats: &RunStats, as_json: bool) -> Result<()> {
    if as_json {
        let payload = serde_json::to_string_pretty(stats).context("failed to serialize stats")?;
        eprintln!("{}", payload);
    } else {
        eprintln!("Documents processed: {}", stats.documents);
        eprintln!("  annotations       : {}", stats.annotations);
        if stats.without_surrogate > 0 {
            eprintln!("  without surrogate : {}", stats.without_surrogate);
        }
        if stats.copied > 0 {
            eprintln!("  copied unchanged  : {}", stats.copied);
        }
    }
    Ok(())
}
