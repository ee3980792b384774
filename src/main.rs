#![forbid(unsafe_code)]
//! # Corpus Insights CLI
//!
//! Command-line front end for the `corpus_insights` crate. Ingests `.txt`,
//! `.md`, `.pdf`, `.docx` and `.odt` files from a file or directory, runs the
//! analysis pipeline, prints a report, and exports the result views.
//!
//! ## Example
//! ```bash
//! cargo run --release -- path/to/corpus --search cat --export-format csv
//! ```
//!
//! See `--help` for all available options.

use std::path::Path;
use std::process;

use clap::Parser;
use log::error;

use corpus_insights::{
    AnalysisEngine, AnalysisOptions, CorpusVersion, ExportFormat, export_views, load_documents,
    load_extra_stopwords, render_report, report_failed_files,
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File or directory to analyze
    path: String,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<String>,

    /// Concordance context half-width in tokens
    #[arg(long, default_value_t = 7)]
    window: usize,

    /// Keyword-in-context search term
    #[arg(long)]
    search: Option<String>,

    /// Output format for export (txt, csv, tsv, json)
    #[arg(long, default_value = "txt")]
    export_format: ExportFormat,

    /// Directory for export files
    #[arg(long, default_value = ".")]
    out: String,

    /// Skip writing export files, print the report only
    #[arg(long, default_value_t = false)]
    no_export: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let path = Path::new(&cli.path);
    if !path.exists() {
        error!("path does not exist: {}", cli.path);
        process::exit(1);
    }

    let mut options = AnalysisOptions {
        context_window: cli.window,
        ..AnalysisOptions::default()
    };
    if let Some(stopword_path) = &cli.stopwords {
        match load_extra_stopwords(Path::new(stopword_path)) {
            Ok(extra) => options.extra_stopwords = extra,
            Err(e) => {
                error!("could not read stopword file {stopword_path}: {e}");
                process::exit(1);
            }
        }
    }

    let report = load_documents(path);
    if report.documents.is_empty() && !report.failed.is_empty() {
        report_failed_files(&report.failed);
        error!("no readable documents under {}", cli.path);
        process::exit(1);
    }

    let mut engine = AnalysisEngine::new(options);
    engine.recompute(&report.documents, CorpusVersion::of(&report.documents));
    if let Some(term) = &cli.search {
        engine.search(term);
    }

    println!("{}", render_report(engine.views()));
    if !report.failed.is_empty() {
        report_failed_files(&report.failed);
    }

    if !cli.no_export {
        match export_views(engine.views(), cli.export_format, Path::new(&cli.out)) {
            Ok(written) => {
                for file in written {
                    println!("Wrote {}", file.display());
                }
            }
            Err(e) => {
                error!("export failed: {e}");
                process::exit(1);
            }
        }
    }
}
