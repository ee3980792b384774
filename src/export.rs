//! Rendering and export of the published views.
//!
//! Exports are written as timestamped files so repeated runs never clobber
//! earlier results.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use csv::WriterBuilder;

use crate::analysis::AnalysisViews;
use crate::error::Result;
use crate::sentiment::SentimentLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

/// Neutralizes cells that a spreadsheet would interpret as formulas.
///
/// # Example
/// ```
/// use corpus_insights::csv_safe_cell;
/// assert_eq!(csv_safe_cell("=SUM(A1)".into()), "'=SUM(A1)");
/// assert_eq!(csv_safe_cell("plain".into()), "plain");
/// ```
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{cell}"),
        _ => cell,
    }
}

/// Writes the views in the requested format into `out_dir`.
///
/// Returns the paths written. CSV/TSV produce one table per view; TXT and
/// JSON produce a single file.
pub fn export_views(
    views: &AnalysisViews,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    match format {
        ExportFormat::Txt => {
            let path = out_dir.join(format!("analysis_{stamp}.txt"));
            fs::write(&path, render_report(views))?;
            Ok(vec![path])
        }
        ExportFormat::Json => {
            let path = out_dir.join(format!("analysis_{stamp}.json"));
            fs::write(&path, serde_json::to_string_pretty(views)?)?;
            Ok(vec![path])
        }
        ExportFormat::Csv => export_tables(views, out_dir, &stamp, b',', "csv"),
        ExportFormat::Tsv => export_tables(views, out_dir, &stamp, b'\t', "tsv"),
    }
}

fn export_tables(
    views: &AnalysisViews,
    out_dir: &Path,
    stamp: &str,
    delimiter: u8,
    ext: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let path = out_dir.join(format!("analysis_{stamp}_wordfreq.{ext}"));
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    wtr.write_record(["word", "count"])?;
    for entry in &views.word_frequency {
        wtr.write_record([csv_safe_cell(entry.word.clone()), entry.count.to_string()])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = out_dir.join(format!("analysis_{stamp}_sentiment.{ext}"));
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    wtr.write_record([
        "id",
        "date",
        "title",
        "score",
        "comparative",
        "label",
        "positive_words",
        "negative_words",
        "text_length",
    ])?;
    for record in &views.sentiment.items {
        wtr.write_record([
            csv_safe_cell(record.id.clone()),
            record.date.clone(),
            csv_safe_cell(record.title.clone()),
            record.sentiment_score.to_string(),
            format!("{:.4}", record.comparative),
            SentimentLabel::from_score(record.sentiment_score).to_string(),
            csv_safe_cell(record.positive_words.join(";")),
            csv_safe_cell(record.negative_words.join(";")),
            record.text_length.to_string(),
        ])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = out_dir.join(format!("analysis_{stamp}_topics.{ext}"));
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    wtr.write_record(["main_word", "related_words", "strength", "normalized"])?;
    for topic in &views.topics {
        wtr.write_record([
            csv_safe_cell(topic.main_word.clone()),
            csv_safe_cell(topic.related_words.join(";")),
            topic.strength.to_string(),
            format!("{:.4}", topic.normalized_strength),
        ])?;
    }
    wtr.flush()?;
    written.push(path);

    let path = out_dir.join(format!("analysis_{stamp}_summary.{ext}"));
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    let overall = &views.sentiment.overall;
    wtr.write_record([
        "ttr",
        "unique_words",
        "total_words",
        "sentiment_average",
        "sentiment_total",
        "sentiment_stddev",
        "positive_docs",
        "negative_docs",
    ])?;
    wtr.write_record([
        format!("{:.4}", views.ttr.ttr),
        views.ttr.unique_words.to_string(),
        views.ttr.total_words.to_string(),
        format!("{:.4}", overall.average),
        overall.total.to_string(),
        format!("{:.4}", overall.score_stddev),
        overall.positive_count.to_string(),
        overall.negative_count.to_string(),
    ])?;
    wtr.flush()?;
    written.push(path);

    if !views.concordance.is_empty() {
        let path = out_dir.join(format!("analysis_{stamp}_concordance.{ext}"));
        let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
        wtr.write_record(["position", "context"])?;
        for hit in &views.concordance {
            wtr.write_record([
                hit.position.to_string(),
                csv_safe_cell(hit.highlighted_context.clone()),
            ])?;
        }
        wtr.flush()?;
        written.push(path);
    }

    Ok(written)
}

/// Formats the views as a plain-text report.
pub fn render_report(views: &AnalysisViews) -> String {
    let mut out = String::new();
    let overall = &views.sentiment.overall;

    let _ = writeln!(out, "Corpus analysis");
    let _ = writeln!(out, "===============");
    let _ = writeln!(
        out,
        "Type/token ratio: {:.3} ({} unique / {} total)",
        views.ttr.ttr, views.ttr.unique_words, views.ttr.total_words
    );
    let _ = writeln!(
        out,
        "Sentiment: {:.2} average ({}), {} document(s) positive, {} negative",
        overall.average,
        SentimentLabel::from_score(overall.average),
        overall.positive_count,
        overall.negative_count
    );
    let _ = writeln!(out);

    if views.word_frequency.is_empty() {
        let _ = writeln!(out, "No words to rank (empty corpus).");
    } else {
        let _ = writeln!(out, "Top words:");
        for entry in &views.word_frequency {
            let _ = writeln!(out, "  {:<24} {}", entry.word, entry.count);
        }
    }
    let _ = writeln!(out);

    if !views.topics.is_empty() {
        let _ = writeln!(out, "Topics:");
        for topic in &views.topics {
            let _ = writeln!(
                out,
                "  {}: {} (strength {}, {:.2})",
                topic.main_word,
                topic.related_words.join(", "),
                topic.strength,
                topic.normalized_strength
            );
        }
        let _ = writeln!(out);
    }

    if !overall.top_positive.is_empty() || !overall.top_negative.is_empty() {
        let _ = writeln!(out, "Frequent sentiment words:");
        for (word, count) in &overall.top_positive {
            let _ = writeln!(out, "  +{:<23} {}", word, count);
        }
        for (word, count) in &overall.top_negative {
            let _ = writeln!(out, "  -{:<23} {}", word, count);
        }
        let _ = writeln!(out);
    }

    if !views.concordance.is_empty() {
        let _ = writeln!(out, "Concordance ({} hit(s)):", views.concordance.len());
        for hit in &views.concordance {
            let _ = writeln!(out, "  [{}] {}", hit.position, hit.highlighted_context);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisOptions, analyze};
    use crate::models::Document;

    fn sample_views() -> AnalysisViews {
        let docs = vec![Document::new(
            "1",
            "The happy cat sat. The sad cat ran away quickly.",
            "2024-01-01T00:00:00Z",
        )];
        analyze(&docs, &AnalysisOptions::default())
    }

    #[test]
    fn safe_cell_prefixes_dangerous_starts() {
        assert_eq!(csv_safe_cell("=X".into()), "'=X");
        assert_eq!(csv_safe_cell("+1".into()), "'+1");
        assert_eq!(csv_safe_cell("@cmd".into()), "'@cmd");
        assert_eq!(csv_safe_cell("-2".into()), "'-2");
    }

    #[test]
    fn safe_cell_leaves_safe_cells_alone() {
        assert_eq!(csv_safe_cell("'=already".into()), "'=already");
        assert_eq!(csv_safe_cell("normal".into()), "normal");
        assert_eq!(csv_safe_cell(String::new()), "");
    }

    #[test]
    fn csv_export_writes_one_table_per_view() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_views(&sample_views(), ExportFormat::Csv, dir.path()).unwrap();
        assert_eq!(written.len(), 4);
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.ends_with("_wordfreq.csv")));
        assert!(names.iter().any(|n| n.ends_with("_sentiment.csv")));
        assert!(names.iter().any(|n| n.ends_with("_topics.csv")));
        assert!(names.iter().any(|n| n.ends_with("_summary.csv")));
    }

    #[test]
    fn json_export_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_views(&sample_views(), ExportFormat::Json, dir.path()).unwrap();
        let raw = fs::read_to_string(&written[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("word_frequency").is_some());
        assert!(value.get("ttr").is_some());
    }

    #[test]
    fn report_mentions_core_sections() {
        let report = render_report(&sample_views());
        assert!(report.contains("Type/token ratio"));
        assert!(report.contains("Top words:"));
        assert!(report.contains("cat"));
    }

    #[test]
    fn report_handles_empty_views() {
        let report = render_report(&AnalysisViews::default());
        assert!(report.contains("No words to rank"));
    }
}
