//! Sequential pipeline: receipt directory in, one CSV table out.
//!
//! Files are processed one at a time in file-name order. Any error while
//! reading or parsing a document aborts the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::row::CanonicalRow;
use crate::models::schema::Schema;
use crate::output::RowWriter;
use crate::pdf::PdfExtractor;
use crate::receipt::{
    parse_html, HtmlReceiptExtractor, ReceiptExtractor, ReceiptKind, TextReceiptExtractor,
};

/// Outcome of processing one receipt file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: ReceiptKind,
    pub rows: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Receipt files processed.
    pub files: usize,
    pub html_files: usize,
    pub pdf_files: usize,
    /// Data rows written (header excluded).
    pub rows: usize,
    pub output_path: PathBuf,
}

/// Dispatches receipt files to their extractor and writes the result.
pub struct Pipeline {
    html: HtmlReceiptExtractor,
    text: TextReceiptExtractor,
    fallback_full_text: bool,
}

impl Pipeline {
    /// Create a pipeline from the extraction settings.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            html: HtmlReceiptExtractor::new(config)?,
            text: TextReceiptExtractor::new(config),
            fallback_full_text: config.pdf.fallback_full_text,
        })
    }

    /// Receipt files directly inside `dir`, sorted by file name.
    /// Subdirectories and unsupported extensions are skipped.
    pub fn receipt_files(dir: &Path) -> Result<Vec<(PathBuf, ReceiptKind)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(kind) = ReceiptKind::from_path(&path) else {
                debug!("Skipping {}", path.display());
                continue;
            };
            // Follows symlinks.
            if fs::metadata(&path)?.is_file() {
                files.push((path, kind));
            }
        }

        files.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
        Ok(files)
    }

    /// Extract rows from a single receipt file.
    pub fn extract_file(&self, path: &Path, kind: ReceiptKind) -> Result<Vec<CanonicalRow>> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let rows = match kind {
            ReceiptKind::Html => {
                let source = fs::read_to_string(path)?;
                let document = parse_html(&source);
                self.html.extract(&document, &filename)
            }
            ReceiptKind::Pdf => {
                let text = PdfExtractor::new()
                    .with_fallback_full_text(self.fallback_full_text)
                    .open(path)?
                    .receipt_text()?;
                self.text.extract(&text, &filename)
            }
        };

        info!("Extracted {} rows from {}", rows.len(), filename);
        Ok(rows)
    }

    /// Extract rows from every receipt in `dir`, in file order.
    pub fn collect_rows<F>(&self, dir: &Path, mut on_file: F) -> Result<Vec<CanonicalRow>>
    where
        F: FnMut(&FileReport),
    {
        let mut all_rows = Vec::new();
        for (path, kind) in Self::receipt_files(dir)? {
            let rows = self.extract_file(&path, kind)?;
            on_file(&FileReport {
                path,
                kind,
                rows: rows.len(),
            });
            all_rows.extend(rows);
        }
        Ok(all_rows)
    }

    /// Process `dir` and write the combined table to `output`.
    pub fn run(&self, schema: &Schema, dir: &Path, output: &Path) -> Result<RunSummary> {
        self.run_with(schema, dir, output, |_| {})
    }

    /// Like [`Pipeline::run`], reporting each processed file to `on_file`.
    pub fn run_with<F>(
        &self,
        schema: &Schema,
        dir: &Path,
        output: &Path,
        mut on_file: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&FileReport),
    {
        let mut summary = RunSummary {
            output_path: output.to_path_buf(),
            ..RunSummary::default()
        };

        let rows = self.collect_rows(dir, |report| {
            summary.files += 1;
            match report.kind {
                ReceiptKind::Html => summary.html_files += 1,
                ReceiptKind::Pdf => summary.pdf_files += 1,
            }
            on_file(report);
        })?;

        RowWriter::new(schema).write_to_path(output, &rows)?;
        summary.rows = rows.len();

        info!(
            "Wrote {} rows from {} files to {}",
            summary.rows,
            summary.files,
            output.display()
        );
        Ok(summary)
    }
}
