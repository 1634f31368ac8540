//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the recx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecxConfig {
    /// Input locations.
    pub input: InputConfig,

    /// Output location.
    pub output: OutputConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Input file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Spreadsheet declaring the output columns.
    pub schema_path: PathBuf,

    /// Flat directory of `.html` and `.pdf` receipts.
    pub receipts_dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("schema.xlsx"),
            receipts_dir: PathBuf::from("receipts"),
        }
    }
}

/// Output file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file to write.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("final_output.csv"),
        }
    }
}

/// Receipt field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Symbols stripped from monetary values and accepted before amounts.
    pub currency_glyphs: Vec<String>,

    /// Markup (HTML) receipts.
    pub html: HtmlExtractionConfig,

    /// Text (PDF) receipts.
    pub pdf: PdfExtractionConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            // Rupee sign, and the same sign read as Windows-1252 mojibake
            currency_glyphs: vec!["\u{20b9}".to_string(), "\u{e2}\u{201a}\u{b9}".to_string()],
            html: HtmlExtractionConfig::default(),
            pdf: PdfExtractionConfig::default(),
        }
    }
}

/// Markup receipt settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlExtractionConfig {
    /// Vendor label stamped on every row.
    pub vendor: String,

    /// Timestamp stamped on every row; these receipts carry no usable date.
    pub placeholder_timestamp: String,
}

impl Default for HtmlExtractionConfig {
    fn default() -> Self {
        Self {
            vendor: "Swiggy".to_string(),
            placeholder_timestamp: "2025-06-25T10:00:00".to_string(),
        }
    }
}

/// Text receipt settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfExtractionConfig {
    /// Vendor label stamped on every row.
    pub vendor: String,

    /// Use whole-document extraction when per-page text is blank.
    pub fallback_full_text: bool,
}

impl Default for PdfExtractionConfig {
    fn default() -> Self {
        Self {
            vendor: "Zomato".to_string(),
            fallback_full_text: true,
        }
    }
}

impl RecxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: RecxConfig =
            serde_json::from_str(r#"{"output": {"path": "out.csv"}}"#).unwrap();

        assert_eq!(config.output.path, PathBuf::from("out.csv"));
        assert_eq!(config.input.receipts_dir, PathBuf::from("receipts"));
        assert_eq!(config.extraction.html.vendor, "Swiggy");
        assert_eq!(config.extraction.pdf.vendor, "Zomato");
        assert_eq!(config.extraction.currency_glyphs.len(), 2);
    }

    #[test]
    fn test_default_glyphs() {
        let config = ExtractionConfig::default();
        assert_eq!(config.currency_glyphs[0], "₹");
        assert_eq!(config.currency_glyphs[1], "â‚¹");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RecxConfig::default();
        config.extraction.pdf.fallback_full_text = false;
        config.save(&path).unwrap();

        let loaded = RecxConfig::from_file(&path).unwrap();
        assert!(!loaded.extraction.pdf.fallback_full_text);
        assert_eq!(loaded.input.schema_path, PathBuf::from("schema.xlsx"));
    }
}
