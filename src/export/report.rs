//! Export report types.
//!
//! Tracks what a run wrote and every recoverable condition it hit, the same
//! way the warnings are logged while the run progresses.

use serde::Serialize;
use std::fmt;

use crate::config::OutputFormat;

/// Summary of one export run.
#[derive(Clone, Debug, Serialize)]
pub struct ExportReport {
    /// Source document path.
    pub source: String,
    pub format: OutputFormat,
    /// Canvas size read from the source.
    pub width: i64,
    pub height: i64,
    /// One entry per layer file written, in document order.
    pub layers: Vec<LayerSummary>,
    /// Warnings and notes raised during the run.
    pub issues: Vec<ExportIssue>,
}

impl ExportReport {
    /// Create an empty report for a run over `source`.
    pub fn new(source: impl Into<String>, format: OutputFormat, width: i64, height: i64) -> Self {
        Self {
            source: source.into(),
            format,
            width,
            height,
            layers: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ExportIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Warning)
            .count()
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Info)
            .count()
    }

    /// Total items written across all layers.
    pub fn item_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.items).sum()
    }

    /// Total rasters exported across all layers.
    pub fn raster_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rasters.len()).sum()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Exported {} layer(s), {} item(s), {} raster(s) from {} ({}x{})",
            self.layers.len(),
            self.item_count(),
            self.raster_count(),
            self.source,
            self.width,
            self.height
        )?;

        for layer in &self.layers {
            writeln!(
                f,
                "  {} -> {} ({} items)",
                layer.label, layer.path, layer.items
            )?;
            for raster in &layer.rasters {
                match (raster.width, raster.height) {
                    (Some(w), Some(h)) => writeln!(f, "    {} ({}x{})", raster.path, w, h)?,
                    _ => writeln!(f, "    {}", raster.path)?,
                }
            }
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ExportSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ExportSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// One layer file written by the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LayerSummary {
    pub label: String,
    pub path: String,
    /// Number of item entries written.
    pub items: usize,
    pub rasters: Vec<RasterSummary>,
}

/// One PNG produced by the authoring tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RasterSummary {
    /// Id of the exported item.
    pub item: String,
    pub path: String,
    /// Pixel size read back from the file, when readable.
    pub width: Option<usize>,
    pub height: Option<usize>,
}

/// A single recoverable condition met during the run.
#[derive(Clone, Debug, Serialize)]
pub struct ExportIssue {
    pub severity: ExportSeverity,
    pub code: ExportIssueCode,
    pub message: String,
}

impl ExportIssue {
    /// Create a warning-level issue.
    pub fn warning(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue.
    pub fn info(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for export issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSeverity {
    /// Output was produced with a substituted or missing value.
    Warning,
    /// Informational only.
    Info,
}

/// Issue codes for export reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportIssueCode {
    MissingName,
    MissingActive,
    MissingVisible,
    ExportFailed,
    RasterMissing,
    RasterUnreadable,
    /// A raster path was produced by an earlier item of the same run.
    RasterOverwritten,
}
