//! Run configuration.
//!
//! A [`RunConfig`] is built once from the command line and handed by
//! reference to every stage of the export.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::oracle::InkscapeCli;

/// Which scene descriptor format to write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `<layer>.xml`: `<scene>` with one `<item/>` per object. Always
    /// exports rasters; never queries width/height.
    Markup,
    /// `<layer>.json`: a `window.<layer> = { ... }` object literal.
    #[default]
    Structured,
}

impl OutputFormat {
    /// File extension of the per-layer output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markup => "xml",
            OutputFormat::Structured => "json",
        }
    }

    /// Whether the oracle is asked for width and height as well.
    pub fn queries_size(self) -> bool {
        matches!(self, OutputFormat::Structured)
    }
}

/// Format of the summary printed after a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Immutable settings for one export run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// The SVG document to read. Also handed to the oracle.
    pub source: PathBuf,
    pub format: OutputFormat,
    /// Abort on a missing `name` in the structured format too.
    pub names_required: bool,
    /// Export a PNG per item in the structured format.
    pub export_png: bool,
    /// Where layer files and rasters are written.
    pub output_dir: PathBuf,
    /// Inkscape executable.
    pub inkscape: PathBuf,
    pub inkscape_cli: InkscapeCli,
}

impl RunConfig {
    /// A configuration with defaults for everything but the source file.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            format: OutputFormat::default(),
            names_required: false,
            export_png: false,
            output_dir: PathBuf::from("."),
            inkscape: PathBuf::from("inkscape"),
            inkscape_cli: InkscapeCli::default(),
        }
    }

    /// Whether a raster is exported for every item.
    ///
    /// The markup format always exports; the structured one only on request.
    pub fn exports_rasters(&self) -> bool {
        match self.format {
            OutputFormat::Markup => true,
            OutputFormat::Structured => self.export_png,
        }
    }

    /// Whether a missing `name` is fatal.
    pub fn requires_names(&self) -> bool {
        match self.format {
            OutputFormat::Markup => true,
            OutputFormat::Structured => self.names_required,
        }
    }

    /// Path of the descriptor written for `layer`.
    pub fn layer_output_path(&self, layer: &str) -> PathBuf {
        self.output_dir
            .join(format!("{layer}.{}", self.format.extension()))
    }

    /// Path of the raster exported for item `name` of `layer`.
    pub fn raster_path(&self, layer: &str, name: &str) -> PathBuf {
        self.output_dir.join(format!("{layer}_{name}.png"))
    }
}
