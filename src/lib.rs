//! Layerscene: scene descriptors from Inkscape layers.
//!
//! Layerscene reads an Inkscape SVG whose top-level groups are layers, asks
//! Inkscape for the position (and size) of every first-level object in each
//! layer, and writes one descriptor file per layer that a game or UI engine
//! can load. Objects can optionally be exported as individual PNGs.
//!
//! # Modules
//!
//! - [`svg`]: Document loading and the layer/item walk
//! - [`resolve`]: Per-attribute default and requirement policies
//! - [`oracle`]: Geometry queries and raster export through Inkscape
//! - [`export`]: The extraction pass, descriptor writers and run report
//! - [`config`]: Immutable run configuration
//! - [`error`]: Error types for layerscene operations

pub mod config;
pub mod error;
pub mod export;
pub mod oracle;
pub mod resolve;
pub mod svg;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

pub use config::{OutputFormat, ReportFormat, RunConfig};
pub use error::SceneError;
pub use export::{export_document, export_file, ExportReport};

use oracle::InkscapeCli;

/// The layerscene CLI application.
#[derive(Parser)]
#[command(name = "layerscene")]
#[command(version, about)]
struct Cli {
    /// Inkscape SVG document to read.
    source: PathBuf,

    /// Write `<layer>.xml` scene files (always exports item PNGs).
    #[arg(long, conflicts_with = "to_json")]
    to_html: bool,

    /// Write `<layer>.json` object-literal files (the default).
    #[arg(long)]
    to_json: bool,

    /// Abort when an item has no `name` attribute instead of using "".
    #[arg(long)]
    required_names: bool,

    /// Export every item as `<layer>_<name>.png` (JSON output only).
    #[arg(long)]
    export_png: bool,

    /// Directory that receives the layer files and PNGs.
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Inkscape executable to query.
    #[arg(long, default_value = "inkscape")]
    inkscape: PathBuf,

    /// Command-line dialect of the Inkscape executable.
    #[arg(long, value_enum, default_value_t = InkscapeCli::Legacy)]
    inkscape_cli: InkscapeCli,

    /// Format of the summary printed when the run completes.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// Only log warnings and errors.
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            source: self.source.clone(),
            format: if self.to_html {
                OutputFormat::Markup
            } else {
                OutputFormat::Structured
            },
            names_required: self.required_names,
            export_png: self.export_png,
            output_dir: self.output_dir.clone(),
            inkscape: self.inkscape.clone(),
            inkscape_cli: self.inkscape_cli,
        }
    }
}

/// Run the layerscene CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SceneError> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = cli.run_config();
    let report = export_file(&config)?;

    match cli.report {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(SceneError::ReportJson)?;
            println!("{}", json);
        }
        ReportFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report).map_err(SceneError::ReportYaml)?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. Ignored if one is already set.
///
/// Colours are only used when stderr is a terminal.
fn init_logging(quiet: bool) {
    let level = if quiet { Level::WARN } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}
