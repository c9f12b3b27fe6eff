//! The extraction pass.
//!
//! Walks every layer of a parsed document in order, resolves and measures
//! each item, writes one descriptor file per layer, and optionally asks the
//! oracle to render each item to PNG. The first fatal error stops the run;
//! files already written stay on disk as they are.

mod report;
mod writer;

pub use report::{
    ExportIssue, ExportIssueCode, ExportReport, ExportSeverity, LayerSummary, RasterSummary,
};
pub use writer::LayerWriter;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::SceneError;
use crate::oracle::{measure, GeometryOracle, InkscapeOracle};
use crate::resolve::{resolve_item, ResolvedItem};
use crate::svg::{parse_svg_file, Layer, SvgDocument};

/// Parse `config.source` and export it, querying the configured Inkscape.
pub fn export_file(config: &RunConfig) -> Result<ExportReport, SceneError> {
    let document = parse_svg_file(&config.source)?;
    let oracle = InkscapeOracle::new(&config.inkscape, &config.source, config.inkscape_cli);
    export_document(&document, config, &oracle)
}

/// Export every layer of `document`.
pub fn export_document<O: GeometryOracle + ?Sized>(
    document: &SvgDocument,
    config: &RunConfig,
    oracle: &O,
) -> Result<ExportReport, SceneError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| SceneError::OutputWrite {
        path: config.output_dir.clone(),
        source,
    })?;

    let mut report = ExportReport::new(
        config.source.display().to_string(),
        config.format,
        document.width,
        document.height,
    );

    let mut exported = HashSet::new();
    for layer in &document.layers {
        let summary = export_layer(document, layer, config, oracle, &mut exported, &mut report)?;
        report.layers.push(summary);
    }

    Ok(report)
}

fn export_layer<O: GeometryOracle + ?Sized>(
    document: &SvgDocument,
    layer: &Layer,
    config: &RunConfig,
    oracle: &O,
    exported: &mut HashSet<PathBuf>,
    report: &mut ExportReport,
) -> Result<LayerSummary, SceneError> {
    let path = config.layer_output_path(&layer.label);
    let write_err = |source: std::io::Error| SceneError::OutputWrite {
        path: path.clone(),
        source,
    };

    info!(layer = %layer.label, path = %path.display(), items = layer.items.len(), "writing layer");

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = LayerWriter::begin(
        BufWriter::new(file),
        config.format,
        &layer.label,
        document.width,
        document.height,
        layer.items.len(),
    )
    .map_err(write_err)?;

    let mut rasters = Vec::new();

    for (index, raw) in layer.items.iter().enumerate() {
        info!(
            layer = %layer.label,
            id = raw.id.as_deref().unwrap_or("<none>"),
            "loading item"
        );

        let resolution = resolve_item(raw, &layer.label, index + 1, config.requires_names())?;
        for issue in resolution.issues {
            record(report, issue);
        }
        let item = resolution.item;

        let geometry = measure(oracle, &item.id, config.format.queries_size())?;
        info!(
            id = %item.id,
            name = %item.name,
            x = geometry.x,
            y = geometry.y,
            width = ?geometry.width,
            height = ?geometry.height,
            "loaded item"
        );

        writer.item(&item, &geometry).map_err(write_err)?;

        if config.exports_rasters() {
            if let Some(raster) = export_raster(oracle, config, &layer.label, &item, exported, report) {
                rasters.push(raster);
            }
        }
    }

    let items = writer.written();
    writer.finish().map_err(write_err)?;

    Ok(LayerSummary {
        label: layer.label.clone(),
        path: path.display().to_string(),
        items,
        rasters,
    })
}

/// Render one item to `<layer>_<name>.png`.
///
/// Failures are recorded as warnings and never abort the run. `exported`
/// holds every raster path handed to the oracle so far; reusing one is
/// reported because the earlier file gets replaced.
fn export_raster<O: GeometryOracle + ?Sized>(
    oracle: &O,
    config: &RunConfig,
    layer: &str,
    item: &ResolvedItem,
    exported: &mut HashSet<PathBuf>,
    report: &mut ExportReport,
) -> Option<RasterSummary> {
    let path = config.raster_path(layer, &item.name);
    info!(id = %item.id, path = %path.display(), "exporting item");

    if !exported.insert(path.clone()) {
        record(
            report,
            ExportIssue::warning(
                ExportIssueCode::RasterOverwritten,
                format!(
                    "item {} overwrites {} written earlier in this run",
                    item.id,
                    path.display()
                ),
            ),
        );
    }

    let failure = match oracle.export_png(&item.id, &path) {
        Ok(outcome) if outcome.success => None,
        Ok(outcome) => Some(format!("{}: {}", outcome.status_text(), outcome.stderr)),
        Err(err) => Some(err.to_string()),
    };
    if let Some(reason) = failure {
        record(
            report,
            ExportIssue::warning(
                ExportIssueCode::ExportFailed,
                format!("export of item {} to {} failed ({reason})", item.id, path.display()),
            ),
        );
        return None;
    }

    if !path.is_file() {
        record(
            report,
            ExportIssue::warning(
                ExportIssueCode::RasterMissing,
                format!(
                    "export of item {} reported success but {} was not created",
                    item.id,
                    path.display()
                ),
            ),
        );
        return None;
    }

    let (width, height) = match imagesize::size(&path) {
        Ok(size) => (Some(size.width), Some(size.height)),
        Err(err) => {
            record(
                report,
                ExportIssue::info(
                    ExportIssueCode::RasterUnreadable,
                    format!("could not read size of {}: {err}", path.display()),
                ),
            );
            (None, None)
        }
    };

    Some(RasterSummary {
        item: item.id.clone(),
        path: path.display().to_string(),
        width,
        height,
    })
}

fn record(report: &mut ExportReport, issue: ExportIssue) {
    match issue.severity {
        ExportSeverity::Warning => warn!("{}", issue.message),
        ExportSeverity::Info => info!("{}", issue.message),
    }
    report.add(issue);
}
