use std::path::PathBuf;
use thiserror::Error;

/// The main error type for layerscene operations.
///
/// Every variant is fatal to the run. Recoverable conditions (missing
/// `active`/`visible`, failed raster exports) are reported as warnings in
/// [`crate::export::ExportReport`] instead.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read SVG {path}: {source}")]
    SvgRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse SVG from {path}: {message}")]
    SvgParse { path: PathBuf, message: String },

    #[error("Missing '{attribute}' attribute on the <svg> root of {path}")]
    MissingDimension {
        path: PathBuf,
        attribute: &'static str,
    },

    #[error("Invalid '{attribute}' value '{value}' in {path}; expected an integer followed by a two-letter unit (e.g. '800px')")]
    InvalidDimension {
        path: PathBuf,
        attribute: &'static str,
        value: String,
    },

    #[error("Layer #{index} in {path} has no inkscape:label attribute")]
    MissingLayerLabel { path: PathBuf, index: usize },

    #[error("Item #{position} of layer '{layer}' has no id attribute")]
    MissingItemId { layer: String, position: usize },

    #[error("Item {id} has no defined {attribute} attribute, aborting")]
    MissingItemAttribute { id: String, attribute: &'static str },

    #[error("Failed to launch '{program}': {source}")]
    OracleLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Geometry query {axis} for item {id} failed ({status}): {stderr}")]
    OracleFailed {
        id: String,
        axis: &'static str,
        status: String,
        stderr: String,
    },

    #[error("Geometry query {axis} for item {id} returned '{output}'; expected a number")]
    OracleOutput {
        id: String,
        axis: &'static str,
        output: String,
    },

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("Failed to serialize report as YAML: {0}")]
    ReportYaml(#[source] serde_yaml::Error),
}
