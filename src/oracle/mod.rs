//! Geometry queries against the authoring tool.
//!
//! Positions and sizes are never computed locally: every measurement is a
//! separate question to a [`GeometryOracle`], answered as a float and
//! truncated toward zero.

mod inkscape;

pub use inkscape::{CommandOutcome, InkscapeCli, InkscapeOracle};

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::SceneError;

/// One measurement the oracle can answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Width,
    Height,
}

impl Axis {
    /// Short name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can measure items of the source document and render them.
pub trait GeometryOracle {
    /// Measure one axis of the item with the given id.
    fn query(&self, id: &str, axis: Axis) -> Result<f64, SceneError>;

    /// Render the item with the given id, alone, to a PNG at `output`.
    ///
    /// An `Ok` outcome may still describe a failed export; the caller
    /// decides what a non-zero exit means.
    fn export_png(&self, id: &str, output: &Path) -> Result<CommandOutcome, SceneError>;
}

/// Truncated position and, when requested, size of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Query an item's position, and its size if `with_size` is set.
///
/// Issues one oracle call per axis, in x, y, width, height order.
pub fn measure<O: GeometryOracle + ?Sized>(
    oracle: &O,
    id: &str,
    with_size: bool,
) -> Result<Geometry, SceneError> {
    let x = truncate(oracle.query(id, Axis::X)?);
    let y = truncate(oracle.query(id, Axis::Y)?);

    let (width, height) = if with_size {
        (
            Some(truncate(oracle.query(id, Axis::Width)?)),
            Some(truncate(oracle.query(id, Axis::Height)?)),
        )
    } else {
        (None, None)
    };

    Ok(Geometry {
        x,
        y,
        width,
        height,
    })
}

/// Drop the fractional part: `12.9` becomes `12`, `-3.5` becomes `-3`.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Parse the textual answer of a geometry query.
///
/// The last non-empty line is taken, so diagnostics printed before the
/// value are skipped. Non-finite values are rejected.
pub fn parse_query_output(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
