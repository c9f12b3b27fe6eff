#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use layerscene::oracle::{Axis, CommandOutcome, GeometryOracle};
use layerscene::SceneError;

pub const HUD_SVG: &str = include_str!("../fixtures/hud.svg");

/// Minimal PNG: signature plus an IHDR chunk header, enough for imagesize to read.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(33);
    bytes.extend_from_slice(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

/// How a [`ScriptedOracle`] reacts to export requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportBehavior {
    /// Write a PNG of the given size and exit 0.
    Write(u32, u32),
    /// Exit 1 without writing anything.
    Fail,
    /// Exit 0 without writing anything.
    Silent,
}

/// In-process oracle answering from a fixed table.
pub struct ScriptedOracle {
    answers: HashMap<(String, Axis), f64>,
    export: ExportBehavior,
    pub queries: RefCell<Vec<(String, Axis)>>,
    pub exports: RefCell<Vec<(String, PathBuf)>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            export: ExportBehavior::Write(16, 16),
            queries: RefCell::new(Vec::new()),
            exports: RefCell::new(Vec::new()),
        }
    }

    /// Answer all four axes for `id`.
    pub fn item(mut self, id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        for (axis, value) in [
            (Axis::X, x),
            (Axis::Y, y),
            (Axis::Width, width),
            (Axis::Height, height),
        ] {
            self.answers.insert((id.to_string(), axis), value);
        }
        self
    }

    pub fn export(mut self, behavior: ExportBehavior) -> Self {
        self.export = behavior;
        self
    }
}

impl GeometryOracle for ScriptedOracle {
    fn query(&self, id: &str, axis: Axis) -> Result<f64, SceneError> {
        self.queries.borrow_mut().push((id.to_string(), axis));
        self.answers
            .get(&(id.to_string(), axis))
            .copied()
            .ok_or_else(|| SceneError::OracleFailed {
                id: id.to_string(),
                axis: axis.as_str(),
                status: "exit code 1".to_string(),
                stderr: format!("Object with id=\"{id}\" not found"),
            })
    }

    fn export_png(&self, id: &str, output: &Path) -> Result<CommandOutcome, SceneError> {
        self.exports
            .borrow_mut()
            .push((id.to_string(), output.to_path_buf()));

        match self.export {
            ExportBehavior::Write(width, height) => {
                fs::write(output, png_bytes(width, height)).expect("write png");
                Ok(CommandOutcome {
                    code: Some(0),
                    success: true,
                    ..Default::default()
                })
            }
            ExportBehavior::Fail => Ok(CommandOutcome {
                code: Some(1),
                success: false,
                stderr: "export failed".to_string(),
                ..Default::default()
            }),
            ExportBehavior::Silent => Ok(CommandOutcome {
                code: Some(0),
                success: true,
                ..Default::default()
            }),
        }
    }
}

/// Build an Inkscape-flavoured SVG from `(label, items)` pairs, where each
/// item is the raw attribute text of a `<rect>`.
pub fn svg_with_layers(width: &str, height: &str, layers: &[(&str, Vec<String>)]) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" \
         xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\" \
         width=\"{width}\" height=\"{height}\">\n"
    );
    for (label, items) in layers {
        svg.push_str(&format!(
            "  <g inkscape:label=\"{label}\" inkscape:groupmode=\"layer\">\n"
        ));
        for attrs in items {
            svg.push_str(&format!("    <rect {attrs} />\n"));
        }
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");
    svg
}
