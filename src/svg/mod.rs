//! Inkscape SVG loader.
//!
//! Reads the canvas size from the `<svg>` root and walks the first level of
//! the tree: each direct `<g>` child is a layer named by its
//! `inkscape:label`, and each direct child element of a layer is an item.
//! Deeper nesting is not descended into.

mod model;

pub use model::{Layer, RawItem, SvgDocument};

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use crate::error::SceneError;

/// Namespace of plain SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Namespace of Inkscape's editor attributes (`inkscape:label`, ...).
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Length of the unit suffix stripped from `width`/`height` (`px`, `mm`, ...).
const UNIT_SUFFIX_LEN: usize = 2;

/// Read and parse an SVG file.
pub fn parse_svg_file(path: &Path) -> Result<SvgDocument, SceneError> {
    let svg = fs::read_to_string(path).map_err(|source| SceneError::SvgRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_svg_str(&svg, path)
}

/// Parse an SVG document held in memory.
///
/// `path` is only used to give errors some context.
pub fn parse_svg_str(svg: &str, path: &Path) -> Result<SvgDocument, SceneError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(svg, options).map_err(|source| {
        SceneError::SvgParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    })?;

    let root = document.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SceneError::SvgParse {
            path: path.to_path_buf(),
            message: format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            ),
        });
    }

    let width = required_dimension(root, "width", path)?;
    let height = required_dimension(root, "height", path)?;

    let mut layers = Vec::new();
    for (index, group) in root.children().filter(is_layer_group).enumerate() {
        let label = group
            .attribute((INKSCAPE_NS, "label"))
            .ok_or_else(|| SceneError::MissingLayerLabel {
                path: path.to_path_buf(),
                index: index + 1,
            })?;

        let items = group
            .children()
            .filter(Node::is_element)
            .map(read_item)
            .collect();

        layers.push(Layer::new(label, items));
    }

    Ok(SvgDocument {
        width,
        height,
        layers,
    })
}

/// Parse SVG from bytes.
///
/// The input must be valid UTF-8. Primarily useful for fuzzing.
pub fn from_svg_slice(bytes: &[u8]) -> Result<SvgDocument, SceneError> {
    let svg = std::str::from_utf8(bytes).map_err(|source| SceneError::SvgParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_svg_str(svg, Path::new("<memory>"))
}

/// Strip the two-letter unit suffix from a length and parse the rest.
///
/// `"800px"` gives `Some(800)`. Values without a two-letter suffix, or
/// whose numeric part is not an integer, give `None`.
pub fn parse_dimension(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    if bytes.len() <= UNIT_SUFFIX_LEN {
        return None;
    }

    let split = bytes.len() - UNIT_SUFFIX_LEN;
    if !bytes[split..].iter().all(u8::is_ascii_alphabetic) {
        return None;
    }

    raw[..split].parse::<i64>().ok()
}

fn required_dimension(
    root: Node<'_, '_>,
    attribute: &'static str,
    path: &Path,
) -> Result<i64, SceneError> {
    let raw = root
        .attribute(attribute)
        .ok_or_else(|| SceneError::MissingDimension {
            path: path.to_path_buf(),
            attribute,
        })?;

    parse_dimension(raw).ok_or_else(|| SceneError::InvalidDimension {
        path: path.to_path_buf(),
        attribute,
        value: raw.to_string(),
    })
}

fn is_layer_group(node: &Node<'_, '_>) -> bool {
    node.is_element()
        && node.tag_name().name() == "g"
        && node.tag_name().namespace() == Some(SVG_NS)
}

fn read_item(node: Node<'_, '_>) -> RawItem {
    RawItem {
        id: node.attribute("id").map(ToOwned::to_owned),
        name: node.attribute("name").map(ToOwned::to_owned),
        active: node.attribute("active").map(ToOwned::to_owned),
        visible: node.attribute("visible").map(ToOwned::to_owned),
    }
}
