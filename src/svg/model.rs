//! Document, layer and item types read from an Inkscape SVG.

use serde::Serialize;

/// A parsed source document: canvas size plus its top-level layers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SvgDocument {
    /// Canvas width with the unit suffix stripped.
    pub width: i64,
    /// Canvas height with the unit suffix stripped.
    pub height: i64,
    /// Top-level `<g>` layers in document order.
    pub layers: Vec<Layer>,
}

/// A top-level named grouping of exportable items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// The `inkscape:label` of the group; used as the output file stem.
    pub label: String,
    /// Every direct child element, in document order.
    pub items: Vec<RawItem>,
}

impl Layer {
    /// Creates a layer with the given label and items.
    pub fn new(label: impl Into<String>, items: Vec<RawItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// One exportable object as declared in the source, before defaults apply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RawItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub active: Option<String>,
    pub visible: Option<String>,
}

impl RawItem {
    /// Creates an item with only an id set.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Sets the declared name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared active flag.
    pub fn active(mut self, active: impl Into<String>) -> Self {
        self.active = Some(active.into());
        self
    }

    /// Sets the declared visible flag.
    pub fn visible(mut self, visible: impl Into<String>) -> Self {
        self.visible = Some(visible.into());
        self
    }
}
