//! Per-layer scene descriptor writers.
//!
//! Output is streamed: the header goes out on [`LayerWriter::begin`], one
//! line per item on [`LayerWriter::item`], and the closing text only on
//! [`LayerWriter::finish`]. A writer dropped before `finish` leaves an
//! unterminated file behind.

use std::io::{self, Write};

use crate::config::OutputFormat;
use crate::oracle::Geometry;
use crate::resolve::ResolvedItem;

/// Streams one layer's descriptor to `out`.
pub struct LayerWriter<W: Write> {
    out: W,
    format: OutputFormat,
    /// Number of direct children in the layer.
    total: usize,
    /// Items written so far.
    written: usize,
}

impl<W: Write> LayerWriter<W> {
    /// Write the header for layer `label` of a `width`x`height` canvas.
    ///
    /// `total` is the layer's direct child count; the structured format
    /// uses it to leave the separator off the last entry.
    pub fn begin(
        mut out: W,
        format: OutputFormat,
        label: &str,
        width: i64,
        height: i64,
        total: usize,
    ) -> io::Result<Self> {
        match format {
            OutputFormat::Markup => writeln!(
                out,
                "<scene width=\"{}\" height=\"{}\" name=\"{}\">",
                width,
                height,
                xml_escape(label)
            )?,
            OutputFormat::Structured => writeln!(
                out,
                "window.{} = {{ \"width\": \"{}\", \"height\": \"{}\", \"name\": {}, \"item\": [ ",
                label,
                width,
                height,
                js_string(label)?
            )?,
        }

        Ok(Self {
            out,
            format,
            total,
            written: 0,
        })
    }

    /// Write one item entry.
    pub fn item(&mut self, item: &ResolvedItem, geometry: &Geometry) -> io::Result<()> {
        self.written += 1;

        match self.format {
            OutputFormat::Markup => writeln!(
                self.out,
                "<item name=\"{}\" x=\"{}\" y=\"{}\" visible=\"{}\" active=\"{}\" />",
                xml_escape(&item.name),
                geometry.x,
                geometry.y,
                xml_escape(&item.visible),
                xml_escape(&item.active)
            ),
            OutputFormat::Structured => {
                write!(
                    self.out,
                    "{{ \"name\": {}, \"x\": \"{}\", \"y\": \"{}\", \"width\": \"{}\", \"height\": \"{}\", \"visible\": {}, \"active\": {} }}",
                    js_string(&item.name)?,
                    geometry.x,
                    geometry.y,
                    optional_number(geometry.width),
                    optional_number(geometry.height),
                    js_string(&item.visible)?,
                    js_string(&item.active)?
                )?;
                if self.written != self.total {
                    write!(self.out, ",")?;
                }
                writeln!(self.out)
            }
        }
    }

    /// Number of items written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write the closing text, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        match self.format {
            OutputFormat::Markup => write!(self.out, "</scene>")?,
            OutputFormat::Structured => write!(self.out, "] }}")?,
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

fn js_string(raw: &str) -> io::Result<String> {
    serde_json::to_string(raw).map_err(io::Error::from)
}

fn optional_number(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
