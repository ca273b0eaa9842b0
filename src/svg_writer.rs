//! SVG writer
//!
//! Draws a settled layout as a static SVG: one line per connection with its
//! direction at the midpoint, then one labelled circle per area on top.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Writer, ensure_parent_dir};
use crate::simulation::Layout;

/// Colors used in the exported map
pub mod colors {
    /// Canvas background
    pub const BACKGROUND: &str = "#FFFFFF";

    /// Area circles: Blue (#4A90D9)
    pub const AREA: &str = "#4A90D9";

    /// Area outline
    pub const AREA_STROKE: &str = "#2C5A8A";

    /// Connection lines
    pub const CONNECTION: &str = "#9AA5B1";

    /// Direction labels
    pub const DIRECTION_LABEL: &str = "#52606D";
}

/// Baseline offset that vertically centres a 12px label on its point
const LABEL_BASELINE_OFFSET: f64 = 4.0;

/// Escape text for use in XML content and attribute values
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writer that renders the layout as SVG
pub struct SvgWriter;

impl SvgWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render a layout to an SVG document
    pub fn render(&self, layout: &Layout) -> Result<String, fmt::Error> {
        let mut svg = String::new();

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = layout.width,
            h = layout.height,
        )?;
        writeln!(
            svg,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            layout.width,
            layout.height,
            colors::BACKGROUND
        )?;

        let segments: Vec<_> = layout
            .edges
            .iter()
            .filter_map(|edge| {
                let source = layout.node(&edge.source)?;
                let target = layout.node(&edge.target)?;
                Some((source, target, edge.direction.as_str()))
            })
            .collect();

        writeln!(
            svg,
            r#"  <g class="connections" stroke="{}" stroke-width="2">"#,
            colors::CONNECTION
        )?;
        for (source, target, _) in &segments {
            writeln!(
                svg,
                r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                source.x, source.y, target.x, target.y
            )?;
        }
        writeln!(svg, "  </g>")?;

        writeln!(
            svg,
            r#"  <g class="directions" font-family="sans-serif" font-size="10" fill="{}" text-anchor="middle">"#,
            colors::DIRECTION_LABEL
        )?;
        for (source, target, direction) in &segments {
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}">{}</text>"#,
                (source.x + target.x) / 2.0,
                (source.y + target.y) / 2.0,
                escape_xml(direction)
            )?;
        }
        writeln!(svg, "  </g>")?;

        writeln!(
            svg,
            r#"  <g class="areas" font-family="sans-serif" font-size="12" text-anchor="middle">"#
        )?;
        for node in &layout.nodes {
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}"/>"#,
                node.x,
                node.y,
                node.size,
                colors::AREA,
                colors::AREA_STROKE
            )?;
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}">{}</text>"#,
                node.x,
                node.y + LABEL_BASELINE_OFFSET,
                escape_xml(&node.name)
            )?;
        }
        writeln!(svg, "  </g>")?;
        writeln!(svg, "</svg>")?;

        Ok(svg)
    }
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for SvgWriter {
    fn write(&self, layout: &Layout, output: &Path) -> IoResult<()> {
        let svg = self
            .render(layout)
            .map_err(|e| IoError::Write(e.to_string()))?;
        ensure_parent_dir(output)?;
        fs::write(output, svg)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "svg"
    }
}
