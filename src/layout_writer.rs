//! Layout JSON writer
//!
//! Exports the settled layout (area positions, sizes and connections) as
//! pretty-printed JSON for renderers that draw the map themselves.

use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Writer, ensure_parent_dir};
use crate::simulation::Layout;

/// Writer that outputs the layout as JSON
pub struct LayoutJsonWriter;

impl LayoutJsonWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a layout to a JSON string
    pub fn to_json(&self, layout: &Layout) -> IoResult<String> {
        serde_json::to_string_pretty(layout).map_err(|e| IoError::Write(e.to_string()))
    }
}

impl Default for LayoutJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for LayoutJsonWriter {
    fn write(&self, layout: &Layout, output: &Path) -> IoResult<()> {
        ensure_parent_dir(output)?;
        fs::write(output, self.to_json(layout)?)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "json"
    }
}
