//! JSON Reader
//!
//! Reads area maps exported as JSON (`{"areas": [...]}`) into an [`AreaGraph`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::io::{IoError, IoResult, Reader, validate_graph};
use crate::model::AreaGraph;

/// Reader for JSON area maps
pub struct JsonReader;

impl JsonReader {
    /// Create a new JSON reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> IoResult<AreaGraph> {
        let reader = BufReader::new(File::open(input)?);
        let graph: AreaGraph =
            serde_json::from_reader(reader).map_err(|e| IoError::Parse(e.to_string()))?;
        tracing::debug!(
            path = %input.display(),
            areas = graph.areas.len(),
            rooms = graph.room_count(),
            "read map"
        );
        validate_graph(graph)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
