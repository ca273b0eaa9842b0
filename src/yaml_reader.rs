//! YAML Reader
//!
//! Reads hand-written YAML maps into an [`AreaGraph`].

use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Reader, validate_graph};
use crate::model::AreaGraph;

/// Reader for YAML area maps
pub struct YamlReader;

impl YamlReader {
    /// Create a new YAML reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for YamlReader {
    fn read(&self, input: &Path) -> IoResult<AreaGraph> {
        let content = fs::read_to_string(input)?;
        let graph: AreaGraph =
            serde_yaml::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))?;
        validate_graph(graph)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
