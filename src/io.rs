//! Reader/Writer traits and format dispatch
//!
//! Readers turn a map file into an [`AreaGraph`]; writers export a settled
//! [`Layout`]. The registry picks one by file extension or format id.

use std::path::Path;

use thiserror::Error;

use crate::json_reader::JsonReader;
use crate::layout_writer::LayoutJsonWriter;
use crate::model::AreaGraph;
use crate::simulation::Layout;
use crate::svg_writer::SvgWriter;
use crate::yaml_reader::YamlReader;

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// The map parsed but is structurally unusable
    #[error("invalid map: {0}")]
    InvalidGraph(String),

    /// A rendering/writing error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses an input format into an [`AreaGraph`]
pub trait Reader {
    /// Parse the input file into an area graph
    fn read(&self, input: &Path) -> IoResult<AreaGraph>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer exports a settled layout to a specific format
pub trait Writer {
    /// Write the layout to the output path
    fn write(&self, layout: &Layout, output: &Path) -> IoResult<()>;

    /// Identifier for this output format (e.g., "svg", "json")
    fn format_id(&self) -> &str;
}

/// Reject maps the layout core cannot work with.
///
/// Area names identify layout nodes, so they must be unique.
pub fn validate_graph(graph: AreaGraph) -> IoResult<AreaGraph> {
    if let Some(name) = graph.duplicate_area_name() {
        return Err(IoError::InvalidGraph(format!("duplicate area name '{name}'")));
    }
    Ok(graph)
}

/// Create the directory an output file will be written into
pub(crate) fn ensure_parent_dir(output: &Path) -> IoResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default readers and writers registered
    ///
    /// Currently registers:
    /// - Readers: `JsonReader` (json), `YamlReader` (yaml, yml)
    /// - Writers: `SvgWriter` (svg), `LayoutJsonWriter` (json)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_writer(Box::new(SvgWriter::new()));
        registry.register_writer(Box::new(LayoutJsonWriter::new()));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer for the given path based on its extension
    pub fn writer_for_path(&self, path: &Path) -> IoResult<&dyn Writer> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.writer_for_format(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Area;
    use std::path::PathBuf;

    // Mock reader for testing
    struct MockReader {
        extensions: Vec<&'static str>,
    }

    impl Reader for MockReader {
        fn read(&self, _input: &Path) -> IoResult<AreaGraph> {
            Ok(AreaGraph::new(vec![Area::new("mock")]))
        }

        fn supported_extensions(&self) -> &[&str] {
            &self.extensions
        }
    }

    // Mock writer for testing
    struct MockWriter {
        format: &'static str,
    }

    impl Writer for MockWriter {
        fn write(&self, _layout: &Layout, _output: &Path) -> IoResult<()> {
            Ok(())
        }

        fn format_id(&self) -> &str {
            self.format
        }
    }

    #[test]
    fn reader_supports_extension_case_insensitive() {
        let reader = MockReader {
            extensions: vec!["yaml", "yml"],
        };
        assert!(reader.supports_extension("yaml"));
        assert!(reader.supports_extension("YML"));
        assert!(!reader.supports_extension("json"));
    }

    #[test]
    fn registry_finds_reader_by_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["map"],
        }));

        assert!(registry.reader_for_extension("map").is_some());
        assert!(registry.reader_for_extension("yaml").is_none());
    }

    #[test]
    fn registry_finds_writer_by_format() {
        let mut registry = FormatRegistry::new();
        registry.register_writer(Box::new(MockWriter { format: "png" }));

        assert!(registry.writer_for_format("png").is_some());
        assert!(registry.writer_for_format("PNG").is_some()); // case insensitive
        assert!(registry.writer_for_format("svg").is_none());
    }

    #[test]
    fn registry_reader_for_path_extracts_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["map"],
        }));

        let path = PathBuf::from("/some/path/world.map");
        let reader = registry.reader_for_path(&path).expect("reader for .map");
        assert_eq!(reader.read(&path).expect("mock read").areas[0].name, "mock");

        let unknown_path = PathBuf::from("/some/path/world.xyz");
        assert!(matches!(
            registry.reader_for_path(&unknown_path),
            Err(IoError::UnsupportedFormat(_))
        ));

        let no_extension = PathBuf::from("/some/path/world");
        assert!(matches!(
            registry.reader_for_path(&no_extension),
            Err(IoError::UnknownExtension(_))
        ));
    }

    #[test]
    fn extension_from_path_works() {
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("map.json")),
            Some("json")
        );
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("map.YAML")),
            Some("YAML")
        );
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("noextension")),
            None
        );
    }

    #[test]
    fn io_error_display() {
        let err = IoError::UnsupportedFormat("xyz".to_string());
        assert_eq!(err.to_string(), "unsupported format: xyz");

        let err = IoError::Parse("invalid syntax".to_string());
        assert_eq!(err.to_string(), "parse error: invalid syntax");

        let err = IoError::InvalidGraph("duplicate area name 'Town'".to_string());
        assert_eq!(err.to_string(), "invalid map: duplicate area name 'Town'");
    }

    #[test]
    fn mock_writer_succeeds() {
        let writer = MockWriter { format: "svg" };
        let layout = Layout {
            width: 10.0,
            height: 10.0,
            nodes: vec![],
            edges: vec![],
        };
        assert!(writer.write(&layout, Path::new("output")).is_ok());
    }

    #[test]
    fn validate_graph_rejects_duplicate_areas() {
        let graph = AreaGraph::new(vec![Area::new("Town"), Area::new("Town")]);
        assert!(matches!(
            validate_graph(graph),
            Err(IoError::InvalidGraph(msg)) if msg.contains("Town")
        ));

        let graph = AreaGraph::new(vec![Area::new("Town"), Area::new("Forest")]);
        assert!(validate_graph(graph).is_ok());
    }

    #[test]
    fn with_defaults_registers_readers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_some());
        assert!(registry.reader_for_extension("yml").is_some());
        assert!(registry.reader_for_extension("ttl").is_none());
    }

    #[test]
    fn with_defaults_registers_writers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.writer_for_format("svg").is_some());
        assert!(registry.writer_for_format("SVG").is_some()); // case insensitive
        assert!(registry.writer_for_format("json").is_some());
        assert!(registry.writer_for_format("html").is_none());
    }

    #[test]
    fn with_defaults_writer_for_path_uses_extension() {
        let registry = FormatRegistry::with_defaults();

        let writer = registry
            .writer_for_path(Path::new("out/map.svg"))
            .expect("svg writer");
        assert_eq!(writer.format_id(), "svg");

        assert!(matches!(
            registry.writer_for_path(Path::new("out/map.pdf")),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
