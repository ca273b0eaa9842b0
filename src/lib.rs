//! areamap - Force-directed 2D layout for maps of connected areas.
//!
//! An area map is a set of named areas, each holding rooms whose exits point at
//! other rooms. This crate derives one direction-tagged connection per pair of
//! adjacent areas and runs a force simulation that keeps areas apart, keeps
//! connected areas near a preferred distance, and pulls each connection toward
//! its compass direction. Readers and writers handle the file formats around it.

pub mod compass;
pub mod connections;
pub mod geometry;
pub mod io;
pub mod json_reader;
pub mod layout_writer;
pub mod model;
pub mod simulation;
pub mod svg_writer;
pub mod yaml_reader;

use connections::find_directional_connections;
use model::AreaGraph;
use simulation::{Layout, LayoutConfig, LayoutEngine};

/// Extract connections from `graph` and lay it out on a `width` x `height`
/// canvas using `config`
pub fn layout_map(graph: &AreaGraph, width: f64, height: f64, config: LayoutConfig) -> Layout {
    let connections = find_directional_connections(graph);
    LayoutEngine::with_config(graph, &connections, width, height, config).run()
}
