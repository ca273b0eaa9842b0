//! Force-directed layout of areas
//!
//! Each step accumulates three kinds of force on every node: a short-range
//! repulsion that keeps areas from overlapping, a directional pull that steers
//! the target of each connection toward its compass direction, and a Hookean
//! spring that keeps connected areas near the preferred edge length. Velocity is
//! damped, positions are integrated, and nodes are clamped to the canvas.
//!
//! The simulation runs for a fixed number of steps. There is no convergence
//! check, and steps are strictly sequential.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::compass::direction_vector;
use crate::connections::Connection;
use crate::geometry::Vector2;
use crate::model::{Area, AreaGraph};

/// Extra gap kept between the rims of two areas before repulsion stops
pub const MIN_SEPARATION: f64 = 20.0;

/// Smallest distance used in force calculations (avoids singularities)
pub const DISTANCE_MIN: f64 = 1.0;

/// Share of the directional pull applied back onto the source of an edge
pub const SOURCE_RECOIL: f64 = -0.5;

/// Tunable constants of the force model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Repulsion strength between overlapping areas
    pub repulsion: f64,
    /// Spring constant shared by the directional and distance springs
    pub spring_constant: f64,
    /// Preferred edge length
    pub spring_length: f64,
    /// Velocity retained after each step (0-1)
    pub damping: f64,
    /// Multiplier on the directional pull
    pub direction_bias: f64,
    /// Steps run by [`LayoutEngine::run`]
    pub iterations: usize,
    /// Seed for initial placement; `None` draws from system entropy
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion: 5000.0,
            spring_constant: 0.01,
            spring_length: 200.0,
            damping: 0.95,
            direction_bias: 2.0,
            iterations: 100,
            seed: None,
        }
    }
}

impl LayoutConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_spring_length(mut self, spring_length: f64) -> Self {
        self.spring_length = spring_length;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// An area together with its simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    /// Area name
    pub name: String,
    /// Render radius, fixed at construction
    pub size: f64,
    pub room_count: usize,
    pub position: Vector2,
    pub velocity: Vector2,
    /// Force accumulated during the current step
    pub force: Vector2,
}

impl LayoutNode {
    /// Create a resting node for `area` at `position`
    pub fn new(area: &Area, position: Vector2) -> Self {
        Self {
            name: area.name.clone(),
            size: area.size(),
            room_count: area.room_count(),
            position,
            velocity: Vector2::ZERO,
            force: Vector2::ZERO,
        }
    }
}

/// A connection with endpoints resolved to node indices
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source: usize,
    pub target: usize,
    pub direction: String,
}

/// Final placement of one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedArea {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub room_count: usize,
}

impl PlacedArea {
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Settled layout, ready for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<PlacedArea>,
    /// Connections whose endpoints both resolved to nodes
    pub edges: Vec<Connection>,
}

impl Layout {
    pub fn node(&self, name: &str) -> Option<&PlacedArea> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Keep a coordinate within `[size, extent - size]`, or centre it when the
/// canvas is too small for the node
fn clamp_axis(value: f64, size: f64, extent: f64) -> f64 {
    if extent < 2.0 * size {
        extent / 2.0
    } else {
        value.clamp(size, extent - size)
    }
}

fn clamp_to_canvas(position: Vector2, size: f64, width: f64, height: f64) -> Vector2 {
    Vector2::new(
        clamp_axis(position.x, size, width),
        clamp_axis(position.y, size, height),
    )
}

/// Force-directed layout over one area graph
///
/// The engine exclusively owns every node's simulation state. Construct it,
/// then call [`LayoutEngine::simulate`] (or [`LayoutEngine::run`]) once.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    width: f64,
    height: f64,
    config: LayoutConfig,
    /// Node pairs pushed apart so far, summed over all steps
    repulsion_events: usize,
}

impl LayoutEngine {
    /// Create an engine with default constants and random placement
    pub fn new(graph: &AreaGraph, connections: &[Connection], width: f64, height: f64) -> Self {
        Self::with_config(graph, connections, width, height, LayoutConfig::default())
    }

    /// Create an engine with custom constants
    pub fn with_config(
        graph: &AreaGraph,
        connections: &[Connection],
        width: f64,
        height: f64,
        config: LayoutConfig,
    ) -> Self {
        Self::with_positions(graph, connections, width, height, config, &HashMap::new())
    }

    /// Create an engine with explicit starting positions.
    ///
    /// Areas missing from `positions` are placed randomly around the canvas
    /// centre, within an eighth of each dimension. Negative or non-finite
    /// dimensions collapse to zero.
    pub fn with_positions(
        graph: &AreaGraph,
        connections: &[Connection],
        width: f64,
        height: f64,
        config: LayoutConfig,
        positions: &HashMap<String, Vector2>,
    ) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let mut rng = config.rng();

        let center = Vector2::new(width / 2.0, height / 2.0);
        let (jitter_x, jitter_y) = (width / 8.0, height / 8.0);

        let nodes: Vec<LayoutNode> = graph
            .areas
            .iter()
            .map(|area| {
                let start = positions.get(&area.name).copied().unwrap_or_else(|| {
                    Vector2::new(
                        rng.gen_range(center.x - jitter_x..=center.x + jitter_x),
                        rng.gen_range(center.y - jitter_y..=center.y + jitter_y),
                    )
                });
                let start = clamp_to_canvas(start.validate(), area.size(), width, height);
                LayoutNode::new(area, start)
            })
            .collect();

        let mut name_to_index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            name_to_index.entry(node.name.as_str()).or_insert(i);
        }

        let edges: Vec<LayoutEdge> = connections
            .iter()
            .filter_map(|c| {
                let (Some(&source), Some(&target)) = (
                    name_to_index.get(c.source.as_str()),
                    name_to_index.get(c.target.as_str()),
                ) else {
                    tracing::debug!(
                        source = %c.source,
                        target = %c.target,
                        "dropping connection with unknown endpoint"
                    );
                    return None;
                };
                Some(LayoutEdge {
                    source,
                    target,
                    direction: c.direction.clone(),
                })
            })
            .collect();

        Self {
            nodes,
            edges,
            width,
            height,
            config,
            repulsion_events: 0,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Total number of node pairs that received a repulsion force so far
    pub fn repulsion_events(&self) -> usize {
        self.repulsion_events
    }

    /// Run one simulation step
    pub fn step(&mut self) {
        self.apply_forces();
    }

    /// Run `iterations` steps and return the settled layout
    pub fn simulate(mut self, iterations: usize) -> Layout {
        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            iterations,
            "starting layout simulation"
        );

        for iteration in 0..iterations {
            self.apply_forces();
            tracing::trace!(iteration, repulsions = self.repulsion_events, "step complete");
        }

        tracing::debug!(repulsions = self.repulsion_events, "layout settled");
        self.into_layout()
    }

    /// Run the configured number of steps
    pub fn run(self) -> Layout {
        let iterations = self.config.iterations;
        self.simulate(iterations)
    }

    fn into_layout(self) -> Layout {
        let edges = self
            .edges
            .iter()
            .map(|e| {
                Connection::new(
                    &self.nodes[e.source].name,
                    &self.nodes[e.target].name,
                    &e.direction,
                )
            })
            .collect();

        let nodes = self
            .nodes
            .into_iter()
            .map(|n| PlacedArea {
                name: n.name,
                x: n.position.x,
                y: n.position.y,
                size: n.size,
                room_count: n.room_count,
            })
            .collect();

        Layout {
            width: self.width,
            height: self.height,
            nodes,
            edges,
        }
    }

    /// One full force-compute and integrate pass
    fn apply_forces(&mut self) {
        for node in &mut self.nodes {
            node.force = Vector2::ZERO;
        }

        self.apply_repulsion();
        self.apply_edge_forces();
        self.integrate();
    }

    /// Push apart every pair of nodes closer than their combined radius plus
    /// [`MIN_SEPARATION`]
    fn apply_repulsion(&mut self) {
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.nodes[j].position - self.nodes[i].position;
                let distance = delta.magnitude().max(DISTANCE_MIN);
                let min_distance = self.nodes[i].size + self.nodes[j].size + MIN_SEPARATION;

                if distance >= min_distance {
                    continue;
                }

                // Coulomb-style: F = k / r^2
                let push = delta
                    .normalize()
                    .multiply(self.config.repulsion / (distance * distance));

                self.nodes[j].force = (self.nodes[j].force + push).validate();
                self.nodes[i].force = (self.nodes[i].force - push).validate();
                self.repulsion_events += 1;
            }
        }
    }

    /// Directional pull and distance spring for every edge
    fn apply_edge_forces(&mut self) {
        let config = &self.config;

        for edge in &self.edges {
            let (source, target) = (edge.source, edge.target);
            let source_pos = self.nodes[source].position;
            let target_pos = self.nodes[target].position;

            let delta = target_pos - source_pos;
            let distance = delta.magnitude().max(DISTANCE_MIN);

            // Steer the target toward the spot its direction says it belongs
            let ideal = source_pos + direction_vector(&edge.direction) * config.spring_length;
            let pull = (ideal - target_pos) * (config.spring_constant * config.direction_bias);

            self.nodes[target].force = (self.nodes[target].force + pull).validate();
            self.nodes[source].force =
                (self.nodes[source].force + pull * SOURCE_RECOIL).validate();

            // Hooke's law: F = k * (x - x0)
            let stretch = (distance - config.spring_length) * config.spring_constant * 0.5;
            let spring = delta.normalize() * stretch;

            self.nodes[source].force = (self.nodes[source].force + spring).validate();
            self.nodes[target].force = (self.nodes[target].force - spring).validate();
        }
    }

    /// Damp velocity, move, and clamp every node to the canvas
    fn integrate(&mut self) {
        let (width, height, damping) = (self.width, self.height, self.config.damping);

        for node in &mut self.nodes {
            node.velocity = ((node.velocity + node.force) * damping).validate();
            node.position = (node.position + node.velocity).validate();
            node.position = clamp_to_canvas(node.position, node.size, width, height);
        }
    }
}
