//! Inter-area connection extraction
//!
//! Walks every room exit, keeps the ones that cross an area boundary, and
//! collapses each unordered pair of areas into a single direction-tagged edge.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::AreaGraph;

/// A direction-tagged edge between two distinct areas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Area the exit leaves from
    pub source: String,

    /// Area the exit leads into
    pub target: String,

    /// Exit direction as written in the map
    pub direction: String,
}

impl Connection {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            direction: direction.into(),
        }
    }

    /// Order-independent identity of the two endpoints
    fn pair_key(&self) -> (&str, &str) {
        if self.source <= self.target {
            (self.source.as_str(), self.target.as_str())
        } else {
            (self.target.as_str(), self.source.as_str())
        }
    }
}

/// Map every room id to the name of the area that owns it.
///
/// If a room id appears in several areas the first one wins.
fn room_owners(graph: &AreaGraph) -> HashMap<&str, &str> {
    let mut owners = HashMap::with_capacity(graph.room_count());
    for area in &graph.areas {
        for room in &area.rooms {
            owners.entry(room.id.as_str()).or_insert(area.name.as_str());
        }
    }
    owners
}

/// Every exit that leaves its area, in scan order (area, room, exit as written).
///
/// Dangling targets and exits that stay inside one area are skipped.
pub fn candidate_connections(graph: &AreaGraph) -> Vec<Connection> {
    let owners = room_owners(graph);
    let mut candidates = Vec::new();

    for area in &graph.areas {
        for room in &area.rooms {
            for (direction, target_room) in room.open_exits() {
                let Some(target_area) = owners.get(target_room) else {
                    tracing::debug!(
                        room = %room.id,
                        direction,
                        target = target_room,
                        "skipping exit to unknown room"
                    );
                    continue;
                };

                if *target_area == area.name {
                    continue;
                }

                candidates.push(Connection::new(&area.name, *target_area, direction));
            }
        }
    }

    candidates
}

/// Keep only the first connection seen for each unordered pair of areas.
///
/// Of a mutually reverse pair the earlier one survives with its own direction;
/// the other direction is discarded.
pub fn dedupe_connections(candidates: Vec<Connection>) -> Vec<Connection> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let (a, b) = c.pair_key();
            seen.insert((a.to_string(), b.to_string()))
        })
        .collect()
}

/// Extract the deduplicated inter-area connections of a map
pub fn find_directional_connections(graph: &AreaGraph) -> Vec<Connection> {
    let candidates = candidate_connections(graph);
    let total = candidates.len();
    let connections = dedupe_connections(candidates);

    tracing::debug!(
        candidates = total,
        connections = connections.len(),
        "extracted area connections"
    );

    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Room};

    fn town_and_forest() -> AreaGraph {
        AreaGraph::new(vec![
            Area::new("Town")
                .with_room(Room::new("t1").with_exit("east", "f1"))
                .with_room(Room::new("t2").with_exit("north", "t1"))
                .with_room(Room::new("t3")),
            Area::new("Forest")
                .with_room(Room::new("f1"))
                .with_room(Room::new("f2")),
        ])
    }

    #[test]
    fn single_exit_yields_single_connection() {
        let connections = find_directional_connections(&town_and_forest());
        assert_eq!(connections, vec![Connection::new("Town", "Forest", "east")]);
    }

    #[test]
    fn symmetric_exits_collapse_to_first_seen() {
        let graph = AreaGraph::new(vec![
            Area::new("A").with_room(Room::new("a1").with_exit("east", "b1")),
            Area::new("B").with_room(Room::new("b1").with_exit("west", "a1")),
        ]);

        let connections = find_directional_connections(&graph);
        assert_eq!(connections, vec![Connection::new("A", "B", "east")]);
    }

    #[test]
    fn scan_order_decides_surviving_direction() {
        let graph = AreaGraph::new(vec![
            Area::new("B").with_room(Room::new("b1").with_exit("west", "a1")),
            Area::new("A").with_room(Room::new("a1").with_exit("east", "b1")),
        ]);

        let connections = find_directional_connections(&graph);
        assert_eq!(connections, vec![Connection::new("B", "A", "west")]);
    }

    #[test]
    fn intra_area_and_self_exits_are_ignored() {
        let graph = AreaGraph::new(vec![
            Area::new("Keep")
                .with_room(Room::new("k1").with_exit("north", "k2"))
                .with_room(Room::new("k2").with_exit("south", "k1"))
                .with_room(Room::new("k3").with_exit("up", "k3")),
        ]);

        assert!(find_directional_connections(&graph).is_empty());
    }

    #[test]
    fn dangling_exits_are_skipped() {
        let graph = AreaGraph::new(vec![
            Area::new("A")
                .with_room(Room::new("a1").with_exit("east", "nowhere"))
                .with_room(Room::new("a2").with_exit("south", "b1")),
            Area::new("B").with_room(Room::new("b1")),
        ]);

        let connections = find_directional_connections(&graph);
        assert_eq!(connections, vec![Connection::new("A", "B", "south")]);
    }

    #[test]
    fn parallel_exits_between_same_areas_collapse() {
        let graph = AreaGraph::new(vec![
            Area::new("A")
                .with_room(Room::new("a1").with_exit("east", "b1"))
                .with_room(Room::new("a2").with_exit("up", "b2")),
            Area::new("B")
                .with_room(Room::new("b1"))
                .with_room(Room::new("b2").with_exit("down", "a2")),
        ]);

        let candidates = candidate_connections(&graph);
        assert_eq!(candidates.len(), 3);

        let connections = find_directional_connections(&graph);
        assert_eq!(connections, vec![Connection::new("A", "B", "east")]);
    }

    #[test]
    fn exits_within_a_room_scan_in_input_order() {
        let graph = AreaGraph::new(vec![
            Area::new("Hub").with_room(
                Room::new("h1")
                    .with_exit("west", "w1")
                    .with_exit("east", "e1"),
            ),
            Area::new("East").with_room(Room::new("e1")),
            Area::new("West").with_room(Room::new("w1")),
        ]);

        let connections = find_directional_connections(&graph);
        assert_eq!(
            connections,
            vec![
                Connection::new("Hub", "West", "west"),
                Connection::new("Hub", "East", "east"),
            ]
        );
    }

    #[test]
    fn first_written_exit_wins_for_parallel_exits() {
        let json = r#"{
            "areas": [
                { "name": "Hub", "rooms": [ { "id": "h1", "exits": { "west": "b1", "east": "b2" } } ] },
                { "name": "B", "rooms": [ { "id": "b1" }, { "id": "b2" } ] }
            ]
        }"#;
        let graph: AreaGraph = serde_json::from_str(json).expect("valid graph");

        let connections = find_directional_connections(&graph);
        assert_eq!(connections, vec![Connection::new("Hub", "B", "west")]);
    }

    #[test]
    fn empty_graph_has_no_connections() {
        assert!(find_directional_connections(&AreaGraph::default()).is_empty());
    }
}
