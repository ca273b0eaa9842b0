//! Area, room and exit data as handed to the layout core
//!
//! Order matters: areas, rooms and each room's exits keep their input order.
//! Connection deduplication depends on that scan order.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Smallest render radius of an area
pub const MIN_AREA_SIZE: f64 = 30.0;

/// Additional radius an area can grow by as its room count rises
pub const AREA_SIZE_RANGE: f64 = 30.0;

/// Room count at which areas start growing past the minimum size
pub const AREA_SIZE_ROOM_THRESHOLD: f64 = 100.0;

/// An addressable location with directional exits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier, unique across the whole map
    pub id: String,

    /// Direction name -> target room id. `None` or an empty id means no exit.
    #[serde(default)]
    pub exits: IndexMap<String, Option<String>>,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exits: IndexMap::new(),
        }
    }

    /// Add an exit leading to `target`
    pub fn with_exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), Some(target.into()));
        self
    }

    /// Exits that actually lead somewhere, in the order they were written
    pub fn open_exits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exits.iter().filter_map(|(direction, target)| {
            target
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| (direction.as_str(), t))
        })
    }
}

/// A named cluster of rooms; one node in the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,

    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: Vec::new(),
        }
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Render radius derived from the room count
    pub fn size(&self) -> f64 {
        area_size(self.room_count())
    }
}

/// `30 + 30 * clamp(1 - 100 / rooms, 0, 1)`, always within `[30, 60]`.
///
/// An empty area is sized as if it had one room.
pub fn area_size(room_count: usize) -> f64 {
    let rooms = room_count.max(1) as f64;
    let growth = (1.0 - AREA_SIZE_ROOM_THRESHOLD / rooms).clamp(0.0, 1.0);
    MIN_AREA_SIZE + AREA_SIZE_RANGE * growth
}

/// The complete map: every area with its rooms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaGraph {
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl AreaGraph {
    pub fn new(areas: Vec<Area>) -> Self {
        Self { areas }
    }

    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    pub fn room_count(&self) -> usize {
        self.areas.iter().map(Area::room_count).sum()
    }

    /// First area name that appears more than once, if any
    pub fn duplicate_area_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.areas
            .iter()
            .map(|a| a.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}
