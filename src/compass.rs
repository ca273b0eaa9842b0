//! Compass directions and their on-screen bias vectors
//!
//! Exit names are free-form strings in the input. Known directions map to a
//! fixed vector that steers the layout; anything else maps to the zero vector
//! and contributes no directional bias.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Vector2;

/// A recognized exit direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

/// Returned when parsing a direction name that is not one of the six known ones
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0}")]
pub struct UnknownDirection(pub String);

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Lowercase name as it appears in map files
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Screen-space bias for this direction.
    ///
    /// Up and down are drawn as the north-east and south-west diagonals.
    pub fn vector(&self) -> Vector2 {
        match self {
            Direction::East => Vector2::new(1.0, 0.0),
            Direction::West => Vector2::new(-1.0, 0.0),
            Direction::North => Vector2::new(0.0, -1.0),
            Direction::South => Vector2::new(0.0, 1.0),
            Direction::Up => Vector2::new(1.0, -1.0).normalize(),
            Direction::Down => Vector2::new(-1.0, 1.0).normalize(),
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an exit name to its bias vector, case-insensitively.
///
/// Never fails: unrecognized names resolve to [`Vector2::ZERO`].
pub fn direction_vector(direction: &str) -> Vector2 {
    direction
        .parse::<Direction>()
        .map(|d| d.vector())
        .unwrap_or(Vector2::ZERO)
}
