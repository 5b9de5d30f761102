//! Value types describing where the crucible is and which way it travels.
//!
//! Coordinates follow the puzzle map: `(0, 0)` is the top-left block, `x`
//! grows to the east and `y` grows to the south.

use serde::{Deserialize, Serialize};

/// Compass heading of the crucible.
///
/// Only quarter turns exist; a heading never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Rotate by -90 degrees
    pub fn turn_left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Rotate by +90 degrees
    pub fn turn_right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    /// Arrow used when drawing a route over the map
    pub fn glyph(self) -> char {
        match self {
            Heading::North => '^',
            Heading::East => '>',
            Heading::South => 'v',
            Heading::West => '<',
        }
    }
}

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step along `heading`.
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The crucible itself: where it stands and which way it is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mover {
    pub position: Position,
    pub heading: Heading,
}

impl Mover {
    pub fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }

    /// Keep the heading and move one block forward.
    pub fn straight(self) -> Self {
        Self::new(self.position.step(self.heading), self.heading)
    }

    /// Turn left, then move one block in the new heading.
    pub fn left(self) -> Self {
        let heading = self.heading.turn_left();
        Self::new(self.position.step(heading), heading)
    }

    /// Turn right, then move one block in the new heading.
    pub fn right(self) -> Self {
        let heading = self.heading.turn_right();
        Self::new(self.position.step(heading), heading)
    }
}
