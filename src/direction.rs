use crate::error::ParseDirectionError;
use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Screen-facing movement direction. Vectors are in cartesian grid space, so
/// "N" (straight up on the isometric screen) is the cartesian diagonal (-1, -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    SE,
    SW,
    NW,
}

/// Unit offsets indexed by `Direction as usize`
const OFFSETS: [(i32, i32); 8] = [
    (-1, -1), // N
    (1, 1),   // S
    (1, -1),  // E
    (-1, 1),  // W
    (0, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // SW
    (-1, 0),  // NW
];

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::SE,
        Direction::SW,
        Direction::NW,
    ];

    /// Neighbour expansion order used by the pathfinder. Equally short paths
    /// are resolved by whichever is discovered first in this order.
    pub const SEARCH_ORDER: [Direction; 8] = [
        Direction::NE,
        Direction::SE,
        Direction::SW,
        Direction::NW,
        Direction::N,
        Direction::S,
        Direction::W,
        Direction::E,
    ];

    pub fn offset(self) -> (i32, i32) {
        OFFSETS[self as usize]
    }

    pub fn vector(self) -> Point {
        let (dx, dy) = self.offset();
        Point::new(dx as f32, dy as f32)
    }

    /// True when the step changes both grid coordinates
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::S => "S",
            Direction::E => "E",
            Direction::W => "W",
            Direction::NE => "NE",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
