use crate::direction::Direction;
use serde::{Deserialize, Serialize};

/// Continuous 2D value: a pixel coordinate or a direction vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn mult(self, scalar: f32) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    /// Euclidean distance
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Distance from a tile edge, in tiles, below which a point counts as on the edge
pub const EDGE_EPSILON: f32 = 1e-4;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Tile { x, y }
    }

    /// Tile containing the given pixel. Negative pixels map to negative tiles.
    pub fn from_pixel(point: Point, tile_size: f32) -> Self {
        Tile::new(
            (point.x / tile_size).floor() as i32,
            (point.y / tile_size).floor() as i32,
        )
    }

    /// Tile a moving point is in, where a point lying on a tile edge belongs
    /// to the tile it is heading into. Off the edges this equals `from_pixel`.
    ///
    /// Points within `EDGE_EPSILON` tiles of an edge count as on it, so rounding
    /// left by a tile size change cannot clip a corner during a diagonal step.
    pub fn from_pixel_heading(point: Point, tile_size: f32, heading: Point) -> Self {
        fn axis(v: f32, tile_size: f32, velocity: f32) -> i32 {
            let mut t = v / tile_size;
            let edge = t.round();
            if (t - edge).abs() < EDGE_EPSILON {
                t = edge;
            }
            if velocity < 0.0 {
                t.ceil() as i32 - 1
            } else {
                t.floor() as i32
            }
        }
        Tile::new(
            axis(point.x, tile_size, heading.x),
            axis(point.y, tile_size, heading.y),
        )
    }

    /// Neighbouring tile one step in `direction`
    pub fn step(self, direction: Direction) -> Tile {
        let (dx, dy) = direction.offset();
        Tile::new(self.x + dx, self.y + dy)
    }

    /// Pixel at the centre of this tile
    pub fn center(self, tile_size: f32) -> Point {
        Point::new(self.x as f32, self.y as f32)
            .mult(tile_size)
            .add(Point::new(tile_size / 2.0, tile_size / 2.0))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
