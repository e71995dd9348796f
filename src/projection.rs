//! Mapping between cartesian grid space and isometric screen space.
//!
//! The simulation runs entirely in cartesian coordinates; these functions are
//! only used at the boundary with drawing and pointer input.

use crate::point::Point;

pub fn to_isometric(p: Point) -> Point {
    Point::new(p.x - p.y, (p.x + p.y) / 2.0)
}

pub fn to_cartesian(p: Point) -> Point {
    Point::new((2.0 * p.y + p.x) / 2.0, (2.0 * p.y - p.x) / 2.0)
}

/// Screen placement of the isometric world (pannable by dragging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Point,
}

impl Viewport {
    pub fn new(offset: Point) -> Self {
        Viewport { offset }
    }

    /// Convert a screen pixel into a cartesian world pixel
    pub fn screen_to_world(&self, screen: Point) -> Point {
        to_cartesian(screen.sub(self.offset))
    }

    /// Convert a cartesian world pixel into a screen pixel
    pub fn world_to_screen(&self, world: Point) -> Point {
        to_isometric(world).add(self.offset)
    }

    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset.add(delta);
    }
}
