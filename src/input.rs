//! Input interpretation kept free of any windowing library so it can be tested.

use crate::direction::Direction;
use crate::point::Point;

/// Pressed state of the four arrow keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ArrowKeys {
    /// A single arrow gives a screen-axis direction, two adjacent arrows the
    /// diagonal between them. Any other combination means stand still.
    pub fn direction(&self) -> Option<Direction> {
        match (self.up, self.right, self.down, self.left) {
            (true, false, false, false) => Some(Direction::N),
            (false, true, false, false) => Some(Direction::E),
            (false, false, true, false) => Some(Direction::S),
            (false, false, false, true) => Some(Direction::W),
            (true, true, false, false) => Some(Direction::NE),
            (false, true, true, false) => Some(Direction::SE),
            (false, false, true, true) => Some(Direction::SW),
            (true, false, false, true) => Some(Direction::NW),
            _ => None,
        }
    }
}

/// Tells a click from a drag that pans the view
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    pressed: Option<Press>,
    dragged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    pointer: Point,
    offset: Point,
}

impl DragTracker {
    pub fn press(&mut self, pointer: Point, current_offset: Point) {
        self.pressed = Some(Press { pointer, offset: current_offset });
        self.dragged = false;
    }

    /// New view offset while dragging, or None if nothing is pressed or the pointer is still
    pub fn moved(&mut self, pointer: Point) -> Option<Point> {
        let press = self.pressed?;
        if pointer == press.pointer && !self.dragged {
            return None;
        }
        self.dragged = true;
        Some(press.offset.add(pointer.sub(press.pointer)))
    }

    /// Release the pointer; yields the click position unless it was a drag
    pub fn release(&mut self, pointer: Point) -> Option<Point> {
        let press = self.pressed.take()?;
        let was_drag = std::mem::take(&mut self.dragged);
        if was_drag {
            None
        } else {
            log::trace!("click at {:?} (pressed at {:?})", pointer, press.pointer);
            Some(pointer)
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}

/// Tile size after one wheel notch. Zooming out stops once another step would
/// go below `min_tile_size`; None means no change.
pub fn zoom_step(tile_size: f32, zoom_in: bool, step: f32, min_tile_size: f32) -> Option<f32> {
    if zoom_in {
        Some(tile_size + step)
    } else if tile_size > step && tile_size - step >= min_tile_size {
        Some(tile_size - step)
    } else {
        None
    }
}
