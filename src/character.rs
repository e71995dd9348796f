use crate::direction::Direction;
use crate::point::{Point, Tile};
use std::fmt;

/// Callback run once when a walk segment reaches its destination
pub type OnArrive = Box<dyn FnOnce(&mut Character)>;

pub const DEFAULT_MOVING_SPEED: f32 = 3.0;
pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 3.0;

/// The walking character. Position is a continuous pixel coordinate in
/// cartesian space; `tile` is only updated by the world when a move commits.
pub struct Character {
    tile: Tile,
    position: Point,
    direction: Direction,
    moving_speed: f32,
    current_speed: f32,
    destination: Option<Point>,
    on_arrive: Option<OnArrive>,
    /// Length of the current (or last) walk segment in pixels
    stride: f32,
    arrival_tolerance: f32,
}

impl Character {
    pub fn new(tile: Tile, position: Point, moving_speed: f32) -> Self {
        Character {
            tile,
            position,
            direction: Direction::S,
            moving_speed,
            current_speed: 0.0,
            destination: None,
            on_arrive: None,
            stride: 0.0,
            arrival_tolerance: DEFAULT_ARRIVAL_TOLERANCE,
        }
    }

    pub fn with_arrival_tolerance(mut self, tolerance: f32) -> Self {
        self.arrival_tolerance = tolerance;
        self
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn moving_speed(&self) -> f32 {
        self.moving_speed
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn stride(&self) -> f32 {
        self.stride
    }

    pub fn is_moving(&self) -> bool {
        self.current_speed != 0.0
    }

    /// Start moving in `direction` at full speed. Destination and callback are untouched.
    pub fn steer(&mut self, direction: Direction) {
        self.direction = direction;
        self.current_speed = self.moving_speed;
    }

    /// Walk `distance` pixels in `direction`, then run `on_arrive`.
    ///
    /// A callback left over from an unfinished walk is dropped without running.
    pub fn walk<F>(&mut self, direction: Direction, distance: f32, on_arrive: F)
    where
        F: FnOnce(&mut Character) + 'static,
    {
        self.destination = Some(self.position.add(direction.vector().mult(distance)));
        self.stride = distance;
        self.steer(direction);
        self.on_arrive = Some(Box::new(on_arrive));
    }

    /// Halt. If the character stands on its destination the pending callback
    /// is taken out and run exactly once.
    pub fn stop(&mut self) {
        self.current_speed = 0.0;
        if self.on_destination() {
            self.destination = None;
            if let Some(on_arrive) = self.on_arrive.take() {
                on_arrive(self);
            }
        }
    }

    /// Drop the destination and pending callback without running it
    pub fn cancel(&mut self) {
        self.destination = None;
        self.on_arrive = None;
    }

    pub fn on_destination(&self) -> bool {
        self.destination
            .map(|d| self.position.distance_to(d) < self.arrival_tolerance)
            .unwrap_or(false)
    }

    /// Where the next tick would put the character
    pub fn next_position(&self) -> Point {
        self.position
            .add(self.direction.vector().mult(self.current_speed))
    }

    /// Commit a move validated by the world
    pub(crate) fn advance_to(&mut self, position: Point, tile: Tile) {
        self.position = position;
        self.tile = tile;
    }

    /// Teleport, abandoning any walk in progress
    pub(crate) fn place(&mut self, tile: Tile, position: Point) {
        self.cancel();
        self.current_speed = 0.0;
        self.tile = tile;
        self.position = position;
    }

    /// Scale every pixel-space quantity by `ratio` (tile size change)
    pub(crate) fn rescale(&mut self, ratio: f32) {
        self.position = self.position.mult(ratio);
        self.destination = self.destination.map(|d| d.mult(ratio));
        self.stride *= ratio;
        self.moving_speed *= ratio;
        self.current_speed *= ratio;
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("tile", &self.tile)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("moving_speed", &self.moving_speed)
            .field("current_speed", &self.current_speed)
            .field("destination", &self.destination)
            .field("on_arrive", &self.on_arrive.is_some())
            .field("stride", &self.stride)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn character_at(x: f32, y: f32) -> Character {
        Character::new(Tile::new(0, 0), Point::new(x, y), DEFAULT_MOVING_SPEED)
    }

    #[test]
    fn test_steer_sets_speed_and_direction() {
        let mut c = character_at(30.0, 30.0);
        assert!(!c.is_moving());
        c.steer(Direction::E);
        assert!(c.is_moving());
        assert_eq!(c.direction(), Direction::E);
        assert_eq!(c.next_position(), Point::new(33.0, 27.0));
        assert_eq!(c.destination(), None);
    }

    #[test]
    fn test_walk_sets_destination() {
        let mut c = character_at(30.0, 30.0);
        c.walk(Direction::N, 60.0, |_| {});
        assert_eq!(c.destination(), Some(Point::new(-30.0, -30.0)));
        assert_eq!(c.stride(), 60.0);
        assert!(!c.on_destination());
    }

    #[test]
    fn test_stop_away_from_destination_keeps_callback() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut c = character_at(30.0, 30.0);
        c.walk(Direction::SE, 60.0, move |_| counter.set(counter.get() + 1));
        c.stop();
        assert_eq!(fired.get(), 0);
        assert!(!c.is_moving());
        assert!(c.destination().is_some());
    }

    #[test]
    fn test_stop_on_destination_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut c = character_at(30.0, 30.0);
        c.walk(Direction::SE, 2.0, move |_| counter.set(counter.get() + 1));
        assert!(c.on_destination());
        c.stop();
        c.stop();
        assert_eq!(fired.get(), 1);
        assert_eq!(c.destination(), None);
    }

    #[test]
    fn test_callback_can_start_next_walk() {
        let mut c = character_at(0.0, 0.0);
        c.walk(Direction::SE, 1.0, |c| c.walk(Direction::SW, 60.0, |_| {}));
        c.stop();
        assert!(c.is_moving());
        assert_eq!(c.direction(), Direction::SW);
        assert_eq!(c.destination(), Some(Point::new(0.0, 60.0)));
    }

    #[test]
    fn test_walk_overwrite_drops_previous_callback() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut c = character_at(0.0, 0.0);
        c.walk(Direction::SE, 1.0, move |_| counter.set(counter.get() + 1));
        c.walk(Direction::SE, 1.0, |_| {});
        c.stop();
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_cancel_never_fires() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let mut c = character_at(0.0, 0.0);
        c.walk(Direction::SE, 1.0, move |_| flag.set(true));
        c.cancel();
        c.stop();
        assert!(!fired.get());
        assert_eq!(c.destination(), None);
    }

    #[test]
    fn test_rescale() {
        let mut c = character_at(30.0, 90.0);
        c.walk(Direction::SE, 60.0, |_| {});
        c.rescale(0.5);
        assert_eq!(c.position(), Point::new(15.0, 45.0));
        assert_eq!(c.destination(), Some(Point::new(45.0, 45.0)));
        assert_eq!(c.stride(), 30.0);
        assert_eq!(c.moving_speed(), 1.5);
        assert_eq!(c.current_speed(), 1.5);
    }
}
