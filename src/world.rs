use crate::character::Character;
use crate::config::Config;
use crate::direction::Direction;
use crate::error::WorldError;
use crate::grid::Grid;
use crate::pathfinding::{find_path_with, format_path, Path, PathfinderOptions};
use crate::point::{Point, Tile};
use rand::Rng;
use std::collections::VecDeque;

/// Owns the map and the character and advances the simulation one tick at a time.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    character: Character,
    tile_size: f32,
    pathfinder: PathfinderOptions,
}

impl World {
    /// Generate a map from `config` and place the character on a random free tile.
    pub fn generate<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Self, WorldError> {
        let grid = Grid::generate(
            config.world.width,
            config.world.height,
            config.world.tree_probability,
            rng,
        )?;
        Self::with_grid(grid, config, rng)
    }

    /// Use an existing map and place the character on a random free tile.
    pub fn with_grid<R: Rng + ?Sized>(
        grid: Grid,
        config: &Config,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        let start = grid.random_free_tile(rng)?;
        Self::with_character_at(grid, start, config)
    }

    /// Use an existing map with the character on a chosen tile.
    pub fn with_character_at(grid: Grid, start: Tile, config: &Config) -> Result<Self, WorldError> {
        let tile_size = config.view.tile_size;
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(WorldError::InvalidTileSize(tile_size));
        }
        if !grid.is_walkable(start) {
            return Err(WorldError::BlockedTile { x: start.x, y: start.y });
        }
        let character = Character::new(
            start,
            start.center(tile_size),
            config.character.moving_speed,
        )
        .with_arrival_tolerance(config.character.arrival_tolerance);

        log::info!(
            "world {}x{} with {} obstacles, character at {}",
            grid.width(),
            grid.height(),
            grid.obstacle_count(),
            start
        );

        Ok(World {
            grid,
            character,
            tile_size,
            pathfinder: PathfinderOptions {
                strict_corners: config.pathfinding.strict_corners,
            },
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn tile_exists(&self, tile: Tile) -> bool {
        self.grid.tile_exists(tile)
    }

    pub fn is_obstacle(&self, tile: Tile) -> bool {
        self.grid.is_obstacle(tile)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Direct access for adapters driving custom walks
    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pixel_to_tile(&self, point: Point) -> Tile {
        Tile::from_pixel(point, self.tile_size)
    }

    /// A free tile other than the one the character stands on
    pub fn is_click_target(&self, tile: Tile) -> bool {
        self.grid.is_walkable(tile) && tile != self.character.tile()
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self) {
        if !self.character.is_moving() {
            return;
        }
        if self.character.on_destination() {
            self.settle_on_destination();
            self.character.stop();
            return;
        }
        let next = self.character.next_position();
        // Edge points count toward the tile being entered, so a diagonal
        // through a tile corner never touches the shoulder cells
        let tile = Tile::from_pixel_heading(
            next,
            self.tile_size,
            self.character.direction().vector(),
        );
        if self.grid.is_walkable(tile) {
            self.character.advance_to(next, tile);
        } else {
            self.character.stop();
        }
    }

    /// Close the sub-step gap left when the speed does not divide the stride,
    /// so the next segment of a route starts exactly where this one ends.
    fn settle_on_destination(&mut self) {
        let Some(destination) = self.character.destination() else {
            return;
        };
        let tile = Tile::from_pixel_heading(
            destination,
            self.tile_size,
            self.character.direction().vector(),
        );
        if self.grid.is_walkable(tile) {
            self.character.advance_to(destination, tile);
        }
    }

    /// Path to the clicked pixel and start walking it. Clicks on obstacles,
    /// outside the map or on the current tile are ignored.
    ///
    /// Returns the path being walked.
    pub fn click(&mut self, point: Point) -> Option<Path> {
        let end = self.pixel_to_tile(point);
        if !self.is_click_target(end) {
            log::debug!("click at {} ignored", end);
            return None;
        }
        let path = find_path_with(&self.grid, self.character.tile(), end, self.pathfinder)?;
        if path.is_empty() {
            return None;
        }
        log::debug!("walking to {}: {}", end, format_path(&path));
        self.walk_path(path.clone());
        Some(path)
    }

    /// Walk `path` one tile per step, each step starting when the previous one arrives.
    /// Any walk already in progress is cancelled.
    pub fn walk_path(&mut self, path: Path) {
        self.character.cancel();
        walk_route(&mut self.character, path.into(), self.tile_size);
    }

    /// Keyboard movement: cancel any walk and head off in `direction`
    pub fn steer(&mut self, direction: Direction) {
        self.character.cancel();
        self.character.steer(direction);
    }

    /// Keyboard release
    pub fn release(&mut self) {
        self.character.stop();
    }

    /// Move the character to `tile` without walking, abandoning any walk.
    pub fn place_character(&mut self, tile: Tile) -> Result<(), WorldError> {
        if !self.grid.is_walkable(tile) {
            return Err(WorldError::BlockedTile { x: tile.x, y: tile.y });
        }
        self.character.place(tile, tile.center(self.tile_size));
        Ok(())
    }

    /// Change the tile size, rescaling the character's pixel-space state so it
    /// keeps its place on the map.
    pub fn change_tile_size(&mut self, value: f32) -> Result<(), WorldError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(WorldError::InvalidTileSize(value));
        }
        let ratio = value / self.tile_size;
        self.character.rescale(ratio);
        self.tile_size = value;
        Ok(())
    }
}

fn walk_route(character: &mut Character, mut route: VecDeque<Direction>, distance: f32) {
    let Some(direction) = route.pop_front() else {
        log::debug!("route finished at {}", character.tile());
        return;
    };
    character.walk(direction, distance, move |character| {
        // The stride follows tile size changes made mid-route
        let stride = character.stride();
        walk_route(character, route, stride);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_world(start: Tile) -> World {
        let grid = Grid::new(10, 10).unwrap();
        World::with_character_at(grid, start, &Config::default()).unwrap()
    }

    fn run_until_idle(world: &mut World, max_ticks: usize) -> usize {
        for tick in 0..max_ticks {
            if !world.character().is_moving() {
                return tick;
            }
            world.tick();
        }
        max_ticks
    }

    #[test]
    fn test_character_starts_centered() {
        let world = open_world(Tile::new(5, 5));
        assert_eq!(world.character().position(), Point::new(330.0, 330.0));
        assert_eq!(world.character().direction(), Direction::S);
        assert!(!world.character().is_moving());
    }

    #[test]
    fn test_generate_places_character_on_free_tile() {
        let mut config = Config::default();
        config.world.tree_probability = 0.4;
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let world = World::generate(&config, &mut rng).unwrap();
            assert!(!world.is_obstacle(world.character().tile()));
        }
    }

    #[test]
    fn test_generate_full_map_fails() {
        let mut config = Config::default();
        config.world.tree_probability = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(World::generate(&config, &mut rng).unwrap_err(), WorldError::NoFreeTile);
    }

    #[test]
    fn test_start_on_obstacle_is_rejected() {
        let grid = Grid::with_obstacles(3, 3, &[Tile::new(1, 1)]).unwrap();
        let err = World::with_character_at(grid, Tile::new(1, 1), &Config::default()).unwrap_err();
        assert_eq!(err, WorldError::BlockedTile { x: 1, y: 1 });
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut world = open_world(Tile::new(2, 2));
        world.tick();
        assert_eq!(world.character().position(), Point::new(150.0, 150.0));
    }

    #[test]
    fn test_steer_stops_at_map_edge() {
        let mut world = open_world(Tile::new(1, 5));
        world.steer(Direction::NW);
        let ticks = run_until_idle(&mut world, 200);
        assert!(ticks < 200);
        assert_eq!(world.character().tile(), Tile::new(0, 5));
        assert!(world.character().position().x >= 0.0);
    }

    #[test]
    fn test_click_ignores_obstacle_and_outside() {
        let grid = Grid::with_obstacles(10, 10, &[Tile::new(7, 7)]).unwrap();
        let mut world = World::with_character_at(grid, Tile::new(1, 1), &Config::default()).unwrap();
        assert_eq!(world.click(Point::new(7.5 * 60.0, 7.5 * 60.0)), None);
        assert_eq!(world.click(Point::new(-10.0, 5.0)), None);
        assert_eq!(world.click(Point::new(90.0, 90.0)), None);
        assert!(!world.character().is_moving());
    }

    #[test]
    fn test_click_targets() {
        let grid = Grid::with_obstacles(5, 5, &[Tile::new(3, 3)]).unwrap();
        let world = World::with_character_at(grid, Tile::new(1, 1), &Config::default()).unwrap();
        assert!(world.is_click_target(Tile::new(2, 1)));
        assert!(!world.is_click_target(Tile::new(1, 1)));
        assert!(!world.is_click_target(Tile::new(3, 3)));
        assert!(!world.is_click_target(Tile::new(5, 0)));
    }

    #[test]
    fn test_click_walks_to_tile() {
        let mut world = open_world(Tile::new(0, 0));
        let path = world.click(Tile::new(3, 1).center(60.0)).unwrap();
        assert_eq!(path.len(), 3);
        run_until_idle(&mut world, 1000);
        assert_eq!(world.character().tile(), Tile::new(3, 1));
        assert_eq!(world.character().position(), Tile::new(3, 1).center(60.0));
        assert_eq!(world.character().destination(), None);
    }

    #[test]
    fn test_steer_cancels_route() {
        let mut world = open_world(Tile::new(0, 0));
        world.click(Tile::new(9, 9).center(60.0)).unwrap();
        for _ in 0..5 {
            world.tick();
        }
        world.steer(Direction::SW);
        assert_eq!(world.character().destination(), None);
        world.release();
        assert!(!world.character().is_moving());
    }

    #[test]
    fn test_change_tile_size_rescales() {
        let mut world = open_world(Tile::new(2, 3));
        world.change_tile_size(30.0).unwrap();
        assert_eq!(world.character().position(), Point::new(75.0, 105.0));
        assert_eq!(world.character().moving_speed(), 1.5);
        assert_eq!(world.pixel_to_tile(world.character().position()), Tile::new(2, 3));
        assert_eq!(world.change_tile_size(0.0), Err(WorldError::InvalidTileSize(0.0)));
    }

    #[test]
    fn test_place_character() {
        let grid = Grid::with_obstacles(4, 4, &[Tile::new(3, 3)]).unwrap();
        let mut world = World::with_character_at(grid, Tile::new(0, 0), &Config::default()).unwrap();
        world.place_character(Tile::new(2, 1)).unwrap();
        assert_eq!(world.character().tile(), Tile::new(2, 1));
        assert!(world.place_character(Tile::new(3, 3)).is_err());
        assert!(world.place_character(Tile::new(4, 0)).is_err());
    }
}
