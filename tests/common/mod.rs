#![allow(dead_code)]

use isowalk::pathfinding::walk_tiles;
use isowalk::{Config, Direction, Grid, Tile, World};

/// Map parsed from the test layout format:
/// - s: start tile
/// - d: destination tile
/// - ■ or #: obstacle
/// - □ or .: free tile
pub struct TestMap {
    pub grid: Grid,
    pub start: Tile,
    pub dest: Option<Tile>,
}

pub fn parse_test_map(text: &str) -> TestMap {
    let mut start = None;
    let mut dest = None;
    let mut layout = String::new();

    let rows = text.lines().map(str::trim).filter(|line| !line.is_empty());
    for (y, line) in rows.enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let tile = Tile::new(x as i32, y as i32);
            match ch {
                's' => {
                    start = Some(tile);
                    layout.push('□');
                }
                'd' => {
                    dest = Some(tile);
                    layout.push('□');
                }
                other => layout.push(other),
            }
        }
        layout.push('\n');
    }

    TestMap {
        grid: Grid::from_layout(&layout).expect("test map should parse"),
        start: start.expect("test map needs an 's' tile"),
        dest,
    }
}

/// World over a test map with the character on its start tile
pub fn world_from_map(text: &str) -> (World, TestMap) {
    let map = parse_test_map(text);
    let world = World::with_character_at(map.grid.clone(), map.start, &Config::default())
        .expect("start tile should be free");
    (world, map)
}

/// Tick until the character stands still; returns the ticks used
pub fn run_until_idle(world: &mut World, max_ticks: usize) -> usize {
    for tick in 0..max_ticks {
        if !world.character().is_moving() {
            return tick;
        }
        world.tick();
    }
    panic!("character still moving after {} ticks", max_ticks);
}

/// Tiles visited by following `path` from `start`, including both ends
pub fn path_tiles(start: Tile, path: &[Direction]) -> Vec<Tile> {
    let mut tiles = vec![start];
    for i in 1..=path.len() {
        tiles.push(walk_tiles(start, &path[..i]));
    }
    tiles
}

/// Visualize a path on a grid
pub fn visualize_path(grid: &Grid, start: Tile, path: &[Direction]) -> String {
    let tiles = path_tiles(start, path);
    let end = *tiles.last().unwrap_or(&start);
    let mut result = String::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let tile = Tile::new(x, y);
            let symbol = if tile == start {
                'S'
            } else if tile == end {
                'D'
            } else if tiles.contains(&tile) {
                '*'
            } else if grid.is_obstacle(tile) {
                '█'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

/// Every step stays on free tiles and never squeezes between two blocked shoulders
pub fn assert_path_valid(grid: &Grid, start: Tile, path: &[Direction]) {
    let tiles = path_tiles(start, path);
    for pair in tiles.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        assert!(grid.tile_exists(to), "path leaves the grid at {}", to);
        assert!(!grid.is_obstacle(to), "path enters obstacle at {}", to);
        if from.x != to.x && from.y != to.y {
            let both_blocked =
                grid.is_obstacle(Tile::new(from.x, to.y)) && grid.is_obstacle(Tile::new(to.x, from.y));
            assert!(!both_blocked, "path cuts the corner between {} and {}", from, to);
        }
    }
}
