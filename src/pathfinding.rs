use crate::direction::Direction;
use crate::grid::Grid;
use crate::point::Tile;
use std::collections::VecDeque;

/// Ordered tile steps from start to destination
pub type Path = Vec<Direction>;

/// Search tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathfinderOptions {
    /// Reject a diagonal step when either shoulder cell is an obstacle,
    /// instead of only when both are.
    pub strict_corners: bool,
}

/// Find the shortest step sequence from `start` to `end` using default options.
pub fn find_path(grid: &Grid, start: Tile, end: Tile) -> Option<Path> {
    find_path_with(grid, start, end, PathfinderOptions::default())
}

/// Breadth-first search over the 8-neighbour tile graph.
///
/// Neighbours are expanded in `Direction::SEARCH_ORDER` and the search stops as
/// soon as `end` is discovered, so among equally short paths the one found
/// first in that order wins. Returns None when `end` is unreachable.
pub fn find_path_with(
    grid: &Grid,
    start: Tile,
    end: Tile,
    options: PathfinderOptions,
) -> Option<Path> {
    let (Some(start_index), Some(end_index)) = (grid.index(start), grid.index(end)) else {
        log::debug!("[find_path] {} -> {} leaves the grid", start, end);
        return None;
    };
    if start == end {
        return Some(Vec::new());
    }
    if grid.is_obstacle(end) {
        log::debug!("[find_path] destination {} is an obstacle", end);
        return None;
    }

    let mut visited = vec![false; grid.len()];
    // Direction of the step that first reached each cell
    let mut came_by: Vec<Option<Direction>> = vec![None; grid.len()];
    let mut frontier = VecDeque::new();

    visited[start_index] = true;
    frontier.push_back(start);

    let mut expanded = 0usize;
    while let Some(tile) = frontier.pop_front() {
        expanded += 1;
        log::trace!("[find_path] expanding {}", tile);

        for direction in Direction::SEARCH_ORDER {
            let next = tile.step(direction);
            let Some(next_index) = grid.index(next) else {
                continue;
            };
            if visited[next_index] || grid.is_obstacle(next) {
                continue;
            }
            if !corner_is_passable(grid, next, tile, options) {
                continue;
            }

            visited[next_index] = true;
            came_by[next_index] = Some(direction);

            if next_index == end_index {
                let path = reconstruct(grid, &came_by, end);
                log::debug!(
                    "[find_path] {} -> {}: {} steps after {} expansions",
                    start,
                    end,
                    path.len(),
                    expanded
                );
                return Some(path);
            }
            frontier.push_back(next);
        }
    }

    log::debug!(
        "[find_path] no path {} -> {} after {} expansions",
        start,
        end,
        expanded
    );
    None
}

/// A diagonal step between `first` and `second` may not squeeze between
/// blocked shoulder cells. Orthogonal steps always pass.
fn corner_is_passable(grid: &Grid, first: Tile, second: Tile, options: PathfinderOptions) -> bool {
    if first.x == second.x || first.y == second.y {
        return true;
    }
    let shoulder_a = grid.is_obstacle(Tile::new(first.x, second.y));
    let shoulder_b = grid.is_obstacle(Tile::new(second.x, first.y));
    if options.strict_corners {
        !(shoulder_a || shoulder_b)
    } else {
        !(shoulder_a && shoulder_b)
    }
}

fn reconstruct(grid: &Grid, came_by: &[Option<Direction>], end: Tile) -> Path {
    let mut path = Vec::new();
    let mut tile = end;
    while let Some(direction) = grid.index(tile).and_then(|index| came_by[index]) {
        path.push(direction);
        let (dx, dy) = direction.offset();
        tile = Tile::new(tile.x - dx, tile.y - dy);
    }
    path.reverse();
    path
}

/// Format path for display
pub fn format_path(path: &[Direction]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }
    path.iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Tile reached by following `path` from `start`
pub fn walk_tiles(start: Tile, path: &[Direction]) -> Tile {
    path.iter().fold(start, |tile, &d| tile.step(d))
}
