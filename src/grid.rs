use crate::error::WorldError;
use crate::point::Tile;
use rand::Rng;

/// Cell state. Obstacles are drawn as trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
}

/// Grid structure for storing cell states, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells empty
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        })
    }

    /// Create a grid with specific obstacle tiles. Tiles outside the grid are ignored.
    pub fn with_obstacles(width: i32, height: i32, obstacles: &[Tile]) -> Result<Self, WorldError> {
        let mut grid = Self::new(width, height)?;
        for &tile in obstacles {
            if let Some(index) = grid.index(tile) {
                grid.cells[index] = Cell::Obstacle;
            }
        }
        Ok(grid)
    }

    /// Fill every cell independently: obstacle with probability `tree_probability`.
    pub fn generate<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        tree_probability: f64,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        if !(0.0..=1.0).contains(&tree_probability) {
            return Err(WorldError::InvalidProbability(tree_probability));
        }
        let mut grid = Self::new(width, height)?;
        for cell in grid.cells.iter_mut() {
            if rng.gen::<f64>() < tree_probability {
                *cell = Cell::Obstacle;
            }
        }
        log::debug!(
            "generated {}x{} grid with {} obstacles",
            width,
            height,
            grid.obstacle_count()
        );
        Ok(grid)
    }

    /// Parse a text layout: `□` or `.` is empty, `■` or `#` is an obstacle.
    /// Surrounding whitespace and blank lines are skipped; all rows must have the same width.
    pub fn from_layout(layout: &str) -> Result<Self, WorldError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let expected = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(WorldError::EmptyLayout),
        };

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(WorldError::RaggedLayout { row, expected, found });
            }
            for (column, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '□' | '.' => Cell::Empty,
                    '■' | '#' => Cell::Obstacle,
                    _ => return Err(WorldError::UnknownSymbol { symbol, row, column }),
                };
                cells.push(cell);
            }
        }

        Ok(Grid {
            width: expected as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// Render the grid with the same symbols `from_layout` accepts
    pub fn to_layout(&self) -> String {
        let mut result = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            for cell in row {
                result.push(match cell {
                    Cell::Empty => '□',
                    Cell::Obstacle => '■',
                });
            }
            result.push('\n');
        }
        result
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn tile_exists(&self, tile: Tile) -> bool {
        0 <= tile.x && tile.x < self.width && 0 <= tile.y && tile.y < self.height
    }

    /// Row-major index of the tile, or None if it lies outside the grid
    pub fn index(&self, tile: Tile) -> Option<usize> {
        if self.tile_exists(tile) {
            Some((tile.x + tile.y * self.width) as usize)
        } else {
            None
        }
    }

    /// Convert a row-major index back to a tile
    pub fn tile_at(&self, index: usize) -> Tile {
        let index = index as i32;
        Tile::new(index % self.width, index / self.width)
    }

    pub fn cell(&self, tile: Tile) -> Option<Cell> {
        self.index(tile).map(|index| self.cells[index])
    }

    /// Check if the tile holds an obstacle.
    ///
    /// # Panics
    /// If the tile is outside the grid; callers check `tile_exists` first.
    pub fn is_obstacle(&self, tile: Tile) -> bool {
        assert!(
            self.tile_exists(tile),
            "is_obstacle called with tile {} outside {}x{} grid",
            tile,
            self.width,
            self.height
        );
        self.cells[(tile.x + tile.y * self.width) as usize] == Cell::Obstacle
    }

    /// Walkable means inside the grid and not an obstacle
    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.cell(tile) == Some(Cell::Empty)
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Obstacle).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells.len() - self.obstacle_count()
    }

    /// Uniformly random tile inside the grid
    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        Tile::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Sample random tiles until one is free. Fails on a grid with no free cell.
    pub fn random_free_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Tile, WorldError> {
        if self.free_count() == 0 {
            return Err(WorldError::NoFreeTile);
        }
        loop {
            let tile = self.random_tile(rng);
            if !self.is_obstacle(tile) {
                return Ok(tile);
            }
        }
    }
}
