use thiserror::Error;

/// Errors raised while building or reconfiguring a world
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("obstacle probability must be within 0..=1, got {0}")]
    InvalidProbability(f64),

    #[error("no free tile available for character placement")]
    NoFreeTile,

    #[error("tile ({x}, {y}) is outside the grid or occupied")]
    BlockedTile { x: i32, y: i32 },

    #[error("tile size must be a positive finite number, got {0}")]
    InvalidTileSize(f32),

    #[error("layout contains no rows")]
    EmptyLayout,

    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout { row: usize, expected: usize, found: usize },

    #[error("unknown layout symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol { symbol: char, row: usize, column: usize },
}

/// A direction label that is not one of N, S, E, W, NE, SE, SW, NW
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}
