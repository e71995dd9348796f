pub mod action_log;
pub mod character;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod input;
pub mod pathfinding;
pub mod point;
pub mod projection;
pub mod tick;
pub mod world;

pub use character::Character;
pub use config::Config;
pub use direction::Direction;
pub use error::{ConfigError, ExportError, ParseDirectionError, WorldError};
pub use grid::{Cell, Grid};
pub use pathfinding::{find_path, Path};
pub use point::{Point, Tile};
pub use world::World;
