use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub character: CharacterConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub pathfinding: PathfindingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_tree_probability")]
    pub tree_probability: f64,
    /// Fixed RNG seed; a fresh seed is drawn from entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Text layout loaded instead of generating the map
    #[serde(default)]
    pub layout_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterConfig {
    #[serde(default = "default_moving_speed")]
    pub moving_speed: f32,
    #[serde(default = "default_arrival_tolerance")]
    pub arrival_tolerance: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_min_tile_size")]
    pub min_tile_size: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: f32,
    #[serde(default = "default_max_ticks_per_frame")]
    pub max_ticks_per_frame: u32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathfindingConfig {
    #[serde(default)]
    pub strict_corners: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_width() -> i32 { 10 }
fn default_height() -> i32 { 10 }
fn default_tree_probability() -> f64 { 0.05 }
fn default_moving_speed() -> f32 { 3.0 }
fn default_arrival_tolerance() -> f32 { 3.0 }
fn default_tile_size() -> f32 { 60.0 }
fn default_min_tile_size() -> f32 { 10.0 }
fn default_zoom_step() -> f32 { 10.0 }
fn default_tick_rate_hz() -> f32 { 60.0 }
fn default_max_ticks_per_frame() -> u32 { 10 }
fn default_bg_r() -> u8 { 0 }
fn default_bg_g() -> u8 { 0 }
fn default_bg_b() -> u8 { 0 }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            tree_probability: default_tree_probability(),
            seed: None,
            layout_file: None,
        }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            moving_speed: default_moving_speed(),
            arrival_tolerance: default_arrival_tolerance(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            min_tile_size: default_min_tile_size(),
            zoom_step: default_zoom_step(),
            tick_rate_hz: default_tick_rate_hz(),
            max_ticks_per_frame: default_max_ticks_per_frame(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            character: CharacterConfig::default(),
            view: ViewConfig::default(),
            pathfinding: PathfindingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            log::info!("No config.toml found, using default configuration");
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                log::info!("Loaded configuration from config.toml");
                config
            }
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.world.width <= 0 || self.world.height <= 0 {
            return invalid(format!(
                "world size {}x{} must be positive",
                self.world.width, self.world.height
            ));
        }
        if !(0.0..=1.0).contains(&self.world.tree_probability) {
            return invalid(format!(
                "tree_probability {} must be within 0..=1",
                self.world.tree_probability
            ));
        }
        if !(self.view.tile_size.is_finite() && self.view.tile_size > 0.0) {
            return invalid(format!("tile_size {} must be positive", self.view.tile_size));
        }
        if !(self.view.tick_rate_hz.is_finite() && self.view.tick_rate_hz > 0.0) {
            return invalid(format!("tick_rate_hz {} must be positive", self.view.tick_rate_hz));
        }
        let positive = [
            ("moving_speed", self.character.moving_speed),
            ("arrival_tolerance", self.character.arrival_tolerance),
            ("min_tile_size", self.view.min_tile_size),
            ("zoom_step", self.view.zoom_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{} {} must be positive", name, value));
            }
        }
        if self.view.tile_size < self.view.min_tile_size {
            return invalid(format!(
                "tile_size {} is below min_tile_size {}",
                self.view.tile_size, self.view.min_tile_size
            ));
        }
        if self.view.max_ticks_per_frame == 0 {
            return invalid("max_ticks_per_frame must be at least 1".to_string());
        }
        Ok(())
    }
}
