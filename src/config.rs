use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_base_speed")]
    pub base_speed: f64,
    #[serde(default = "default_player_radius")]
    pub radius: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    /// Alpha of the vision cone overlay.
    #[serde(default = "default_fov_opacity")]
    pub fov_opacity: f32,
    /// World units visible vertically through the follow camera.
    #[serde(default = "default_camera_height")]
    pub camera_height: f32,
    #[serde(default = "default_show_minimap")]
    pub show_minimap: bool,
    /// Minimap viewport edge length in pixels.
    #[serde(default = "default_minimap_size")]
    pub minimap_size: f32,
}

// Default values
fn default_map_path() -> String { "assets/maps/1.json".to_string() }
fn default_base_speed() -> f64 { 300.0 }
fn default_player_radius() -> f64 { 36.0 }
fn default_bg_r() -> u8 { 12 }
fn default_bg_g() -> u8 { 12 }
fn default_bg_b() -> u8 { 16 }
fn default_fov_opacity() -> f32 { 0.3 }
fn default_camera_height() -> f32 { 800.0 }
fn default_show_minimap() -> bool { true }
fn default_minimap_size() -> f32 { 240.0 }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_speed: default_base_speed(),
            radius: default_player_radius(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            fov_opacity: default_fov_opacity(),
            camera_height: default_camera_height(),
            show_minimap: default_show_minimap(),
            minimap_size: default_minimap_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            player: PlayerConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        println!("Loaded configuration from config.toml");
                        config
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config.toml: {}", e);
                        eprintln!("Using default configuration");
                        Config::default()
                    }
                }
            }
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}
