//! RON configuration loader
//!
//! Loads tunables from an external RON file, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fog: FogSettings,
    pub dungeon: DungeonSettings,
}

/// Fog of war tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogSettings {
    /// Maximum shadow-cast distance in cells
    pub radius: i32,
    /// Opacity of cells that were seen before but are not visible now
    pub remembered_alpha: f32,
    /// Opacity by distance remaining to the radius edge (index 0 = at the edge)
    pub dropoff: Vec<f32>,
    /// Opacity change per millisecond, scaled by distance to the target
    pub alpha_per_ms: f32,
    /// Lower bound on that distance so fades never stall
    pub min_fade_distance: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            radius: 7,
            remembered_alpha: 0.8,
            dropoff: vec![0.7, 0.6, 0.3, 0.1],
            alpha_per_ms: 0.004,
            min_fade_distance: 0.05,
        }
    }
}

/// Layout generator settings for the demo host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonSettings {
    pub width: i32,
    pub height: i32,
    pub max_rooms: usize,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Fixed seed for reproducible layouts
    pub seed: Option<u64>,
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            width: 81,
            height: 81,
            max_rooms: 24,
            min_room_size: 3,
            max_room_size: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Load configuration, falling back to defaults if the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to load config from {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Default config file location
    pub fn default_path() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "gloomveil", "Gloomveil") {
            proj_dirs.config_dir().join("config.ron")
        } else {
            // Fallback to current directory
            PathBuf::from("./config.ron")
        }
    }

    pub fn to_ron(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).unwrap_or_default()
    }
}
