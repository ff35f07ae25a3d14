//! Runtime settings, read from a RON file. Every field has a default, so a
//! partial file (or no file at all) works.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub textures: TextureConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second cap; `None` means uncapped.
    pub framerate_limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub initial_speed: f64,
    pub start_paused: bool,
    /// Longest stretch of time a single frame may cover. Keeps the bodies from
    /// jumping after the window has been asleep. `None` disables the cap.
    pub max_frame_delta_secs: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Fraction of the remaining drag rotation applied each frame.
    pub damping_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub star_count: usize,
}

/// Where to look for body textures. Locations are tried in order; relative
/// paths are resolved against `root`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    pub root: Option<PathBuf>,
    pub sun: Vec<String>,
    pub earth: Vec<String>,
    pub moon: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: String,
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1280,
            height: 720,
            framerate_limit: Some(60),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            start_paused: false,
            max_frame_delta_secs: Some(0.25),
        }
    }
}

impl AnimationConfig {
    pub fn max_frame_delta(&self) -> Option<Duration> {
        self.max_frame_delta_secs
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            damping_factor: 0.05,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: consts::STAR_COUNT,
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            root: None,
            sun: vec!["./textures/sun_2k.jpg".to_string()],
            earth: vec![
                "./textures/earth_8k.jpg".to_string(),
                "https://www.solarsystemscope.com/textures/download/2k_earth_daymap.jpg".to_string(),
                "https://eoimages.gsfc.nasa.gov/images/imagerecords/73000/73909/world.topo.bathy.200412.3x5400x2700.jpg".to_string(),
            ],
            moon: vec![
                "./textures/moon_4k.jpg".to_string(),
                "https://www.solarsystemscope.com/textures/download/2k_moon.jpg".to_string(),
                "https://nasa3d.arc.nasa.gov/shared_assets/images/lis/moon/lro_color_poles_4k.jpg".to_string(),
            ],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: true,
        }
    }
}

/// Where a loaded config came from. Config is read before logging exists, so
/// the caller logs this once the subscriber is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigOrigin::Defaults(path) => {
                write!(f, "No config at {}, using defaults", path.display())
            }
        }
    }
}

impl Config {
    /// Reads the config at `path`. A missing file just means defaults.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        if !path.exists() {
            return Ok((Config::default(), ConfigOrigin::Defaults(path.to_path_buf())));
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }
}
