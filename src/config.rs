//! Configuration management for the head parallax viewer

use crate::{
    animation::{AnimationClock, ClockMode},
    camera::{Lens, Viewport},
    constants::{
        DEFAULT_CLOCK_STEP, DEFAULT_DEPTH_SCALE, DEFAULT_FAR_PLANE, DEFAULT_FOV_DEGREES, DEFAULT_MAX_CLOCK_STEP,
        DEFAULT_MIN_CONFIDENCE, DEFAULT_NEAR_PLANE, DEFAULT_TARGET_FPS, DEFAULT_VIEWPORT_HEIGHT,
        DEFAULT_VIEWPORT_WIDTH, DEPTH_PROXY_MAX, DEPTH_PROXY_MIN,
    },
    detection::DetectionMapper,
    profile::{CalibrationProfile, ProfileKind},
    scene::ModelKind,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which calibration profile to use
    pub profile: ProfileKind,

    /// Values for the `custom` profile
    pub calibration: CalibrationProfile,

    /// Detection-to-signal mapping
    pub detection: DetectionConfig,

    /// Viewport and projection
    pub display: DisplayConfig,

    /// Animation clock
    pub clock: ClockConfig,

    /// Session start-up
    pub session: SessionConfig,
}

/// Detection mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Scale `k` in `z = k / sqrt(width * height)`
    pub depth_scale: f64,

    /// Lower bound of the depth proxy
    pub depth_min: f64,

    /// Upper bound of the depth proxy
    pub depth_max: f64,

    /// Detections below this score count as no face (0.0-1.0)
    pub min_confidence: f32,

    /// Mirror the horizontal axis (webcam preview is mirrored)
    pub mirror: bool,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Windowed viewport width
    pub width: u32,

    /// Windowed viewport height
    pub height: u32,

    /// Vertical field of view in degrees
    pub fov_degrees: f64,

    /// Near clipping plane
    pub near: f64,

    /// Far clipping plane
    pub far: f64,

    /// Target framerate of the render loop
    pub target_fps: u32,
}

/// Animation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// `fixed` or `measured`
    pub mode: ClockMode,

    /// Increment per frame in fixed mode
    pub step: f64,

    /// Largest increment in measured mode
    pub max_step: f64,
}

/// Session start-up configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Model shown at start
    pub initial_model: ModelKind,

    /// Seed for random model placement
    pub seed: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            depth_scale: DEFAULT_DEPTH_SCALE,
            depth_min: DEPTH_PROXY_MIN,
            depth_max: DEPTH_PROXY_MAX,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            mirror: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR_PLANE,
            far: DEFAULT_FAR_PLANE,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            mode: ClockMode::Fixed,
            step: DEFAULT_CLOCK_STEP,
            max_step: DEFAULT_MAX_CLOCK_STEP,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_model: ModelKind::Cube,
            seed: 0,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// The calibration values selected by `profile`
    pub fn calibration_profile(&self) -> CalibrationProfile {
        match self.profile {
            ProfileKind::Gentle => CalibrationProfile::gentle(),
            ProfileKind::Dramatic => CalibrationProfile::dramatic(),
            ProfileKind::Custom => self.calibration.clone(),
        }
    }

    /// Create the detection mapper from configuration
    pub fn detection_mapper(&self) -> DetectionMapper {
        DetectionMapper::new(
            self.detection.depth_scale,
            self.detection.depth_min,
            self.detection.depth_max,
            self.detection.min_confidence,
            self.detection.mirror,
        )
    }

    /// Create the animation clock from configuration
    pub fn animation_clock(&self) -> AnimationClock {
        AnimationClock::new(self.clock.mode, self.clock.step, self.clock.max_step)
    }

    pub fn lens(&self) -> Lens {
        Lens {
            fov_degrees: self.display.fov_degrees,
            near: self.display.near,
            far: self.display.far,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::windowed(self.display.width, self.display.height)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.calibration_profile().validate()?;

        // Validate detection mapping; comparisons are written so NaN fails them
        if !(self.detection.depth_min <= self.detection.depth_max) {
            return Err(Error::ConfigError(
                "Depth minimum must not exceed depth maximum".to_string(),
            ));
        }
        if !(self.detection.depth_scale > 0.0) {
            return Err(Error::ConfigError("Depth scale must be greater than 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.detection.min_confidence) {
            return Err(Error::ConfigError(
                "Minimum confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Validate display settings
        if self.display.width == 0 || self.display.height == 0 {
            return Err(Error::ConfigError("Viewport size must be non-zero".to_string()));
        }
        if self.display.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }
        if !(self.display.fov_degrees > 0.0 && self.display.fov_degrees < 180.0) {
            return Err(Error::ConfigError(
                "Field of view must be between 0 and 180 degrees".to_string(),
            ));
        }
        if !(self.display.near > 0.0 && self.display.near < self.display.far) {
            return Err(Error::ConfigError(
                "Clipping planes must satisfy 0 < near < far".to_string(),
            ));
        }

        // Validate clock
        if !(self.clock.step >= 0.0 && self.clock.max_step >= 0.0) {
            return Err(Error::ConfigError("Clock steps must be non-negative".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Parallax Viewer Configuration

# Calibration profile: gentle, dramatic or custom
profile: gentle

# Detection mapping
detection:
  depth_scale: 0.8
  depth_min: 0.5
  depth_max: 1.5
  min_confidence: 0.5
  mirror: true

# Display settings
display:
  width: 640
  height: 480
  fov_degrees: 45.0
  near: 0.1
  far: 1000.0
  target_fps: 60

# Animation clock: fixed steps per frame, or measured wall-clock time
clock:
  mode: fixed
  step: 0.016
  max_step: 0.1

# Session
session:
  initial_model: cube
  seed: 0
"#;
