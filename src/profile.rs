//! Calibration profiles for parallax strength, smoothing and object motion.
//!
//! Two built-in profiles exist. `gentle` keeps the parallax subtle and the
//! objects calm; `dramatic` adds group tilt, orbiting and pulsing along with
//! a cube that reacts to head movement. Any value can be overridden through a
//! `custom` profile in the configuration file; fields it leaves out, including
//! fields inside the nested motion sections, keep their `gentle` values.

use crate::{
    constants::{DEFAULT_CAMERA_DISTANCE, DEFAULT_PARALLAX_GAIN, DEFAULT_SMOOTHING, SMOOTHING_MAX, SMOOTHING_MIN},
    Error, Result,
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A sine oscillation: `sin(t * frequency + phase) * amplitude`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Wave {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self { frequency, amplitude }
    }

    #[inline]
    pub fn sample(&self, t: f64, phase: f64) -> f64 {
        t.mul_add(self.frequency, phase).sin() * self.amplitude
    }
}

/// Circular path around the group's vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitMotion {
    /// Mean orbit radius
    pub radius: f64,
    /// Angular speed in radians per clock unit, scaled per object
    pub speed: f64,
    /// Slow modulation of the radius
    pub wobble: Wave,
}

/// Motion of nodes tagged `floating`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingMotion {
    pub orbit: Option<OrbitMotion>,
    pub bob: Wave,
    /// Multiplier applied to the object phase inside the bob term
    pub bob_phase_multiplier: f64,
    /// Rotation added per tick on each axis
    pub spin: Vector3<f64>,
    /// Uniform scale oscillation around 1.0
    pub pulse: Option<Wave>,
}

/// Motion of nodes tagged `character`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterMotion {
    pub bob: Wave,
    pub secondary_bob: Option<Wave>,
    pub yaw: Wave,
    pub roll: Option<Wave>,
    pub breathing: Option<Wave>,
}

/// Motion of nodes tagged `main_object` (cube model only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainObjectMotion {
    pub spin_x: f64,
    pub spin_y: f64,
    /// Extra rotation per tick proportional to the smoothed head offset
    pub head_reaction: Option<f64>,
}

/// Emissive pulsing in the room model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowMotion {
    pub base: f64,
    pub frequency: f64,
    pub amplitude: f64,
}

impl GlowMotion {
    pub fn intensity(&self, t: f64) -> f64 {
        (t * self.frequency).sin().mul_add(self.amplitude, self.base)
    }
}

/// Full set of tuning values for one viewing experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationProfile {
    /// Fraction of the remaining distance to target covered per tick
    pub smoothing: f64,
    /// Camera travel per unit of head offset
    pub parallax_gain: f64,
    /// Camera distance from the origin
    pub camera_distance: f64,
    /// Group rotation per unit of head offset; `None` disables tilt
    pub tilt_gain: Option<f64>,
    pub floating: FloatingMotion,
    pub character: CharacterMotion,
    pub main_object: MainObjectMotion,
    pub glow: GlowMotion,
}

impl CalibrationProfile {
    /// Subtle parallax, no tilt
    #[must_use]
    pub fn gentle() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            parallax_gain: DEFAULT_PARALLAX_GAIN,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            tilt_gain: None,
            floating: FloatingMotion {
                orbit: None,
                bob: Wave::new(2.0, 0.15),
                bob_phase_multiplier: 1.0,
                spin: Vector3::new(0.008, 0.012, 0.0),
                pulse: None,
            },
            character: CharacterMotion {
                bob: Wave::new(1.5, 0.08),
                secondary_bob: None,
                yaw: Wave::new(0.5, 0.08),
                roll: None,
                breathing: None,
            },
            main_object: MainObjectMotion {
                spin_x: 0.004,
                spin_y: 0.006,
                head_reaction: None,
            },
            glow: GlowMotion {
                base: 0.4,
                frequency: 1.0,
                amplitude: 0.1,
            },
        }
    }

    /// Strong parallax with group tilt and livelier objects
    #[must_use]
    pub fn dramatic() -> Self {
        Self {
            smoothing: 0.12,
            parallax_gain: 5.0,
            camera_distance: 8.0,
            tilt_gain: Some(0.3),
            floating: FloatingMotion {
                orbit: Some(OrbitMotion {
                    radius: 2.5,
                    speed: 0.5,
                    wobble: Wave::new(0.5, 0.3),
                }),
                bob: Wave::new(2.0, 0.25),
                bob_phase_multiplier: 2.0,
                spin: Vector3::new(0.01, 0.015, 0.005),
                pulse: Some(Wave::new(3.0, 0.1)),
            },
            character: CharacterMotion {
                bob: Wave::new(1.5, 0.12),
                secondary_bob: Some(Wave::new(3.0, 0.04)),
                yaw: Wave::new(0.5, 0.15),
                roll: Some(Wave::new(0.7, 0.05)),
                breathing: Some(Wave::new(2.0, 0.03)),
            },
            main_object: MainObjectMotion {
                spin_x: 0.004,
                spin_y: 0.006,
                head_reaction: Some(0.01),
            },
            glow: GlowMotion {
                base: 0.5,
                frequency: 2.0,
                amplitude: 0.3,
            },
        }
    }

    /// Check ranges that would otherwise panic or produce a degenerate view
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing > SMOOTHING_MIN && self.smoothing <= SMOOTHING_MAX) {
            return Err(Error::ConfigError(
                "Smoothing factor must be in (0, 1]".to_string(),
            ));
        }
        if !(self.camera_distance > 0.0) {
            return Err(Error::ConfigError(
                "Camera distance must be greater than 0".to_string(),
            ));
        }
        if !self.parallax_gain.is_finite() {
            return Err(Error::ConfigError("Parallax gain must be finite".to_string()));
        }
        if let Some(orbit) = &self.floating.orbit {
            if orbit.radius < 0.0 {
                return Err(Error::ConfigError("Orbit radius must be non-negative".to_string()));
            }
        }
        Ok(())
    }
}

// Missing fields in a partial custom section take the gentle values
impl Default for FloatingMotion {
    fn default() -> Self {
        CalibrationProfile::gentle().floating
    }
}

impl Default for CharacterMotion {
    fn default() -> Self {
        CalibrationProfile::gentle().character
    }
}

impl Default for MainObjectMotion {
    fn default() -> Self {
        CalibrationProfile::gentle().main_object
    }
}

impl Default for GlowMotion {
    fn default() -> Self {
        CalibrationProfile::gentle().glow
    }
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::gentle()
    }
}

/// Which calibration profile to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Gentle,
    Dramatic,
    /// Use the `calibration` section of the configuration file
    Custom,
}

impl Default for ProfileKind {
    fn default() -> Self {
        Self::Gentle
    }
}

impl FromStr for ProfileKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gentle" | "subtle" => Ok(Self::Gentle),
            "dramatic" | "strong" => Ok(Self::Dramatic),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::InvalidInput(format!("Unknown profile: {s}"))),
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gentle => "gentle",
            Self::Dramatic => "dramatic",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_validate() {
        assert!(CalibrationProfile::gentle().validate().is_ok());
        assert!(CalibrationProfile::dramatic().validate().is_ok());
    }

    #[test]
    fn test_invalid_smoothing() {
        let mut profile = CalibrationProfile::gentle();
        profile.smoothing = 0.0;
        assert!(profile.validate().is_err());
        profile.smoothing = 1.5;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_glow_peak() {
        let glow = GlowMotion {
            base: 0.5,
            frequency: 2.0,
            amplitude: 0.3,
        };
        let t = std::f64::consts::FRAC_PI_2 / 2.0;
        assert!((glow.intensity(t) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_profile_kind_parse() {
        assert_eq!("Dramatic".parse::<ProfileKind>().unwrap(), ProfileKind::Dramatic);
        assert_eq!("gentle".parse::<ProfileKind>().unwrap(), ProfileKind::Gentle);
        assert!("wild".parse::<ProfileKind>().is_err());
        assert_eq!(ProfileKind::Custom.to_string(), "custom");
    }
}
