//! Exponential smoothing of the head-position signal.
//!
//! Detections arrive on their own irregular cadence and only move the
//! targets. The frame loop calls [`TrackingSmoother::tick`] once per frame,
//! which moves the current values a fixed fraction of the way toward the
//! targets. When detection is lost the targets stay where they were, so the
//! camera settles on the last known head position instead of snapping back
//! to center.

use crate::constants::{NEUTRAL_DEPTH, SMOOTHING_MAX, SMOOTHING_MIN};
use serde::{Deserialize, Serialize};

/// Latest raw head-position reading, already mapped into scene units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingSignal {
    /// Mirrored horizontal offset, roughly in [-1, 1]
    pub target_x: f64,
    /// Mirrored vertical offset, roughly in [-1, 1]
    pub target_y: f64,
    /// Depth proxy from face size, in [0.5, 1.5]
    pub target_z: f64,
}

impl TrackingSignal {
    pub const fn new(target_x: f64, target_y: f64, target_z: f64) -> Self {
        Self {
            target_x,
            target_y,
            target_z,
        }
    }
}

impl Default for TrackingSignal {
    fn default() -> Self {
        Self::new(0.0, 0.0, NEUTRAL_DEPTH)
    }
}

/// Smoothed camera-driving values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for SmoothedState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: NEUTRAL_DEPTH,
        }
    }
}

/// Per-axis exponential smoother with a "has active detection" flag
#[derive(Debug, Clone)]
pub struct TrackingSmoother {
    factor: f64,
    target: TrackingSignal,
    current: SmoothedState,
    tracking: bool,
}

impl TrackingSmoother {
    /// Create a smoother starting at the neutral head position
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not in the range (0, 1]
    #[must_use]
    pub fn new(factor: f64) -> Self {
        assert!(factor > SMOOTHING_MIN && factor <= SMOOTHING_MAX, "Smoothing factor must be in (0, 1]");
        Self {
            factor,
            target: TrackingSignal::default(),
            current: SmoothedState::default(),
            tracking: false,
        }
    }

    /// Record a new detection. Returns `true` if this starts tracking.
    ///
    /// Inputs are not validated; out-of-range values simply exaggerate the
    /// resulting camera motion.
    pub fn update_target(&mut self, x: f64, y: f64, z_proxy: f64) -> bool {
        self.target = TrackingSignal::new(x, y, z_proxy);
        let changed = !self.tracking;
        self.tracking = true;
        changed
    }

    /// Same as [`update_target`](Self::update_target) for a mapped signal
    pub fn apply_signal(&mut self, signal: TrackingSignal) -> bool {
        self.update_target(signal.target_x, signal.target_y, signal.target_z)
    }

    /// Record a frame without a detection. Returns `true` if this stops tracking.
    ///
    /// Targets are left untouched.
    pub fn on_detection_lost(&mut self) -> bool {
        let changed = self.tracking;
        self.tracking = false;
        changed
    }

    /// Advance every axis toward its target by the smoothing factor
    pub fn tick(&mut self) -> SmoothedState {
        self.current.x = Self::approach(self.current.x, self.target.target_x, self.factor);
        self.current.y = Self::approach(self.current.y, self.target.target_y, self.factor);
        self.current.z = Self::approach(self.current.z, self.target.target_z, self.factor);
        self.current
    }

    #[inline]
    fn approach(current: f64, target: f64, factor: f64) -> f64 {
        current + (target - current) * factor
    }

    /// Whether the most recent detection frame contained a face
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub const fn target(&self) -> TrackingSignal {
        self.target
    }

    pub const fn current(&self) -> SmoothedState {
        self.current
    }

    pub const fn factor(&self) -> f64 {
        self.factor
    }
}
